//! User input interpretation
//!
//! Tolerant matching for yes/no answers and numbered menu picks.

pub(crate) fn is_affirmative(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "sim" | "s" | "ok" | "claro" | "pode" | "isso" | "confirmo" | "yes"
    )
}

pub(crate) fn is_negative(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "não" | "nao" | "n" | "no")
}

/// Parse a 1-based menu pick, tolerating surrounding whitespace and a
/// trailing dot or parenthesis ("2.", "2)").
pub(crate) fn parse_menu_choice(text: &str) -> Option<usize> {
    let cleaned = text.trim().trim_end_matches(['.', ')']);
    cleaned.parse::<usize>().ok().filter(|n| *n >= 1)
}
