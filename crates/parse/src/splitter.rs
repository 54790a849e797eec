//! Multi-transaction splitting
//!
//! Detects messages that carry more than one transaction and splits them
//! into independently validated candidates. Candidates that fail
//! validation are silently dropped; the caller treats an empty result as
//! "no transactions found".

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use finia_core::Candidate;

use crate::validator::validate_on;

/// Currency-marker occurrences, used to count values in a single line
static CURRENCY_OCCURRENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)r\$\s*\d+").unwrap());

/// A "description … R$ amount" span within a single line
static TRANSACTION_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i).+?r\$\s*\d+(?:[.,]\d+)?").unwrap());

/// Whether the message looks like it contains more than one transaction:
/// more than one non-blank line, or more than one currency marker.
pub fn looks_multiple(message: &str) -> bool {
    let normalized = message.replace("\r\n", "\n");
    let lines = normalized.lines().filter(|l| !l.trim().is_empty()).count();
    if lines > 1 {
        return true;
    }
    CURRENCY_OCCURRENCE.find_iter(message).count() > 1
}

/// Split a message into validated candidates against the current date.
pub fn split(message: &str) -> Vec<Candidate> {
    split_on(message, Local::now().date_naive())
}

/// Split a message into validated candidates against an explicit "today".
///
/// Strategy, in order of preference: one candidate per non-blank line;
/// else one per `description…R$ amount` span on a single line; else one
/// per sentence (split on '.') that contains a currency marker. When the
/// message does not look multiple, this degenerates to plain validation.
pub fn split_on(message: &str, today: NaiveDate) -> Vec<Candidate> {
    if !looks_multiple(message) {
        return validate_on(message, today).into_iter().collect();
    }

    let normalized = message.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.lines().filter(|l| !l.trim().is_empty()).collect();

    if lines.len() > 1 {
        return lines
            .iter()
            .filter_map(|line| validate_on(line, today).ok())
            .collect();
    }

    let spans: Vec<&str> = TRANSACTION_SPAN
        .find_iter(&normalized)
        .map(|m| m.as_str())
        .collect();
    if spans.len() > 1 {
        return spans
            .iter()
            .filter_map(|span| validate_on(span, today).ok())
            .collect();
    }

    normalized
        .split('.')
        .filter(|sentence| CURRENCY_OCCURRENCE.is_match(sentence))
        .filter_map(|sentence| validate_on(sentence, today).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate_on as validate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_multi_line_detection_and_split() {
        let message = "Mercado R$ 100\nUber R$ 35";
        assert!(looks_multiple(message));

        let candidates = split_on(message, today());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].amount, 100.0);
        assert_eq!(candidates[0].description, "Mercado");
        assert_eq!(candidates[1].amount, 35.0);
        assert_eq!(candidates[1].description, "Uber");
    }

    #[test]
    fn test_single_line_multiple_markers() {
        let message = "Almoço R$ 45 e estacionamento R$ 12";
        assert!(looks_multiple(message));

        let candidates = split_on(message, today());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].amount, 45.0);
        assert_eq!(candidates[1].amount, 12.0);
    }

    #[test]
    fn test_sentence_split_fallback() {
        // A marker at the very start of the line leaves a single greedy
        // span, so the splitter falls through to sentence splitting.
        let message = "R$ 50 no mercado. R$ 60 na farmácia";
        assert!(looks_multiple(message));

        let candidates = split_on(message, today());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].description, "no mercado");
        assert_eq!(candidates[1].amount, 60.0);
    }

    #[test]
    fn test_invalid_lines_silently_dropped() {
        let message = "Mercado R$ 100\nsem valor nenhum\nUber R$ 35";
        let candidates = split_on(message, today());
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_all_invalid_yields_empty() {
        let message = "linha um\nlinha dois";
        assert!(looks_multiple(message));
        assert!(split_on(message, today()).is_empty());
    }

    #[test]
    fn test_conservative_when_not_multiple() {
        // When looks_multiple is false, split returns exactly what the
        // validator alone would produce.
        for message in ["Almoço com cliente R$ 50", "sem valor", ""] {
            let candidates = split_on(message, today());
            match validate(message, today()) {
                Ok(candidate) => assert_eq!(candidates, vec![candidate]),
                Err(_) => assert!(candidates.is_empty()),
            }
        }
    }
}
