//! Reply templates
//!
//! All user-facing copy lives here, in Brazilian Portuguese. The flow and
//! recorder only pick which template to send; they never format copy
//! inline.

use finia_config::Category;
use finia_core::{
    BusinessContext, Candidate, Classification, LedgerEntry, Nature, ProfileKind,
};
use finia_parse::{format_date, ValidationError};

/// Brazilian currency formatting: thousands dots, comma decimals.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();

    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

fn nature_label(nature: Nature) -> &'static str {
    match nature {
        Nature::Expense => "Gasto",
        Nature::Income => "Ganho",
    }
}

fn nature_icon(nature: Nature) -> &'static str {
    match nature {
        Nature::Expense => "💸",
        Nature::Income => "💰",
    }
}

/// Context suffix shown only to business profiles, which mix PJ and PF.
fn context_label(profile: ProfileKind, context: BusinessContext) -> &'static str {
    if !profile.has_business_context() {
        return "";
    }
    match context {
        BusinessContext::Business => " (PJ)",
        BusinessContext::Personal => " (PF)",
    }
}

/// Confirmation sent after a transaction is written to the ledger.
pub fn recorded(
    classification: &Classification,
    candidate: &Candidate,
    profile: ProfileKind,
) -> String {
    format!(
        "✅ Anotado!\n{} {}{}: {}\nValor: {}\nCategoria: {}\nData: {}",
        nature_icon(classification.nature),
        nature_label(classification.nature),
        context_label(profile, classification.business_context),
        candidate.description,
        format_amount(candidate.amount),
        classification.category,
        format_date(candidate.date),
    )
}

/// Summary for a multi-transaction message: count, total, up to five
/// itemized lines and an overflow note.
pub fn batch_summary(entries: &[LedgerEntry]) -> String {
    let total: f64 = entries.iter().map(|e| e.amount).sum();
    let mut reply = format!(
        "✅ Anotei {} transações (total {}):",
        entries.len(),
        format_amount(total)
    );

    for entry in entries.iter().take(5) {
        reply.push_str(&format!("\n• {} — {}", entry.description, format_amount(entry.amount)));
    }
    if entries.len() > 5 {
        reply.push_str(&format!("\n…e mais {}", entries.len() - 5));
    }

    reply
}

/// Honest report for a batch that failed midway: lists what was saved
/// so the user resends only the rest. Never claims nothing was lost.
pub fn batch_partial(saved: &[LedgerEntry], total: usize) -> String {
    let mut reply = format!("⚠️ Consegui anotar {} de {} transações:", saved.len(), total);

    for entry in saved.iter().take(5) {
        reply.push_str(&format!("\n• {} — {}", entry.description, format_amount(entry.amount)));
    }
    if saved.len() > 5 {
        reply.push_str(&format!("\n…e mais {}", saved.len() - 5));
    }

    reply.push_str("\n\nReenvie apenas as que ficaram de fora, por favor.");
    reply
}

/// Yes/no prompt for a low-confidence or fallback classification.
pub fn confirm_prompt(
    classification: &Classification,
    candidate: &Candidate,
    profile: ProfileKind,
) -> String {
    format!(
        "Só confirmando antes de anotar:\n{} {}{}: {} — {} em {}\nCategoria sugerida: {}\n\nEstá certo? Responda *sim* ou *não*.",
        nature_icon(classification.nature),
        nature_label(classification.nature),
        context_label(profile, classification.business_context),
        candidate.description,
        format_amount(candidate.amount),
        format_date(candidate.date),
        classification.category,
    )
}

pub fn confirm_reprompt() -> String {
    "Não entendi. 🙂 Responda *sim* para anotar ou *não* para corrigir.".to_string()
}

/// Numbered nature/context menu; personal profiles have no PJ/PF split.
pub fn correction_type_menu(profile: ProfileKind) -> String {
    if profile.has_business_context() {
        "Sem problemas! O que é essa transação?\n1 - Gasto do negócio (PJ)\n2 - Gasto pessoal (PF)\n3 - Ganho do negócio (PJ)\n4 - Ganho pessoal (PF)\n\nResponda com o número.".to_string()
    } else {
        "Sem problemas! O que é essa transação?\n1 - Gasto\n2 - Ganho\n\nResponda com o número.".to_string()
    }
}

/// Numbered category list plus the free-text escape hatch.
pub fn category_menu(categories: &[&Category]) -> String {
    let mut reply = String::from("Em qual categoria encaixo?");
    for (i, category) in categories.iter().enumerate() {
        reply.push_str(&format!("\n{} - {} {}", i + 1, category.icon, category.name));
    }
    reply.push_str("\n\nResponda com o número, ou digite o nome de outra categoria.");
    reply
}

/// Validation failure plus the documented message format.
pub fn error_help(error: &ValidationError) -> String {
    format!(
        "{}\n\nMe envie a descrição e o valor juntos. Por exemplo:\n• Almoço R$ 25\n• Uber R$ 18,50\n• Recebi R$ 200 do cliente João",
        error
    )
}

pub fn persistence_retry() -> String {
    "Não consegui salvar agora. 😕 Pode tentar de novo em instantes? Sua resposta não foi perdida.".to_string()
}

pub fn corrupted_state() -> String {
    "Opa, me perdi na nossa conversa. Vamos recomeçar: pode reenviar sua transação?".to_string()
}

// Onboarding copy

pub fn onboarding_welcome() -> String {
    "Oi! Eu sou a Finia, sua assistente de contabilidade aqui no WhatsApp. 🤗\n\nAntes de começar: como você prefere ser chamado(a)?".to_string()
}

pub fn onboarding_ask_expense_example(name: &str) -> String {
    format!(
        "Prazer, {}! 😊\nMe mostra como você anotaria um gasto do dia a dia? Por exemplo: \"Mercado R$ 150\"",
        name
    )
}

pub fn onboarding_ask_income_example() -> String {
    "Perfeito! E um ganho, como você anotaria? Por exemplo: \"Recebi R$ 500 do cliente João\"".to_string()
}

pub fn onboarding_category_confirmation(categories: &[Category]) -> String {
    let mut reply = String::from("Ótimo! Vou organizar suas transações nessas categorias:");
    for category in categories {
        reply.push_str(&format!("\n{} {}", category.icon, category.name));
    }
    reply.push_str("\n\nPosso usar essas? (sim/não)");
    reply
}

pub fn onboarding_learning_mode_menu(accepted_categories: bool) -> String {
    let prefix = if accepted_categories {
        "Combinado!"
    } else {
        "Sem problemas, dá para ajustar as categorias depois."
    };
    format!(
        "{} Última coisa: como prefere que eu anote?\n1 - Automático: só confirmo quando tiver dúvida\n2 - Sempre confirmar antes de anotar\n\nResponda com o número.",
        prefix
    )
}

pub fn onboarding_learning_mode_reprompt() -> String {
    "Responda *1* para o modo automático ou *2* para sempre confirmar. 🙂".to_string()
}

pub fn onboarding_complete(name: &str) -> String {
    format!(
        "Prontinho, {}! 🎉 Pode me mandar sua primeira transação. Por exemplo: \"Almoço R$ 25\"",
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finia_core::{FailureKind, Outcome};
    use uuid::Uuid;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(50.0), "R$ 50,00");
        assert_eq!(format_amount(230.5), "R$ 230,50");
        assert_eq!(format_amount(1234.56), "R$ 1.234,56");
        assert_eq!(format_amount(1000000.0), "R$ 1.000.000,00");
        assert_eq!(format_amount(7.5), "R$ 7,50");
    }

    fn entry(description: &str, amount: f64) -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
            description: description.to_string(),
            amount,
            nature: Nature::Expense,
            business_context: BusinessContext::Personal,
            category: "Outros".into(),
            origin: Classification::UNSPECIFIED_ORIGIN.into(),
        }
    }

    #[test]
    fn test_batch_summary_overflow() {
        let entries: Vec<LedgerEntry> =
            (0..7).map(|i| entry(&format!("item {}", i), 10.0)).collect();
        let summary = batch_summary(&entries);

        assert!(summary.contains("7 transações"));
        assert!(summary.contains("R$ 70,00"));
        assert!(summary.contains("item 4"));
        assert!(!summary.contains("item 5"));
        assert!(summary.contains("…e mais 2"));
    }

    #[test]
    fn test_batch_partial_names_saved_entries_only() {
        let saved = vec![entry("Mercado", 100.0)];
        let reply = batch_partial(&saved, 2);

        assert!(reply.contains("1 de 2"));
        assert!(reply.contains("Mercado"));
        assert!(reply.contains("Reenvie apenas as que ficaram de fora"));
        assert!(!reply.contains("não foi perdida"));
    }

    #[test]
    fn test_batch_summary_short() {
        let entries = vec![entry("Mercado", 100.0), entry("Uber", 35.0)];
        let summary = batch_summary(&entries);
        assert!(summary.contains("2 transações"));
        assert!(!summary.contains("…e mais"));
    }

    #[test]
    fn test_context_label_only_for_business_profile() {
        let classification = Classification {
            nature: Nature::Expense,
            business_context: BusinessContext::Business,
            category: "Alimentação PJ".into(),
            origin: "cliente".into(),
            confidence: 0.9,
            outcome: Outcome::Resolved,
        };
        let candidate = Candidate {
            raw_text: "Almoço com cliente R$ 50".into(),
            description: "Almoço com cliente".into(),
            amount: 50.0,
            date: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
        };

        let business = recorded(&classification, &candidate, ProfileKind::BusinessIndividual);
        assert!(business.contains("(PJ)"));

        let personal = recorded(&classification, &candidate, ProfileKind::Personal);
        assert!(!personal.contains("(PJ)"));
    }

    #[test]
    fn test_correction_menus_scale_with_profile() {
        let personal = correction_type_menu(ProfileKind::Personal);
        assert!(personal.contains("2 - Ganho"));
        assert!(!personal.contains("3 -"));

        let business = correction_type_menu(ProfileKind::BusinessIndividual);
        assert!(business.contains("4 - Ganho pessoal (PF)"));
    }

    #[test]
    fn test_error_help_includes_examples() {
        let help = error_help(&ValidationError::EmptyMessage);
        assert!(help.contains("Mensagem vazia"));
        assert!(help.contains("Almoço R$ 25"));
        assert!(help.contains("Recebi R$ 200 do cliente João"));
    }

    #[test]
    fn test_failure_kind_is_never_user_visible() {
        // Fallback classifications reuse the same confirmation template.
        let classification = Classification {
            nature: Nature::Expense,
            business_context: BusinessContext::Personal,
            category: "Outros".into(),
            origin: Classification::UNSPECIFIED_ORIGIN.into(),
            confidence: 0.0,
            outcome: Outcome::Failed { kind: FailureKind::ApiError },
        };
        let candidate = Candidate {
            raw_text: "Mercado R$ 100".into(),
            description: "Mercado".into(),
            amount: 100.0,
            date: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
        };

        let prompt = confirm_prompt(&classification, &candidate, ProfileKind::Personal);
        assert!(!prompt.contains("API"));
        assert!(!prompt.contains("erro"));
        assert!(prompt.contains("*sim*"));
    }
}
