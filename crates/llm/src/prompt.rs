//! Prompt assembly for the transaction classifier
//!
//! One unified prompt classifies nature, business context, category and
//! origin in a single call. The category sets and the allowed contexts
//! are scoped to the user's profile so the model cannot answer outside
//! the profile's vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

use finia_config::Vocabulary;
use finia_core::{BusinessContext, Candidate, ProfileKind};
use finia_parse::format_date;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Build the classification prompt for one candidate.
pub fn classification_prompt(
    candidate: &Candidate,
    profile: ProfileKind,
    vocabulary: &Vocabulary,
) -> Vec<Message> {
    let context_rules = if profile.has_business_context() {
        format!(
            "O usuário é MEI (pessoa jurídica individual) e mistura transações \
             do negócio com as pessoais.\n\
             - \"business_context\": \"BUSINESS\" quando a transação é do negócio \
             (clientes, fornecedores, notas fiscais), \"PERSONAL\" caso contrário.\n\
             - Categorias de contexto BUSINESS: {}.\n\
             - Categorias de contexto PERSONAL: {}.",
            vocabulary.category_names(profile, BusinessContext::Business),
            vocabulary.category_names(profile, BusinessContext::Personal),
        )
    } else {
        format!(
            "O usuário tem apenas finanças pessoais.\n\
             - \"business_context\" deve ser sempre \"PERSONAL\".\n\
             - Categorias permitidas: {}.",
            vocabulary.category_names(profile, BusinessContext::Personal),
        )
    };

    let system = format!(
        "Você é o classificador de transações de um assistente de contabilidade \
         por WhatsApp, especializado em português brasileiro.\n\n\
         Classifique a transação informada e responda com APENAS um objeto JSON, \
         sem texto adicional, no formato:\n\
         {{\"nature\": \"EXPENSE\" | \"INCOME\", \
         \"business_context\": \"BUSINESS\" | \"PERSONAL\", \
         \"category\": \"<uma das categorias permitidas>\", \
         \"origin\": \"<contraparte ou contexto, ou \\\"não especificada\\\">\", \
         \"confidence\": <número entre 0 e 1>}}\n\n\
         Regras:\n\
         - \"nature\": \"INCOME\" quando o dinheiro entra (recebimento, venda, \
         salário, pix recebido), \"EXPENSE\" quando sai.\n\
         {}\n\
         - \"confidence\" reflete sua certeza global sobre a classificação.",
        context_rules,
    );

    let user = format!(
        "Mensagem original: {}\nDescrição: {}\nValor: R$ {:.2}\nData: {}",
        candidate.raw_text,
        candidate.description,
        candidate.amount,
        format_date(candidate.date),
    );

    vec![Message::system(system), Message::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate() -> Candidate {
        Candidate {
            raw_text: "Almoço com cliente R$ 50".into(),
            description: "Almoço com cliente".into(),
            amount: 50.0,
            date: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
        }
    }

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Almoço R$ 50");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.role.to_string(), "user");
    }

    #[test]
    fn test_personal_prompt_pins_context() {
        let messages =
            classification_prompt(&candidate(), ProfileKind::Personal, &Vocabulary::default());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("sempre \"PERSONAL\""));
        assert!(messages[0].content.contains("Alimentação"));
        assert!(!messages[0].content.contains("Marketing"));
    }

    #[test]
    fn test_business_prompt_carries_both_category_sets() {
        let messages = classification_prompt(
            &candidate(),
            ProfileKind::BusinessIndividual,
            &Vocabulary::default(),
        );

        assert!(messages[0].content.contains("Marketing"));
        assert!(messages[0].content.contains("Alimentação PF"));
    }

    #[test]
    fn test_user_message_carries_candidate_fields() {
        let messages =
            classification_prompt(&candidate(), ProfileKind::Personal, &Vocabulary::default());

        let user = &messages[1].content;
        assert!(user.contains("Almoço com cliente R$ 50"));
        assert!(user.contains("R$ 50.00"));
        assert!(user.contains("12/04/2025"));
    }
}
