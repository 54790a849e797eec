//! Input validation
//!
//! Decides whether a message is a well-formed transaction and extracts
//! the structured candidate. Pure and total: any string input yields
//! either a candidate or a typed validation error, never a panic.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use finia_core::Candidate;

use crate::amount::extract_amount;
use crate::date::extract_date_on;

/// Currency-marker amount span, removed first when building the description
static MARKER_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)r\$\s*\d{1,4}(?:[.,]\d{3})*(?:[.,]\d{1,2})?").unwrap()
});

/// Date-like spans
static DATE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}[/\-]\d{1,2}(?:[/\-]\d{2,4})?").unwrap());

/// Remaining standalone numeric tokens
static NUMBER_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,4}(?:[.,]\d{3})*(?:[.,]\d{1,2})?").unwrap());

/// Why a message failed validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Mensagem vazia")]
    EmptyMessage,

    #[error("Valor monetário não encontrado. Por favor, inclua um valor com R$.")]
    AmountNotFound {
        /// The message as received, kept for the caller's error reply
        raw: String,
    },

    #[error("Descrição/nome não encontrado. Por favor, informe o que está registrando.")]
    DescriptionNotFound { amount: f64, date: NaiveDate },
}

/// Validate a message against the current local date.
pub fn validate(message: &str) -> Result<Candidate, ValidationError> {
    validate_on(message, Local::now().date_naive())
}

/// Validate a message against an explicit "today".
pub fn validate_on(message: &str, today: NaiveDate) -> Result<Candidate, ValidationError> {
    let normalized = message.trim();

    if normalized.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }

    let amount = extract_amount(normalized);
    if amount == 0.0 {
        return Err(ValidationError::AmountNotFound { raw: normalized.to_string() });
    }

    let date = extract_date_on(normalized, today);

    // Description is whatever survives stripping the amount span, date
    // spans and any leftover numeric tokens.
    let stripped = MARKER_SPAN.replace_all(normalized, " ");
    let stripped = DATE_SPAN.replace_all(&stripped, " ");
    let stripped = NUMBER_SPAN.replace_all(&stripped, " ");
    let description = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if description.is_empty() {
        return Err(ValidationError::DescriptionNotFound { amount, date });
    }

    Ok(Candidate {
        raw_text: normalized.to_string(),
        description,
        amount,
        date,
    })
}
