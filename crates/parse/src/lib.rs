//! Natural-language transaction parsing for the Finia assistant
//!
//! Pure, total functions that turn free-text messages into structured
//! transaction candidates, plus the heuristic keyword/context detector
//! used below the AI classifier. Locale-fixed to the Brazilian
//! `DD/MM/YYYY` convention with comma-decimal `R$` currency.

pub mod amount;
pub mod date;
pub mod detector;
pub mod splitter;
pub mod validator;

pub use amount::extract_amount;
pub use date::{extract_date, extract_date_on, format_date};
pub use detector::KeywordDetector;
pub use splitter::{looks_multiple, split, split_on};
pub use validator::{validate, validate_on, ValidationError};
