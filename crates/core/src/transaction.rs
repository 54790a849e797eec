//! Transaction candidates, classifications and ledger entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Nature {
    Expense,
    Income,
}

impl Nature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "EXPENSE",
            Self::Income => "INCOME",
        }
    }
}

/// Whether a transaction belongs to the user's business activity or
/// personal life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessContext {
    Business,
    Personal,
}

impl BusinessContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "BUSINESS",
            Self::Personal => "PERSONAL",
        }
    }
}

/// Output of the keyword/context detector. Unlike [`BusinessContext`]
/// this can be inconclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContextHint {
    Business,
    Personal,
    Unknown,
}

impl ContextHint {
    /// Resolve the hint to a definite context, if any.
    pub fn resolve(self) -> Option<BusinessContext> {
        match self {
            Self::Business => Some(BusinessContext::Business),
            Self::Personal => Some(BusinessContext::Personal),
            Self::Unknown => None,
        }
    }
}

/// A parsed-but-unclassified transaction extracted from a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Original message segment this candidate was parsed from
    pub raw_text: String,
    /// Text remaining after stripping amount/date tokens
    pub description: String,
    /// Monetary amount, strictly positive for a valid candidate
    pub amount: f64,
    /// Transaction date, defaults to today when the message has none
    pub date: NaiveDate,
}

impl Candidate {
    /// A candidate is valid iff the amount is positive and a description
    /// survived token stripping.
    pub fn is_valid(&self) -> bool {
        self.amount > 0.0 && !self.description.trim().is_empty()
    }
}

/// Why a classification attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The model reply could not be decoded as JSON
    ParseError,
    /// The classifier API call itself failed (network, HTTP error, timeout)
    ApiError,
}

/// Routing outcome of a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Confidence above the resolution threshold; record directly
    Resolved,
    /// Confidence at or below the threshold; ask the user to confirm
    LowConfidence,
    /// Classifier error; the carried classification is a keyword-detector
    /// best effort
    Failed { kind: FailureKind },
}

/// Result of classifying a [`Candidate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub nature: Nature,
    pub business_context: BusinessContext,
    /// Free-form category, usually drawn from the profile's suggested set
    pub category: String,
    /// Counterparty or context, best effort
    pub origin: String,
    /// Confidence in [0, 1]
    pub confidence: f32,
    pub outcome: Outcome,
}

impl Classification {
    /// Default origin used when no counterparty could be extracted.
    pub const UNSPECIFIED_ORIGIN: &'static str = "não especificada";
}

/// A record appended to the user's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub nature: Nature,
    pub business_context: BusinessContext,
    pub category: String,
    pub origin: String,
}

impl LedgerEntry {
    /// Build a ledger entry from a finalized classification and candidate.
    pub fn new(classification: &Classification, candidate: &Candidate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: candidate.date,
            description: candidate.description.clone(),
            amount: candidate.amount,
            nature: classification.nature,
            business_context: classification.business_context,
            category: classification.category.clone(),
            origin: classification.origin.clone(),
        }
    }
}
