//! Keyword/context detection
//!
//! Fast heuristic classifier over the configured vocabulary. Serves as a
//! pre-filter and as the fallback tier below the AI classifier, so false
//! positives/negatives are acceptable here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use finia_config::Vocabulary;
use finia_core::{ContextHint, ProfileKind};

/// Structural patterns that indicate money coming in even without an
/// income keyword: an amount followed by a receipt verb, a counterparty
/// before an amount, or a pix mention alongside an amount.
static INCOME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)r\$\s*\d+(?:[.,]\d+)?\s*(recebido|recebida|pago|caiu|entrou)").unwrap(),
        Regex::new(r"(?i)(cliente|empresa)\s+\S+.*r\$\s*\d+").unwrap(),
        Regex::new(r"(?i)pix\b.*r\$\s*\d+").unwrap(),
    ]
});

/// Heuristic income and business-context detector
#[derive(Clone)]
pub struct KeywordDetector {
    vocabulary: Arc<Vocabulary>,
}

impl KeywordDetector {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Whether the message reads as income for this profile.
    ///
    /// Case-insensitive substring match against the profile-scoped income
    /// vocabulary, plus the structural patterns.
    pub fn is_income(&self, text: &str, profile: ProfileKind) -> bool {
        let lower = text.to_lowercase();

        if self
            .vocabulary
            .income_keywords(profile)
            .iter()
            .any(|keyword| lower.contains(keyword))
        {
            return true;
        }

        INCOME_PATTERNS.iter().any(|pattern| pattern.is_match(&lower))
    }

    /// Guess the business/personal context by counting keyword hits;
    /// ties are inconclusive.
    pub fn detect_context(&self, text: &str) -> ContextHint {
        let lower = text.to_lowercase();

        let business_hits = self
            .vocabulary
            .business_keywords
            .iter()
            .filter(|keyword| lower.contains(keyword.as_str()))
            .count();
        let personal_hits = self
            .vocabulary
            .personal_keywords
            .iter()
            .filter(|keyword| lower.contains(keyword.as_str()))
            .count();

        if business_hits > personal_hits {
            ContextHint::Business
        } else if personal_hits > business_hits {
            ContextHint::Personal
        } else {
            ContextHint::Unknown
        }
    }
}
