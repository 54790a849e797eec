//! Transaction classifier
//!
//! Drives the chat backend with the unified classification prompt and
//! decodes the JSON reply. Total by construction: any backend or decode
//! failure degrades to a keyword-detector best effort carrying a
//! `Failed` outcome, so the conversation flow always gets a
//! classification to work with.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use finia_config::Vocabulary;
use finia_core::{
    BusinessContext, Candidate, Classification, FailureKind, Nature, Outcome, ProfileKind,
};
use finia_parse::KeywordDetector;

use crate::backend::ChatBackend;
use crate::prompt::classification_prompt;
use crate::LlmError;

/// Counterparty after an origin preposition, e.g. "do cliente ABC"
static ORIGIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:de|do|da|dos|das|para|no|na|em|com)\s+(.+)$").unwrap());

/// Classifies parsed candidates via the chat backend
pub struct TransactionClassifier {
    backend: Arc<dyn ChatBackend>,
    vocabulary: Arc<Vocabulary>,
    detector: KeywordDetector,
    confidence_threshold: f32,
}

impl TransactionClassifier {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        vocabulary: Arc<Vocabulary>,
        confidence_threshold: f32,
    ) -> Self {
        let detector = KeywordDetector::new(vocabulary.clone());
        Self { backend, vocabulary, detector, confidence_threshold }
    }

    /// Classify one candidate. Never fails: backend and decode errors
    /// yield a keyword-based classification with a `Failed` outcome.
    pub async fn classify(&self, candidate: &Candidate, profile: ProfileKind) -> Classification {
        let messages = classification_prompt(candidate, profile, &self.vocabulary);

        let raw = match self.backend.complete(&messages).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(model = self.backend.model_name(), error = %e, "classifier call failed");
                return self.fallback(candidate, profile, FailureKind::ApiError);
            }
        };

        match parse_clean_json(&raw) {
            Ok(parsed) => self.finalize(parsed, profile),
            Err(e) => {
                tracing::warn!(error = %e, reply = %raw, "classifier reply not decodable");
                self.fallback(candidate, profile, FailureKind::ParseError)
            }
        }
    }

    /// Apply profile constraints and route by confidence.
    fn finalize(&self, parsed: RawClassification, profile: ProfileKind) -> Classification {
        let business_context = if profile.has_business_context() {
            parsed.business_context
        } else {
            BusinessContext::Personal
        };

        let confidence = parsed.confidence.clamp(0.0, 1.0);
        let outcome = if confidence > self.confidence_threshold {
            Outcome::Resolved
        } else {
            Outcome::LowConfidence
        };

        let category = if parsed.category.trim().is_empty() {
            self.default_category(profile, business_context, parsed.nature)
        } else {
            parsed.category
        };
        let origin = if parsed.origin.trim().is_empty() {
            Classification::UNSPECIFIED_ORIGIN.to_string()
        } else {
            parsed.origin
        };

        Classification {
            nature: parsed.nature,
            business_context,
            category,
            origin,
            confidence,
            outcome,
        }
    }

    /// Keyword-detector best effort used when the backend cannot answer.
    fn fallback(
        &self,
        candidate: &Candidate,
        profile: ProfileKind,
        kind: FailureKind,
    ) -> Classification {
        let nature = if self.detector.is_income(&candidate.raw_text, profile) {
            Nature::Income
        } else {
            Nature::Expense
        };

        let business_context = if profile.has_business_context() {
            self.detector
                .detect_context(&candidate.raw_text)
                .resolve()
                .unwrap_or(BusinessContext::Personal)
        } else {
            BusinessContext::Personal
        };

        let origin = ORIGIN_PATTERN
            .captures(&candidate.description)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| Classification::UNSPECIFIED_ORIGIN.to_string());

        Classification {
            nature,
            business_context,
            category: self.default_category(profile, business_context, nature),
            origin,
            confidence: 0.0,
            outcome: Outcome::Failed { kind },
        }
    }

    fn default_category(
        &self,
        profile: ProfileKind,
        context: BusinessContext,
        nature: Nature,
    ) -> String {
        self.vocabulary
            .categories_for(profile, context, nature)
            .last()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Outros".to_string())
    }
}

/// What the model is asked to return
#[derive(Debug, Deserialize)]
struct RawClassification {
    nature: Nature,
    business_context: BusinessContext,
    #[serde(default)]
    category: String,
    #[serde(default)]
    origin: String,
    #[serde(default)]
    confidence: f32,
}

/// Decode a model reply that may be wrapped in markdown fences or
/// surrounded by prose. Takes the outermost `{...}` slice.
fn parse_clean_json(raw: &str) -> Result<RawClassification, LlmError> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let start = cleaned
        .find('{')
        .ok_or_else(|| LlmError::InvalidResponse("no JSON object in reply".to_string()))?;
    let end = cleaned
        .rfind('}')
        .ok_or_else(|| LlmError::InvalidResponse("unterminated JSON object".to_string()))?;
    if end < start {
        return Err(LlmError::InvalidResponse("malformed JSON object".to_string()));
    }

    serde_json::from_str(&cleaned[start..=end])
        .map_err(|e| LlmError::InvalidResponse(e.to_string()))
}
