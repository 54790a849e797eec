//! Persisted conversation state
//!
//! One state row lives per `(user, topic)` pair and survives across
//! independent webhook calls. Payloads are tagged unions keyed by step
//! name, so an unrecognized tag decodes to a handled `CorruptedState`
//! error instead of a silent fallthrough.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::transaction::{BusinessContext, Candidate, Classification, Nature};

/// Namespace for persisted conversation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Conversation,
    Onboarding,
}

impl Topic {
    /// Stable name used as the storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Onboarding => "onboarding",
        }
    }
}

/// Steps of the conversation topic (confirmation/correction sub-flow).
///
/// `Idle` is implicit: no stored row means no pending interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ConversationStep {
    /// A low-confidence classification is pending user yes/no
    AwaitingConfirmation {
        classification: Classification,
        candidate: Candidate,
    },
    /// User rejected the classification; waiting for a numbered
    /// nature/context choice
    AwaitingCorrectionType { candidate: Candidate },
    /// Nature/context chosen; waiting for a category pick or free text
    AwaitingCorrectionCategory {
        candidate: Candidate,
        nature: Nature,
        business_context: BusinessContext,
    },
}

/// Steps of the onboarding topic, carrying answers accumulated so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum OnboardingStep {
    /// Waiting for the user's preferred name
    PreferredName,
    /// Waiting for an example of how the user notes an expense
    ExpenseExample { name: String },
    /// Waiting for an example of how the user notes an income
    IncomeExample { name: String, expense_example: String },
    /// Waiting for confirmation of the suggested category set
    CategoryConfirmation {
        name: String,
        expense_example: String,
        income_example: String,
    },
    /// Waiting for the learning-mode choice (automatic vs always confirm)
    LearningMode { name: String },
}

/// A persisted state row, as returned by the state store.
///
/// The payload stays JSON-shaped at this level; each flow decodes it into
/// its own step enum and treats decode failure as corrupted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub topic: Topic,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StateRecord {
    /// Decode the payload as a conversation step.
    pub fn decode_conversation(&self) -> Result<ConversationStep, Error> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| Error::CorruptedState(e.to_string()))
    }

    /// Decode the payload as an onboarding step.
    pub fn decode_onboarding(&self) -> Result<OnboardingStep, Error> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| Error::CorruptedState(e.to_string()))
    }
}
