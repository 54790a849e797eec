//! LLM integration for transaction classification
//!
//! A thin chat-completion client plus the classifier that turns parsed
//! candidates into `Classification`s. The classifier is total: API and
//! parse failures degrade to a keyword-based best effort instead of
//! erroring out of the conversation flow.

pub mod backend;
pub mod classifier;
pub mod prompt;

pub use backend::{ChatBackend, LlmConfig, OpenAiBackend};
pub use classifier::TransactionClassifier;
pub use prompt::{classification_prompt, Message, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for finia_core::Error {
    fn from(err: LlmError) -> Self {
        finia_core::Error::Classifier(err.to_string())
    }
}
