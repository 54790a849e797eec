//! Core error type

use thiserror::Error;

/// Errors shared across the Finia crates
#[derive(Error, Debug)]
pub enum Error {
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Corrupted conversation state: {0}")]
    CorruptedState(String),
}

pub type Result<T> = std::result::Result<T, Error>;
