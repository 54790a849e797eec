//! Core types for the Finia bookkeeping assistant
//!
//! This crate provides the foundational types shared across all other
//! crates:
//! - Transaction candidates and classifications
//! - User profiles
//! - Persisted conversation state (tagged by topic and step)
//! - Error types

pub mod error;
pub mod state;
pub mod transaction;
pub mod user;

pub use error::{Error, Result};
pub use state::{ConversationStep, OnboardingStep, StateRecord, Topic};
pub use transaction::{
    BusinessContext, Candidate, Classification, ContextHint, FailureKind, LedgerEntry, Nature,
    Outcome,
};
pub use user::{LedgerHandle, ProfileKind, UserId, UserProfile};
