//! Conversation agent for the Finia assistant
//!
//! Components:
//! - `ConversationFlow` — the per-message state machine (confirmation,
//!   correction, fresh transactions, restart keyword)
//! - `OnboardingFlow` — the first-contact step sequence
//! - `Recorder` — ledger writes plus confirmation copy
//! - `replies` — all user-facing pt-BR templates

pub mod flow;
mod input;
pub mod onboarding;
pub mod recorder;
pub mod replies;

pub use flow::ConversationFlow;
pub use onboarding::OnboardingFlow;
pub use recorder::Recorder;
