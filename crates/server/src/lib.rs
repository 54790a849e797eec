//! HTTP server for the Finia assistant
//!
//! Exposes the Twilio WhatsApp webhook and a health check.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
