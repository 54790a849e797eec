//! HTTP endpoints
//!
//! The Twilio WhatsApp webhook plus a health check. The webhook always
//! answers 200 with a TwiML body; every failure becomes an apology
//! reply upstream, never an HTTP error, so Twilio does not retry or
//! surface an error to the sender.

use axum::{
    extract::{Form, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook/whatsapp", post(whatsapp_webhook))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Twilio webhook form payload. Twilio capitalizes its field names.
#[derive(Debug, Deserialize)]
pub struct TwilioInbound {
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "From", default)]
    pub from: String,
}

async fn whatsapp_webhook(
    State(state): State<AppState>,
    Form(inbound): Form<TwilioInbound>,
) -> impl IntoResponse {
    tracing::debug!(from = %inbound.from, "inbound message");
    let reply = state.flow.handle(&inbound.from, &inbound.body).await;
    ([(header::CONTENT_TYPE, "application/xml")], twiml(&reply))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Wrap a reply in a minimal TwiML `<Response><Message>` document.
fn twiml(reply: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        xml_escape(reply)
    )
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
