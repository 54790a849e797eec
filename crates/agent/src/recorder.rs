//! Transaction recorder
//!
//! Appends finalized classifications to the user's ledger and formats
//! the confirmation reply. A failed append propagates; it never reports
//! "saved" without the persistence call succeeding.

use std::sync::Arc;

use finia_core::{Candidate, Classification, Error, LedgerEntry, Result, UserProfile};
use finia_persistence::Ledger;

use crate::replies;

#[derive(Clone)]
pub struct Recorder {
    ledger: Arc<dyn Ledger>,
}

impl Recorder {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }

    /// Record one transaction and return the confirmation reply.
    pub async fn record(
        &self,
        classification: &Classification,
        candidate: &Candidate,
        user: &UserProfile,
    ) -> Result<String> {
        let entry = LedgerEntry::new(classification, candidate);
        self.ledger
            .append_record(&user.ledger_handle, &entry)
            .await
            .map_err(Error::from)?;

        tracing::info!(
            user_id = user.id,
            amount = candidate.amount,
            nature = classification.nature.as_str(),
            context = classification.business_context.as_str(),
            category = %classification.category,
            "transaction recorded"
        );

        Ok(replies::recorded(classification, candidate, user.profile_kind))
    }

    /// Record a batch from a multi-transaction message and return the
    /// summary reply. A failure before anything is saved propagates; a
    /// mid-batch failure reports exactly which entries were saved, so a
    /// resend does not duplicate them.
    pub async fn record_batch(
        &self,
        items: &[(Classification, Candidate)],
        user: &UserProfile,
    ) -> Result<String> {
        let mut saved = Vec::with_capacity(items.len());
        for (classification, candidate) in items {
            let entry = LedgerEntry::new(classification, candidate);
            if let Err(e) = self.ledger.append_record(&user.ledger_handle, &entry).await {
                if saved.is_empty() {
                    return Err(Error::from(e));
                }
                tracing::warn!(
                    user_id = user.id,
                    saved = saved.len(),
                    total = items.len(),
                    error = %e,
                    "batch append failed midway"
                );
                return Ok(replies::batch_partial(&saved, items.len()));
            }
            saved.push(entry);
        }

        tracing::info!(user_id = user.id, count = saved.len(), "batch recorded");
        Ok(replies::batch_summary(&saved))
    }
}
