//! Ledger
//!
//! Append-only record sink keyed by the user's ledger handle. In
//! production this fronts an external spreadsheet; here the in-memory
//! variant keeps per-handle vectors, which the tests also read back.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use finia_core::{LedgerEntry, LedgerHandle};

use crate::PersistenceError;

/// Append-only transaction ledger
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn append_record(
        &self,
        handle: &LedgerHandle,
        entry: &LedgerEntry,
    ) -> Result<(), PersistenceError>;
}

/// In-memory ledger
#[derive(Default)]
pub struct InMemoryLedger {
    records: RwLock<HashMap<LedgerHandle, Vec<LedgerEntry>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the entries recorded under a handle.
    pub fn entries(&self, handle: &str) -> Vec<LedgerEntry> {
        self.records.read().get(handle).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn append_record(
        &self,
        handle: &LedgerHandle,
        entry: &LedgerEntry,
    ) -> Result<(), PersistenceError> {
        self.records.write().entry(handle.clone()).or_default().push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finia_core::{BusinessContext, Nature};
    use uuid::Uuid;

    fn entry(description: &str, amount: f64) -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
            description: description.to_string(),
            amount,
            nature: Nature::Expense,
            business_context: BusinessContext::Personal,
            category: "Alimentação".into(),
            origin: "mercado".into(),
        }
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let ledger = InMemoryLedger::new();
        let handle = "sheet-1".to_string();

        ledger.append_record(&handle, &entry("Mercado", 100.0)).await.unwrap();
        ledger.append_record(&handle, &entry("Uber", 35.0)).await.unwrap();

        let entries = ledger.entries(&handle);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "Mercado");
        assert_eq!(entries[1].description, "Uber");
    }

    #[tokio::test]
    async fn test_handles_are_isolated() {
        let ledger = InMemoryLedger::new();
        ledger.append_record(&"a".to_string(), &entry("Mercado", 100.0)).await.unwrap();

        assert_eq!(ledger.entries("a").len(), 1);
        assert!(ledger.entries("b").is_empty());
    }
}
