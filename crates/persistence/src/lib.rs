//! Persistence layer for the Finia assistant
//!
//! Provides storage for:
//! - User profiles (directory keyed by channel address)
//! - Conversation state (one row per user and topic)
//! - The transaction ledger
//!
//! Traits sit at the seams; the in-memory implementations back the
//! default deployment and the test suites.

pub mod error;
pub mod ledger;
pub mod state;
pub mod users;

pub use error::PersistenceError;
pub use ledger::{InMemoryLedger, Ledger};
pub use state::{InMemoryStateStore, StateStore};
pub use users::{InMemoryUserDirectory, UserDirectory};

use std::sync::Arc;

/// Combined persistence layer with all stores
#[derive(Clone)]
pub struct PersistenceLayer {
    pub users: Arc<dyn UserDirectory>,
    pub state: Arc<dyn StateStore>,
    pub ledger: Arc<dyn Ledger>,
}

impl PersistenceLayer {
    /// In-memory layer for development and tests.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserDirectory::new()),
            state: Arc::new(InMemoryStateStore::new()),
            ledger: Arc::new(InMemoryLedger::new()),
        }
    }
}
