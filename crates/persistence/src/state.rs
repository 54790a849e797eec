//! Conversation state store
//!
//! One row per `(user, topic)`. `set_state` is an upsert that preserves
//! the original `created_at`; reads and writes are last-write-wins, there
//! is no per-user locking across webhook calls.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;

use finia_core::{StateRecord, Topic, UserId};

use crate::PersistenceError;

/// Persisted per-user, per-topic conversation state
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get_state(
        &self,
        user_id: UserId,
        topic: Topic,
    ) -> Result<Option<StateRecord>, PersistenceError>;

    async fn set_state(
        &self,
        user_id: UserId,
        topic: Topic,
        payload: Value,
    ) -> Result<(), PersistenceError>;

    /// Remove the row. Clearing absent state is a no-op.
    async fn clear_state(&self, user_id: UserId, topic: Topic) -> Result<(), PersistenceError>;
}

/// In-memory state store
#[derive(Default)]
pub struct InMemoryStateStore {
    rows: RwLock<HashMap<(UserId, Topic), StateRecord>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get_state(
        &self,
        user_id: UserId,
        topic: Topic,
    ) -> Result<Option<StateRecord>, PersistenceError> {
        Ok(self.rows.read().get(&(user_id, topic)).cloned())
    }

    async fn set_state(
        &self,
        user_id: UserId,
        topic: Topic,
        payload: Value,
    ) -> Result<(), PersistenceError> {
        let now = Utc::now();
        let mut rows = self.rows.write();

        let created_at = rows.get(&(user_id, topic)).map(|r| r.created_at).unwrap_or(now);
        rows.insert(
            (user_id, topic),
            StateRecord { topic, payload, created_at, updated_at: now },
        );
        Ok(())
    }

    async fn clear_state(&self, user_id: UserId, topic: Topic) -> Result<(), PersistenceError> {
        self.rows.write().remove(&(user_id, topic));
        Ok(())
    }
}
