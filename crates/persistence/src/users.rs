//! User directory
//!
//! Maps channel addresses (e.g. "whatsapp:+5511...") to user profiles.
//! First contact creates a fresh profile with onboarding pending.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use finia_core::{ProfileKind, UserProfile};

use crate::PersistenceError;

/// User profile lookup and updates, keyed by channel address
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_channel_address(
        &self,
        address: &str,
    ) -> Result<Option<UserProfile>, PersistenceError>;

    /// Find the profile for an address, creating a fresh one on first
    /// contact.
    async fn find_or_create(&self, address: &str) -> Result<UserProfile, PersistenceError>;

    /// Persist profile changes (display name, profile kind, onboarding
    /// flag). The profile is matched by its channel address.
    async fn update(&self, profile: &UserProfile) -> Result<(), PersistenceError>;
}

/// In-memory user directory
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserProfile>>,
    next_id: AtomicI64,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self { users: RwLock::new(HashMap::new()), next_id: AtomicI64::new(1) }
    }

    fn fresh_profile(&self, address: &str) -> UserProfile {
        UserProfile {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            phone_number: address.to_string(),
            display_name: None,
            profile_kind: ProfileKind::Personal,
            onboarding_complete: false,
            ledger_handle: Uuid::new_v4().to_string(),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_channel_address(
        &self,
        address: &str,
    ) -> Result<Option<UserProfile>, PersistenceError> {
        Ok(self.users.read().get(address).cloned())
    }

    async fn find_or_create(&self, address: &str) -> Result<UserProfile, PersistenceError> {
        if let Some(existing) = self.users.read().get(address) {
            return Ok(existing.clone());
        }

        let profile = self.fresh_profile(address);
        self.users.write().insert(address.to_string(), profile.clone());
        tracing::info!(user_id = profile.id, "new user created");
        Ok(profile)
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), PersistenceError> {
        let mut users = self.users.write();
        match users.get_mut(&profile.phone_number) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(())
            }
            None => Err(PersistenceError::NotFound(profile.phone_number.clone())),
        }
    }
}
