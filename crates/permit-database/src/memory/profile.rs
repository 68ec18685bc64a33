//! In-memory profile store with principal visibility tracking.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use permit_core::store::{StoreError, StoreResult};
use permit_core::types::PrincipalId;
use permit_entity::{Principal, Profile};

use crate::store::{PrincipalDirectory, ProfileStore};

/// Profiles keyed by id, with a set of principals visible to writes.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    principals: RwLock<HashSet<PrincipalId>>,
    profiles: RwLock<HashMap<PrincipalId, Profile>>,
}

impl MemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of profile rows.
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Whether the store holds no profiles.
    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl PrincipalDirectory for MemoryProfileStore {
    async fn register_principal(&self, principal: &Principal) -> StoreResult<()> {
        self.principals.write().await.insert(principal.id);
        debug!(principal_id = %principal.id, "Principal visible to profile store");
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn upsert(&self, profile: &Profile) -> StoreResult<Profile> {
        if !self.principals.read().await.contains(&profile.id) {
            return Err(StoreError::foreign_key(format!(
                "profiles.id {} is not present in principals",
                profile.id
            )));
        }

        let mut profiles = self.profiles.write().await;
        let mut row = profile.clone();
        if let Some(existing) = profiles.get(&profile.id) {
            row.created_at = existing.created_at;
        }
        profiles.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: PrincipalId) -> StoreResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }
}
