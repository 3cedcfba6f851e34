use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use chrono::Utc;
use daybook_core::{RevokedSessionStore, RevokedSessionStoreError};

/// Revoked tokens with their expiry. Expired entries are dropped on every
/// revoke, so the map never holds more than the sessions still alive.
#[derive(Debug, Default, Clone)]
pub struct HashMapRevokedSessionStore {
    revoked: Arc<RwLock<HashMap<String, u64>>>,
}

impl HashMapRevokedSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.revoked.read().await.is_empty()
    }
}

fn now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

#[async_trait::async_trait]
impl RevokedSessionStore for HashMapRevokedSessionStore {
    async fn revoke(&self, token: String, expires_at: u64) -> Result<(), RevokedSessionStoreError> {
        let now = now();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        if expires_at > now {
            revoked.insert(token, expires_at);
        }
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevokedSessionStoreError> {
        Ok(self.revoked.read().await.contains_key(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_an_hour() -> u64 {
        now() + 3600
    }

    #[tokio::test]
    async fn test_revoked_token_is_reported() {
        let store = HashMapRevokedSessionStore::new();
        store.revoke("token1".to_string(), in_an_hour()).await.unwrap();
        assert!(store.is_revoked("token1").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_revoked() {
        let store = HashMapRevokedSessionStore::new();
        assert!(!store.is_revoked("token2").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = HashMapRevokedSessionStore::new();
        let clone = store.clone();
        clone.revoke("shared".to_string(), in_an_hour()).await.unwrap();
        assert!(store.is_revoked("shared").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_entries_are_pruned_on_revoke() {
        let store = HashMapRevokedSessionStore::new();
        store
            .revoke("old".to_string(), in_an_hour())
            .await
            .unwrap();
        store
            .revoked
            .write()
            .await
            .insert("stale".to_string(), now() - 1);

        store.revoke("new".to_string(), in_an_hour()).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(!store.is_revoked("stale").await.unwrap());
    }

    #[tokio::test]
    async fn test_already_expired_token_is_not_stored() {
        let store = HashMapRevokedSessionStore::new();
        store.revoke("gone".to_string(), now() - 1).await.unwrap();
        assert!(store.is_empty().await);
    }
}
