use std::sync::Arc;

use chrono::Utc;
use daybook_core::{RevokedSessionStore, RevokedSessionStoreError};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

/// Revoked tokens only need to outlive their own expiry, so every key is
/// written with `SET EX` for the remaining lifetime.
#[derive(Clone)]
pub struct RedisRevokedSessionStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisRevokedSessionStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl RevokedSessionStore for RedisRevokedSessionStore {
    #[tracing::instrument(name = "Revoking session in Redis", skip_all)]
    async fn revoke(&self, token: String, expires_at: u64) -> Result<(), RevokedSessionStoreError> {
        let Some(ttl) = remaining_ttl(expires_at, Utc::now().timestamp()) else {
            return Ok(());
        };
        let key = get_key(&token);
        let mut conn = self.conn.write().await;
        conn.set_ex(key, true, ttl)
            .map_err(|e| RevokedSessionStoreError::DatabaseError(e.to_string()))
    }

    #[tracing::instrument(name = "Checking revoked session in Redis", skip_all)]
    async fn is_revoked(&self, token: &str) -> Result<bool, RevokedSessionStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        conn.exists(&key)
            .map_err(|e| RevokedSessionStoreError::DatabaseError(e.to_string()))
    }
}

const REVOKED_SESSION_KEY_PREFIX: &str = "revoked_session:";

fn get_key(token: &str) -> String {
    format!("{REVOKED_SESSION_KEY_PREFIX}{token}")
}

/// Seconds left before `expires_at`, or `None` once it has passed.
fn remaining_ttl(expires_at: u64, now: i64) -> Option<u64> {
    let now = u64::try_from(now).unwrap_or_default();
    expires_at.checked_sub(now).filter(|ttl| *ttl > 0)
}
