use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, user::User};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence for user records.
///
/// Email uniqueness is the store's responsibility: `add_user` must fail with
/// `UserAlreadyExists` rather than overwrite.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError>;
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError>;
    /// Create the user on first federated signin, otherwise refresh its image.
    async fn upsert_federated_user(
        &self,
        email: &Email,
        image: Option<String>,
    ) -> Result<User, UserStoreError>;
}

// RevokedSessionStore port trait and errors
#[derive(Debug, Error)]
pub enum RevokedSessionStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Session tokens that were signed out before they expired.
///
/// `expires_at` is the token's own `exp` (Unix seconds); an entry is only
/// needed until then, since an expired token is rejected anyway.
#[async_trait]
pub trait RevokedSessionStore: Send + Sync {
    async fn revoke(&self, token: String, expires_at: u64)
    -> Result<(), RevokedSessionStoreError>;
    async fn is_revoked(&self, token: &str) -> Result<bool, RevokedSessionStoreError>;
}
