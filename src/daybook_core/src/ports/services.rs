use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, password::Password, user::HashedPassword};

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Failed to hash password: {0}")]
    Hashing(String),
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// The hashing primitive. Stored hashes are only ever checked through
/// [`PasswordHasher::verify`].
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<HashedPassword, PasswordHashError>;

    /// `Ok(false)` means the candidate does not match.
    async fn verify(
        &self,
        candidate: &Password,
        hashed: &HashedPassword,
    ) -> Result<bool, PasswordHashError>;
}

/// Identity asserted by a federated provider after a successful exchange.
#[derive(Debug, Clone)]
pub struct FederatedProfile {
    pub email: Email,
    pub image: Option<String>,
}

#[derive(Debug, Error)]
pub enum FederatedIdentityError {
    #[error("Provider rejected the request: {0}")]
    Rejected(String),
    #[error("Provider did not return a verified email")]
    UnverifiedEmail,
    #[error("Provider request failed: {0}")]
    Transport(String),
    #[error("Invalid provider configuration: {0}")]
    Configuration(String),
}

/// An OAuth identity provider such as Google.
#[async_trait]
pub trait FederatedIdentityProvider: Send + Sync {
    /// Provider id used in routes, e.g. `"google"`.
    fn id(&self) -> &'static str;

    /// URL the browser is sent to, carrying the one-time `state`.
    fn authorization_url(&self, state: &str) -> Result<String, FederatedIdentityError>;

    /// Trade the authorization code for the user's profile.
    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, FederatedIdentityError>;
}
