use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    domain::{
        credentials::{Credentials, CredentialsCandidate},
        email::Email,
    },
    strategies::auth_validator::AuthValidator,
};

// ============================================================================
// Core Authentication Scheme Trait
// ============================================================================

/// How users sign in and how their sessions are recognised afterwards.
///
/// Every scheme signs users in with credentials; registration, federated
/// signin and revocation are separate capabilities below.
#[async_trait]
pub trait AuthenticationScheme: Send + Sync + Clone + 'static {
    /// Session token issued on signin (e.g. a JWT string).
    type Token: Clone + Send + Sync;

    /// Validator that recognises tokens issued by this scheme.
    type Validator: AuthValidator;

    /// Body accepted by the credential signin endpoint.
    type Credentials: for<'de> Deserialize<'de> + Send;

    type AuthError: std::error::Error + Send + Sync + 'static;

    /// Verify the credentials and issue a session token.
    async fn sign_in(&self, credentials: Self::Credentials) -> Result<Self::Token, Self::AuthError>;

    fn validator(&self) -> &Self::Validator;
}

// ============================================================================
// Optional Capability: Registration
// ============================================================================

#[async_trait]
pub trait SupportsRegistration: AuthenticationScheme {
    type RegistrationError: std::error::Error + Send + Sync + 'static;

    /// Create exactly one account for the credentials' email.
    async fn register(&self, credentials: Credentials) -> Result<Email, Self::RegistrationError>;
}

// ============================================================================
// Optional Capability: Stateless credential check
// ============================================================================

/// Verify credentials without establishing a session.
#[async_trait]
pub trait SupportsCredentialCheck: AuthenticationScheme {
    type CheckError: std::error::Error + Send + Sync + 'static;

    async fn check_credentials(
        &self,
        candidate: CredentialsCandidate,
    ) -> Result<Email, Self::CheckError>;
}

// ============================================================================
// Optional Capability: Federated signin (OAuth2)
// ============================================================================

/// Completed federated signin: the new session and where to send the user.
#[derive(Debug, Clone)]
pub struct FederatedSignin<T> {
    pub token: T,
    pub callback_url: String,
}

#[async_trait]
pub trait SupportsFederatedSignin: AuthenticationScheme {
    type FederatedError: std::error::Error + Send + Sync + 'static;

    /// Ids of the configured providers.
    fn federated_providers(&self) -> Vec<&'static str>;

    /// Start the flow; returns the provider's authorization URL.
    async fn begin_federated_signin(
        &self,
        provider: &str,
        callback_url: Option<&str>,
    ) -> Result<String, Self::FederatedError>;

    /// Finish the flow when the provider redirects back with `code` and `state`.
    async fn complete_federated_signin(
        &self,
        provider: &str,
        code: &str,
        state: &str,
    ) -> Result<FederatedSignin<Self::Token>, Self::FederatedError>;
}

// ============================================================================
// Optional Capability: Token Revocation
// ============================================================================

#[async_trait]
pub trait SupportsTokenRevocation: AuthenticationScheme {
    type RevocationError: std::error::Error + Send + Sync + 'static;

    /// Invalidate a token so it no longer yields a session.
    async fn revoke_token(&self, token: &Self::Token) -> Result<(), Self::RevocationError>;
}
