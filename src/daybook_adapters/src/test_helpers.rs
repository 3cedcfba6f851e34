use async_trait::async_trait;
use daybook_core::{
    Credentials, CredentialsCandidate, Email, FederatedIdentityError, FederatedIdentityProvider,
    FederatedProfile, PasswordPolicy, SupportsRegistration,
};
use secrecy::Secret;

use crate::{
    authentication::SessionScheme,
    hashing::Argon2Hasher,
    persistence::{HashMapUserStore, HashMapRevokedSessionStore},
    session::SessionConfig,
};

/// Provider that accepts the code `good-code` for `g@example.com`.
#[derive(Clone)]
pub struct StubProvider;

#[async_trait]
impl FederatedIdentityProvider for StubProvider {
    fn id(&self) -> &'static str {
        "google"
    }

    fn authorization_url(&self, state: &str) -> Result<String, FederatedIdentityError> {
        Ok(format!("https://accounts.example.com/auth?state={state}"))
    }

    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, FederatedIdentityError> {
        if code != "good-code" {
            return Err(FederatedIdentityError::Rejected("bad code".into()));
        }
        Ok(FederatedProfile {
            email: Email::try_from(Secret::new("g@example.com".to_string())).unwrap(),
            image: Some("https://img/g".into()),
        })
    }
}

pub type TestScheme =
    SessionScheme<HashMapUserStore, Argon2Hasher, HashMapRevokedSessionStore, StubProvider>;

pub fn test_scheme() -> TestScheme {
    SessionScheme::new(
        HashMapUserStore::new(),
        Argon2Hasher::new(),
        HashMapRevokedSessionStore::new(),
        SessionConfig::new(Secret::new("test-secret".to_string())),
    )
    .with_provider(StubProvider)
}

pub async fn test_scheme_with_user(email: &str, password: &str) -> TestScheme {
    let scheme = test_scheme();
    let credentials = Credentials::validate(
        CredentialsCandidate::new(email, password),
        PasswordPolicy::Complexity,
    )
    .unwrap();
    scheme.register(credentials).await.unwrap();
    scheme
}
