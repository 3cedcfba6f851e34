use async_trait::async_trait;
use daybook_application::{
    FederatedSigninUseCase, RegisterError, RegisterUseCase, VerifyCredentialsError,
    VerifyCredentialsUseCase,
};
use daybook_core::{
    AuthRequest, AuthResponseBuilder, Credentials, CredentialsCandidate, Email,
    FederatedIdentityError, FederatedIdentityProvider, FederatedSignin, FieldErrors,
    HttpAuthenticationScheme, PasswordHashError, PasswordHasher, PasswordPolicy,
    RevokedSessionStore, RevokedSessionStoreError, User, UserStore, UserStoreError,
    paths::sanitize_callback_url,
    strategies::authenticator::{
        AuthenticationScheme, SupportsCredentialCheck, SupportsFederatedSignin,
        SupportsRegistration, SupportsTokenRevocation,
    },
};
use thiserror::Error;

use crate::{
    oauth::{GoogleProvider, OAuthError, PendingStates},
    session::{
        JwtSessionValidator, SessionConfig, TokenAuthError, create_removal_cookie,
        create_session_cookie, generate_session_token,
    },
};

// ============================================================================
// Session Scheme
// ============================================================================

/// Cookie-session authentication over a user store and a password hasher.
///
/// - registration with email/password
/// - credential signin issuing a JWT session cookie
/// - a stateless credential check that issues nothing
/// - optional federated signin through one OAuth provider
/// - signout by recording the token as revoked
#[derive(Clone)]
pub struct SessionScheme<U, H, B, P = GoogleProvider> {
    user_store: U,
    hasher: H,
    revoked_sessions: B,
    provider: Option<P>,
    pending_states: PendingStates,
    validator: JwtSessionValidator<B>,
    config: SessionConfig,
}

impl<U, H, B, P> SessionScheme<U, H, B, P>
where
    U: UserStore,
    H: PasswordHasher,
    B: RevokedSessionStore + Clone,
{
    pub fn new(user_store: U, hasher: H, revoked_sessions: B, config: SessionConfig) -> Self {
        let validator = JwtSessionValidator::new(revoked_sessions.clone(), config.clone());
        Self {
            user_store,
            hasher,
            revoked_sessions,
            provider: None,
            pending_states: PendingStates::default(),
            validator,
            config,
        }
    }

    pub fn with_provider(mut self, provider: P) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_pending_states(mut self, pending_states: PendingStates) -> Self {
        self.pending_states = pending_states;
        self
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    pub fn user_store(&self) -> &U {
        &self.user_store
    }

    fn issue_token(&self, user: &User) -> Result<SessionToken, SessionAuthError> {
        let token = generate_session_token(user.email(), user.image(), &self.config)?;
        Ok(SessionToken(token))
    }
}

impl<U, H, B, P> SessionScheme<U, H, B, P>
where
    P: FederatedIdentityProvider,
{
    fn provider(&self, id: &str) -> Result<&P, SessionAuthError> {
        self.provider
            .as_ref()
            .filter(|provider| provider.id() == id)
            .ok_or_else(|| SessionAuthError::UnknownProvider(id.to_string()))
    }
}

// ============================================================================
// HTTP Authentication Scheme
// ============================================================================

impl<U, H, B, P> HttpAuthenticationScheme for SessionScheme<U, H, B, P>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    B: RevokedSessionStore + Clone + 'static,
    P: FederatedIdentityProvider + Clone + 'static,
{
    fn create_signin_response<RB: AuthResponseBuilder>(
        &self,
        builder: RB,
        token: Self::Token,
        callback_url: &str,
    ) -> RB::Response {
        let cookie = create_session_cookie(token.into_string(), &self.config);

        builder
            .status(200)
            .cookie(&cookie.to_string())
            .json_body(serde_json::json!({
                "ok": true,
                "url": callback_url,
            }))
            .build()
    }

    fn create_signin_redirect<RB: AuthResponseBuilder>(
        &self,
        builder: RB,
        token: Self::Token,
        location: &str,
    ) -> RB::Response {
        let cookie = create_session_cookie(token.into_string(), &self.config);

        builder
            .status(303)
            .cookie(&cookie.to_string())
            .header("location", location)
            .build()
    }

    fn create_signout_response<RB: AuthResponseBuilder>(
        &self,
        builder: RB,
        location: Option<&str>,
    ) -> RB::Response {
        let builder = builder.cookie(&create_removal_cookie(&self.config).to_string());

        match location {
            Some(location) => builder.status(303).header("location", location).build(),
            None => builder
                .status(200)
                .json_body(serde_json::json!({ "ok": true }))
                .build(),
        }
    }

    fn extract_token_from_request<R: AuthRequest>(&self, req: &R) -> Option<Self::Token> {
        req.cookie(&self.config.cookie_name)
            .filter(|value| !value.is_empty())
            .map(|value| SessionToken(value.to_string()))
    }
}

// ============================================================================
// Core Trait: AuthenticationScheme
// ============================================================================

#[async_trait]
impl<U, H, B, P> AuthenticationScheme for SessionScheme<U, H, B, P>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    B: RevokedSessionStore + Clone + 'static,
    P: FederatedIdentityProvider + Clone + 'static,
{
    type Token = SessionToken;
    type Validator = JwtSessionValidator<B>;
    type Credentials = CredentialsCandidate;
    type AuthError = SessionAuthError;

    #[tracing::instrument(name = "SessionScheme::sign_in", skip_all)]
    async fn sign_in(&self, credentials: Self::Credentials) -> Result<Self::Token, Self::AuthError> {
        let credentials = Credentials::validate(credentials, PasswordPolicy::Complexity)?;

        let user = VerifyCredentialsUseCase::new(&self.user_store, &self.hasher)
            .execute(credentials.email(), credentials.password())
            .await?;

        self.issue_token(&user)
    }

    fn validator(&self) -> &Self::Validator {
        &self.validator
    }
}

// ============================================================================
// Optional Capability: Registration
// ============================================================================

#[async_trait]
impl<U, H, B, P> SupportsRegistration for SessionScheme<U, H, B, P>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    B: RevokedSessionStore + Clone + 'static,
    P: FederatedIdentityProvider + Clone + 'static,
{
    type RegistrationError = SessionAuthError;

    #[tracing::instrument(name = "SessionScheme::register", skip_all)]
    async fn register(&self, credentials: Credentials) -> Result<Email, Self::RegistrationError> {
        Ok(RegisterUseCase::new(&self.user_store, &self.hasher)
            .execute(credentials)
            .await?)
    }
}

// ============================================================================
// Optional Capability: Stateless credential check
// ============================================================================

#[async_trait]
impl<U, H, B, P> SupportsCredentialCheck for SessionScheme<U, H, B, P>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    B: RevokedSessionStore + Clone + 'static,
    P: FederatedIdentityProvider + Clone + 'static,
{
    type CheckError = SessionAuthError;

    #[tracing::instrument(name = "SessionScheme::check_credentials", skip_all)]
    async fn check_credentials(
        &self,
        candidate: CredentialsCandidate,
    ) -> Result<Email, Self::CheckError> {
        let credentials = Credentials::validate(candidate, PasswordPolicy::LengthOnly)?;

        let user = VerifyCredentialsUseCase::new(&self.user_store, &self.hasher)
            .execute(credentials.email(), credentials.password())
            .await?;

        Ok(user.email().clone())
    }
}

// ============================================================================
// Optional Capability: Federated signin
// ============================================================================

#[async_trait]
impl<U, H, B, P> SupportsFederatedSignin for SessionScheme<U, H, B, P>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    B: RevokedSessionStore + Clone + 'static,
    P: FederatedIdentityProvider + Clone + 'static,
{
    type FederatedError = SessionAuthError;

    fn federated_providers(&self) -> Vec<&'static str> {
        self.provider.iter().map(|provider| provider.id()).collect()
    }

    #[tracing::instrument(name = "SessionScheme::begin_federated_signin", skip(self))]
    async fn begin_federated_signin(
        &self,
        provider: &str,
        callback_url: Option<&str>,
    ) -> Result<String, Self::FederatedError> {
        let identity_provider = self.provider(provider)?;
        let state = self
            .pending_states
            .issue(provider, sanitize_callback_url(callback_url));

        Ok(identity_provider.authorization_url(&state)?)
    }

    #[tracing::instrument(name = "SessionScheme::complete_federated_signin", skip(self, code, state))]
    async fn complete_federated_signin(
        &self,
        provider: &str,
        code: &str,
        state: &str,
    ) -> Result<FederatedSignin<Self::Token>, Self::FederatedError> {
        let identity_provider = self.provider(provider)?;
        let callback_url = self.pending_states.consume(state, provider)?;

        let profile = identity_provider.exchange_code(code).await?;
        let user = FederatedSigninUseCase::new(&self.user_store)
            .execute(profile)
            .await?;

        Ok(FederatedSignin {
            token: self.issue_token(&user)?,
            callback_url,
        })
    }
}

// ============================================================================
// Optional Capability: Token Revocation
// ============================================================================

#[async_trait]
impl<U, H, B, P> SupportsTokenRevocation for SessionScheme<U, H, B, P>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    B: RevokedSessionStore + Clone + 'static,
    P: FederatedIdentityProvider + Clone + 'static,
{
    type RevocationError = SessionAuthError;

    #[tracing::instrument(name = "SessionScheme::revoke_token", skip_all)]
    async fn revoke_token(&self, token: &Self::Token) -> Result<(), Self::RevocationError> {
        // Only tokens we issued and that are still live get an entry.
        let claims = match self.validator.validate_token(token.as_str()).await {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Signout with an invalid session token, nothing to revoke");
                return Ok(());
            }
        };
        let expires_at = u64::try_from(claims.exp).unwrap_or_default();
        self.revoked_sessions
            .revoke(token.as_str().to_string(), expires_at)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Domain Types
// ============================================================================

/// Signed session token as carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        SessionToken(s)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum SessionAuthError {
    #[error("Invalid input: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),

    #[error("{0}")]
    PasswordHashError(#[from] PasswordHashError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenAuthError),

    #[error("Failed to revoke session: {0}")]
    RevokedSessionStoreError(#[from] RevokedSessionStoreError),

    #[error("Federated signin failed: {0}")]
    FederatedError(#[from] FederatedIdentityError),

    #[error("{0}")]
    OAuthStateError(#[from] OAuthError),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

impl From<RegisterError> for SessionAuthError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserStoreError(e) => e.into(),
            RegisterError::PasswordHashError(e) => e.into(),
        }
    }
}

impl From<VerifyCredentialsError> for SessionAuthError {
    fn from(error: VerifyCredentialsError) -> Self {
        match error {
            VerifyCredentialsError::InvalidCredentials => SessionAuthError::InvalidCredentials,
            VerifyCredentialsError::UserStoreError(e) => e.into(),
            VerifyCredentialsError::PasswordHashError(e) => e.into(),
        }
    }
}
