use async_trait::async_trait;
use axum_extra::extract::CookieJar;
use daybook_core::{AuthValidator, RevokedSessionStore, SessionState};

use super::jwt::{SessionClaims, SessionConfig, TokenAuthError, validate_session_token};

/// Recognises session cookies issued by [`crate::SessionScheme`].
#[derive(Clone)]
pub struct JwtSessionValidator<B> {
    revoked_sessions: B,
    config: SessionConfig,
}

impl<B> JwtSessionValidator<B> {
    pub fn new(revoked_sessions: B, config: SessionConfig) -> Self {
        Self {
            revoked_sessions,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl<B: RevokedSessionStore> JwtSessionValidator<B> {
    pub async fn validate_token(&self, token: &str) -> Result<SessionClaims, TokenAuthError> {
        validate_session_token(token, &self.revoked_sessions, &self.config).await
    }
}

#[async_trait]
impl<B: RevokedSessionStore + Clone + 'static> AuthValidator for JwtSessionValidator<B> {
    type Claims = SessionClaims;
    type RequestParts = http::request::Parts;
    type Error = TokenAuthError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&self.config.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or(TokenAuthError::MissingToken)?;

        self.validate_token(&token).await
    }

    fn session_state(&self, claims: &Self::Claims) -> SessionState {
        claims.session_state()
    }
}
