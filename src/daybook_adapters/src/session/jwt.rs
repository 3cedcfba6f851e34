use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use daybook_core::{Email, RevokedSessionStore, SessionState, SessionUser};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "daybook.session-token";
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secret: Secret<String>,
    pub ttl_seconds: i64,
    /// Adds the `Secure` attribute; off for plain-http local runs.
    pub secure_cookie: bool,
}

impl SessionConfig {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            secret,
            ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            secure_cookie: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),
    #[error("Token has been revoked")]
    TokenIsRevoked,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub exp: usize,
}

impl SessionClaims {
    /// Expiry as an RFC 3339 timestamp, the form session consumers receive.
    pub fn expires(&self) -> Option<String> {
        let exp = i64::try_from(self.exp).ok()?;
        DateTime::<Utc>::from_timestamp(exp, 0).map(|at| at.to_rfc3339())
    }

    pub fn session_state(&self) -> SessionState {
        SessionState::Authenticated {
            user: SessionUser {
                email: self.sub.clone(),
                image: self.image.clone(),
            },
            expires: self.expires(),
        }
    }
}

/// Cookie carrying a freshly issued session token. Lifetime is bounded by
/// the token's `exp` claim.
pub fn create_session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookie)
        .same_site(SameSite::Lax)
        .build()
}

pub fn create_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build((config.cookie_name.clone(), String::new()))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookie)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}

pub fn generate_session_token(
    email: &Email,
    image: Option<&str>,
    config: &SessionConfig,
) -> Result<String, TokenAuthError> {
    let delta = chrono::Duration::try_seconds(config.ttl_seconds).ok_or(
        TokenAuthError::UnexpectedError("Failed to create session duration".to_string()),
    )?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(TokenAuthError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp
        .try_into()
        .map_err(|_| TokenAuthError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = SessionClaims {
        sub: email.as_ref().expose_secret().clone(),
        image: image.map(str::to_string),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.as_bytes()),
    )
    .map_err(TokenAuthError::TokenError)
}

/// Check signature and expiry, then consult the revoked-session store.
pub async fn validate_session_token<B>(
    token: &str,
    revoked_sessions: &B,
    config: &SessionConfig,
) -> Result<SessionClaims, TokenAuthError>
where
    B: RevokedSessionStore + ?Sized,
{
    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)?;

    let is_revoked = revoked_sessions
        .is_revoked(token)
        .await
        .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))?;

    if is_revoked {
        return Err(TokenAuthError::TokenIsRevoked);
    }

    Ok(claims)
}
