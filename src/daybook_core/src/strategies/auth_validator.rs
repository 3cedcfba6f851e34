use async_trait::async_trait;

use crate::domain::session::SessionState;

/// Recognises the session carried by an incoming request.
///
/// Validators receive request parts (headers, method, URI) rather than the
/// whole request, which keeps non-`Sync` bodies out of the picture.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// Data extracted from a valid session token.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts: Sync;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Fails when the token is missing, malformed, expired or revoked.
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;

    /// Map claims to the read-only state handed to session consumers.
    fn session_state(&self, claims: &Self::Claims) -> SessionState;

    /// Resolve the session for a request; any failure reads as signed out.
    async fn resolve_session(&self, parts: &Self::RequestParts) -> SessionState {
        match self.validate(parts).await {
            Ok(claims) => self.session_state(&claims),
            Err(_) => SessionState::Unauthenticated,
        }
    }
}
