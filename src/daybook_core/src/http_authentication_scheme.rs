//! HTTP delivery of session tokens.
//!
//! `AuthenticationScheme` decides *whether* a user is signed in; this trait
//! decides how the resulting token travels: which cookie, which status code,
//! redirect or JSON.

use super::http_abstraction::{AuthRequest, AuthResponseBuilder};
use crate::AuthenticationScheme;

pub trait HttpAuthenticationScheme: AuthenticationScheme {
    /// JSON response for a credential signin made without automatic redirect.
    /// The body tells the caller where to navigate next.
    fn create_signin_response<B: AuthResponseBuilder>(
        &self,
        builder: B,
        token: Self::Token,
        callback_url: &str,
    ) -> B::Response;

    /// Redirect response that also carries the new session, used at the end
    /// of a federated flow.
    fn create_signin_redirect<B: AuthResponseBuilder>(
        &self,
        builder: B,
        token: Self::Token,
        location: &str,
    ) -> B::Response;

    /// Clear the session cookie. Redirects when `location` is given,
    /// otherwise answers with JSON.
    fn create_signout_response<B: AuthResponseBuilder>(
        &self,
        builder: B,
        location: Option<&str>,
    ) -> B::Response;

    fn extract_token_from_request<R: AuthRequest>(&self, req: &R) -> Option<Self::Token>;
}
