use daybook_core::{
    AuthRequest, AuthResponseBuilder, HttpAuthenticationScheme, SupportsTokenRevocation,
};

use crate::http::AuthApiError;

/// Revoke the current session, if any, and clear the cookie.
///
/// `redirect_to` turns the response into a 303 redirect (browser `GET`);
/// without it the response is JSON.
#[tracing::instrument(name = "Signout", skip_all)]
pub async fn handle_signout<S, R, B>(
    scheme: &S,
    request: &R,
    redirect_to: Option<&str>,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: HttpAuthenticationScheme + SupportsTokenRevocation,
    R: AuthRequest,
    B: AuthResponseBuilder,
    AuthApiError: From<S::RevocationError>,
{
    match scheme.extract_token_from_request(request) {
        Some(token) => scheme.revoke_token(&token).await?,
        None => tracing::debug!("signout without a session"),
    }

    Ok(scheme.create_signout_response(builder, redirect_to))
}
