use axum::{extract::State, http::request::Parts, response::Response};
use daybook_adapters::{AuthApiError, handlers};
use daybook_core::{HttpAuthenticationScheme, SupportsTokenRevocation, paths};

use crate::adapters::{AxumRequest, response_builder};

/// `GET /api/auth/signout`: sign out and send the browser home.
#[tracing::instrument(name = "Signout redirect", skip_all)]
pub async fn signout_redirect<S>(
    State(scheme): State<S>,
    parts: Parts,
) -> Result<Response, AuthApiError>
where
    S: HttpAuthenticationScheme + SupportsTokenRevocation,
    AuthApiError: From<S::RevocationError>,
{
    let request = AxumRequest::from(parts);
    handlers::handle_signout(&scheme, &request, Some(paths::HOME), response_builder()).await
}

/// `POST /api/auth/signout`: sign out and answer with JSON.
#[tracing::instrument(name = "Signout", skip_all)]
pub async fn signout_json<S>(
    State(scheme): State<S>,
    parts: Parts,
) -> Result<Response, AuthApiError>
where
    S: HttpAuthenticationScheme + SupportsTokenRevocation,
    AuthApiError: From<S::RevocationError>,
{
    let request = AxumRequest::from(parts);
    handlers::handle_signout(&scheme, &request, None, response_builder()).await
}
