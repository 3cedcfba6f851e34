use axum::{Json, extract::State, extract::rejection::JsonRejection, response::Response};
use axum_extra::extract::WithRejection;
use daybook_adapters::{AuthApiError, handlers};
use daybook_core::{CredentialsCandidate, HttpAuthenticationScheme, SupportsCredentialCheck};
use serde::Deserialize;

use crate::adapters::response_builder;

/// Body of the provider credential endpoint: the credentials plus where to
/// go afterwards.
#[derive(Debug, Deserialize)]
pub struct CredentialsSigninRequest {
    #[serde(flatten)]
    pub credentials: CredentialsCandidate,
    #[serde(default, rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

#[tracing::instrument(name = "Signin check", skip_all)]
pub async fn signin_check<S>(
    State(scheme): State<S>,
    WithRejection(Json(candidate), _): WithRejection<Json<CredentialsCandidate>, AuthApiError>,
) -> Result<Response, AuthApiError>
where
    S: SupportsCredentialCheck,
    AuthApiError: From<S::CheckError>,
{
    handlers::handle_signin_check(&scheme, candidate, response_builder()).await
}

#[tracing::instrument(name = "Credentials callback", skip_all)]
pub async fn credentials_callback<S>(
    State(scheme): State<S>,
    payload: Result<Json<CredentialsSigninRequest>, JsonRejection>,
) -> Response
where
    S: HttpAuthenticationScheme<Credentials = CredentialsCandidate>,
    AuthApiError: From<S::AuthError>,
{
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            let error = <AuthApiError as From<JsonRejection>>::from(rejection);
            return handlers::credentials_failure(&error, response_builder());
        }
    };

    handlers::handle_credentials_callback(
        &scheme,
        request.credentials,
        request.callback_url.as_deref(),
        response_builder(),
    )
    .await
}
