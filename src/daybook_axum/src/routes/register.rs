use axum::{Json, extract::State, response::Response};
use axum_extra::extract::WithRejection;
use daybook_adapters::{AuthApiError, handlers};
use daybook_core::{CredentialsCandidate, SupportsRegistration};

use crate::adapters::response_builder;

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S>(
    State(scheme): State<S>,
    WithRejection(Json(candidate), _): WithRejection<Json<CredentialsCandidate>, AuthApiError>,
) -> Result<Response, AuthApiError>
where
    S: SupportsRegistration,
    AuthApiError: From<S::RegistrationError>,
{
    handlers::handle_register(&scheme, candidate, response_builder()).await
}
