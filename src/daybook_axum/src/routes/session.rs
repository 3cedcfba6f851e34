use axum::{extract::State, http::request::Parts, response::Response};
use daybook_adapters::{AuthApiError, handlers};
use daybook_core::{AuthValidator, AuthenticationScheme};

use crate::adapters::response_builder;

#[tracing::instrument(name = "Session", skip_all)]
pub async fn session<S>(State(scheme): State<S>, parts: Parts) -> Result<Response, AuthApiError>
where
    S: AuthenticationScheme,
    S::Validator: AuthValidator<RequestParts = Parts>,
{
    handlers::handle_session(&scheme, &parts, response_builder()).await
}
