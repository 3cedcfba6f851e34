use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use daybook_adapters::{
    AuthApiError,
    handlers::{self, FederatedCallback},
};
use daybook_core::{HttpAuthenticationScheme, SupportsFederatedSignin};
use serde::Deserialize;

use crate::adapters::response_builder;

#[derive(Debug, Default, Deserialize)]
pub struct FederatedSigninQuery {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

#[tracing::instrument(name = "Federated signin", skip(scheme, query))]
pub async fn federated_signin<S>(
    State(scheme): State<S>,
    Path(provider): Path<String>,
    Query(query): Query<FederatedSigninQuery>,
) -> Result<Response, AuthApiError>
where
    S: SupportsFederatedSignin,
    AuthApiError: From<S::FederatedError>,
{
    handlers::handle_federated_signin(
        &scheme,
        &provider,
        query.callback_url.as_deref(),
        response_builder(),
    )
    .await
}

#[tracing::instrument(name = "Federated callback route", skip_all)]
pub async fn federated_callback<S>(
    State(scheme): State<S>,
    Path(provider): Path<String>,
    Query(query): Query<FederatedCallback>,
) -> Response
where
    S: SupportsFederatedSignin + HttpAuthenticationScheme,
{
    handlers::handle_federated_callback(&scheme, &provider, query, response_builder()).await
}
