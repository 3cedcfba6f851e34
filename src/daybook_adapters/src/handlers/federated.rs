use daybook_core::{
    AuthResponseBuilder, AuthResponseHelpers, HttpAuthenticationScheme, SupportsFederatedSignin,
    paths,
};
use serde::Deserialize;

use crate::http::AuthApiError;

/// Where failed federated signins land.
pub const OAUTH_ERROR_REDIRECT: &str = "/api/auth/signin?error=OAuthCallback";

/// Query string of the provider's redirect back to us.
#[derive(Debug, Default, Deserialize)]
pub struct FederatedCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Send the browser to the provider's authorization page.
pub async fn handle_federated_signin<S, B>(
    scheme: &S,
    provider: &str,
    callback_url: Option<&str>,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: SupportsFederatedSignin,
    B: AuthResponseBuilder,
    AuthApiError: From<S::FederatedError>,
{
    let authorization_url = scheme.begin_federated_signin(provider, callback_url).await?;
    Ok(builder.see_other(&authorization_url))
}

/// Finish the flow. Every failure redirects to the signin page with
/// `error=OAuthCallback` rather than surfacing a raw error.
#[tracing::instrument(name = "Federated callback", skip(scheme, query, builder))]
pub async fn handle_federated_callback<S, B>(
    scheme: &S,
    provider: &str,
    query: FederatedCallback,
    builder: B,
) -> B::Response
where
    S: SupportsFederatedSignin + HttpAuthenticationScheme,
    B: AuthResponseBuilder,
{
    if let Some(error) = query.error.as_deref() {
        tracing::warn!(%error, "provider returned an error");
        return builder.see_other(OAUTH_ERROR_REDIRECT);
    }

    let (Some(code), Some(state)) = (query.code.as_deref(), query.state.as_deref()) else {
        tracing::warn!("callback without code or state");
        return builder.see_other(OAUTH_ERROR_REDIRECT);
    };

    match scheme.complete_federated_signin(provider, code, state).await {
        Ok(signin) => {
            let location = paths::sanitize_callback_url(Some(&signin.callback_url));
            scheme.create_signin_redirect(builder, signin.token, &location)
        }
        Err(error) => {
            tracing::warn!(%error, "federated signin failed");
            builder.see_other(OAUTH_ERROR_REDIRECT)
        }
    }
}
