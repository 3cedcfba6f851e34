use daybook_core::{
    AuthResponseBuilder, AuthResponseHelpers, CredentialsCandidate, HttpAuthenticationScheme,
    SupportsCredentialCheck, paths::sanitize_callback_url,
};
use secrecy::ExposeSecret;

use crate::http::AuthApiError;

/// Stateless credential check: answers 200 with the email as a JSON string
/// and never establishes a session.
pub async fn handle_signin_check<S, B>(
    scheme: &S,
    candidate: CredentialsCandidate,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: SupportsCredentialCheck,
    B: AuthResponseBuilder,
    AuthApiError: From<S::CheckError>,
{
    let email = scheme.check_credentials(candidate).await?;

    Ok(builder.ok_json(serde_json::Value::String(
        email.as_ref().expose_secret().clone(),
    )))
}

/// Credential signin without redirect.
///
/// Always answers with `{ok, ...}` so the form can show inline errors:
/// `{ok: true, url}` plus the session cookie on success, otherwise
/// `{ok: false, error, fields?}` with the matching status.
#[tracing::instrument(name = "Credentials signin", skip_all)]
pub async fn handle_credentials_callback<S, B>(
    scheme: &S,
    candidate: CredentialsCandidate,
    callback_url: Option<&str>,
    builder: B,
) -> B::Response
where
    S: HttpAuthenticationScheme<Credentials = CredentialsCandidate>,
    B: AuthResponseBuilder,
    AuthApiError: From<S::AuthError>,
{
    match scheme.sign_in(candidate).await {
        Ok(token) => {
            let url = sanitize_callback_url(callback_url);
            scheme.create_signin_response(builder, token, &url)
        }
        Err(error) => credentials_failure(&AuthApiError::from(error), builder),
    }
}

/// `{ok: false, error, fields?}` with the error's status.
pub fn credentials_failure<B: AuthResponseBuilder>(error: &AuthApiError, builder: B) -> B::Response {
    let body = error.to_error_response();

    let mut json = serde_json::json!({ "ok": false, "error": body.error });
    if let Some(fields) = body.fields {
        json["fields"] = serde_json::to_value(fields).unwrap_or_default();
    }

    builder
        .status(error.status_code().as_u16())
        .json_body(json)
        .build()
}
