use daybook_core::{
    AuthResponseBuilder, AuthResponseHelpers, Credentials, CredentialsCandidate, PasswordPolicy,
    SupportsRegistration,
};
use secrecy::ExposeSecret;

use crate::http::AuthApiError;

/// Validate the candidate, then create the account.
///
/// Answers 201 `{"email": ...}`. Validation failures, duplicates and
/// unexpected errors come back as [`AuthApiError`].
pub async fn handle_register<S, B>(
    scheme: &S,
    candidate: CredentialsCandidate,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: SupportsRegistration,
    B: AuthResponseBuilder,
    AuthApiError: From<S::RegistrationError>,
{
    let credentials = Credentials::validate(candidate, PasswordPolicy::Complexity)?;

    let email = scheme.register(credentials).await?;

    Ok(builder.created_json(serde_json::json!({
        "email": email.as_ref().expose_secret(),
    })))
}
