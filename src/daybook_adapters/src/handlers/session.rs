use daybook_core::{AuthResponseBuilder, AuthResponseHelpers, AuthValidator, AuthenticationScheme};

use crate::http::AuthApiError;

type RequestParts<S> = <<S as AuthenticationScheme>::Validator as AuthValidator>::RequestParts;

/// Current session as `{"status": ...}`. Missing, invalid, expired and
/// revoked tokens all read as unauthenticated.
pub async fn handle_session<S, B>(
    scheme: &S,
    parts: &RequestParts<S>,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: AuthenticationScheme,
    B: AuthResponseBuilder,
{
    let state = scheme.validator().resolve_session(parts).await;
    let body =
        serde_json::to_value(state).map_err(|e| AuthApiError::UnexpectedError(e.to_string()))?;

    Ok(builder.ok_json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{handlers::test_support::RecordedResponse, test_helpers::test_scheme_with_user};
    use daybook_core::CredentialsCandidate;

    fn parts(cookie: Option<String>) -> http::request::Parts {
        let mut builder = http::Request::builder();
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_session_without_cookie_is_unauthenticated() {
        let scheme = test_scheme_with_user("a@b.com", "Abcd123!").await;
        let response = handle_session(&scheme, &parts(None), RecordedResponse::default())
            .await
            .unwrap();

        assert_eq!(
            response.body,
            Some(serde_json::json!({ "status": "unauthenticated" }))
        );
    }

    #[tokio::test]
    async fn test_session_with_cookie_is_authenticated() {
        let scheme = test_scheme_with_user("a@b.com", "Abcd123!").await;
        let token = scheme
            .sign_in(CredentialsCandidate::new("a@b.com", "Abcd123!"))
            .await
            .unwrap();
        let cookie = format!("daybook.session-token={}", token.as_str());

        let response = handle_session(&scheme, &parts(Some(cookie)), RecordedResponse::default())
            .await
            .unwrap();

        let body = response.body.unwrap();
        assert_eq!(body["status"], "authenticated");
        assert_eq!(body["user"]["email"], "a@b.com");
        assert!(body["expires"].is_string());
    }
}
