use reqwest::Url;
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{header, method, path},
};

use crate::helpers::{TestApp, location};

fn query_param(url: &str, key: &str) -> Option<String> {
    Url::parse(url)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

async fn mount_google(app: &TestApp, email: &str) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "google-access-token",
            "token_type": "Bearer",
        })))
        .expect(1)
        .mount(&app.google_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("authorization", "Bearer google-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": email,
            "email_verified": true,
            "picture": "https://lh3.example.com/avatar.png",
        })))
        .expect(1)
        .mount(&app.google_server)
        .await;
}

#[tokio::test]
async fn federated_signin_redirects_to_google_with_state() {
    let app = TestApp::new().await;

    let response = app.get("/api/auth/signin/google?callbackUrl=/notes").await;

    assert_eq!(response.status(), 303);
    let location = location(&response);
    assert!(location.starts_with(&app.google_server.uri()));
    assert_eq!(
        query_param(&location, "client_id").as_deref(),
        Some("test-client-id")
    );
    assert_eq!(
        query_param(&location, "redirect_uri"),
        Some(app.url("/api/auth/callback/google"))
    );
    assert!(query_param(&location, "state").is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn federated_signin_with_unknown_provider_is_404() {
    let app = TestApp::new().await;

    let response = app.get("/api/auth/signin/github").await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn federated_callback_signs_in_and_returns_to_callback_url() {
    let app = TestApp::new().await;
    mount_google(&app, "Google.User@Example.com").await;

    let begin = app.get("/api/auth/signin/google?callbackUrl=/notes").await;
    let state = query_param(&location(&begin), "state").unwrap();

    let response = app
        .get(&format!(
            "/api/auth/callback/google?code=auth-code&state={state}"
        ))
        .await;

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/notes");

    let session = app.get_session().await;
    assert_eq!(session["status"], "authenticated");
    assert_eq!(session["user"]["email"], "google.user@example.com");
    assert_eq!(
        session["user"]["image"],
        "https://lh3.example.com/avatar.png"
    );
}

#[tokio::test]
async fn federated_callback_with_forged_state_redirects_to_error_page() {
    let app = TestApp::new().await;

    let response = app
        .get("/api/auth/callback/google?code=auth-code&state=forged")
        .await;

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/api/auth/signin?error=OAuthCallback");
    assert_eq!(app.get_session().await["status"], "unauthenticated");
}

#[tokio::test]
async fn federated_state_is_single_use() {
    let app = TestApp::new().await;
    mount_google(&app, "once@example.com").await;

    let begin = app.get("/api/auth/signin/google").await;
    let state = query_param(&location(&begin), "state").unwrap();
    let callback = format!("/api/auth/callback/google?code=auth-code&state={state}");

    let first = app.get(&callback).await;
    let second = app.get(&callback).await;

    assert_eq!(location(&first), "/");
    assert_eq!(location(&second), "/api/auth/signin?error=OAuthCallback");
}

#[tokio::test]
async fn federated_callback_with_provider_error_redirects_to_error_page() {
    let app = TestApp::new().await;

    let response = app
        .get("/api/auth/callback/google?error=access_denied")
        .await;

    assert_eq!(location(&response), "/api/auth/signin?error=OAuthCallback");
}
