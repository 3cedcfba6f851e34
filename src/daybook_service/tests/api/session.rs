use reqwest::Client;
use serde_json::Value;

use crate::helpers::TestApp;

#[tokio::test]
async fn session_without_cookie_is_unauthenticated() {
    let app = TestApp::new().await;

    let response = app.get("/api/auth/session").await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "unauthenticated");
}

#[tokio::test]
async fn session_after_signin_reports_the_user() {
    let app = TestApp::new().await;
    let email = app.signed_in_user().await;

    let body = app.get_session().await;

    assert_eq!(body["status"], "authenticated");
    assert_eq!(body["user"]["email"], email);
    assert!(body["expires"].is_string());
}

#[tokio::test]
async fn session_with_forged_cookie_is_unauthenticated() {
    let app = TestApp::new().await;

    let body: Value = Client::new()
        .get(app.url("/api/auth/session"))
        .header("cookie", format!("{}=not-a-jwt", app.cookie_name))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "unauthenticated");
}
