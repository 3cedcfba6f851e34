use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn signin_check_accepts_registered_credentials_without_a_session() {
    let app = TestApp::new().await;
    app.post_register("check@example.com", PASSWORD).await;

    let response = app
        .post_json(
            "/api/signin",
            &json!({ "email": "check@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(response.status(), 200);
    assert!(app.session_cookie(&response).is_none());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!("check@example.com"));
}

#[tokio::test]
async fn signin_check_rejects_wrong_password_and_unknown_user_alike() {
    let app = TestApp::new().await;
    app.post_register("check@example.com", PASSWORD).await;

    for body in [
        json!({ "email": "check@example.com", "password": "Wrong123!" }),
        json!({ "email": "ghost@example.com", "password": PASSWORD }),
    ] {
        let response = app.post_json("/api/signin", &body).await;
        assert_eq!(response.status(), 401);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], "Invalid email or password");
    }
}

#[tokio::test]
async fn credentials_signin_sets_cookie_and_returns_callback_url() {
    let app = TestApp::new().await;
    app.post_register("signin@example.com", PASSWORD).await;

    let response = app
        .post_credentials_signin("signin@example.com", PASSWORD)
        .await;

    assert_eq!(response.status(), 200);
    assert!(app.session_cookie(&response).is_some());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "url": "/tasks" }));
}

#[tokio::test]
async fn credentials_signin_with_offsite_callback_goes_home() {
    let app = TestApp::new().await;
    app.post_register("signin@example.com", PASSWORD).await;

    let response = app
        .post_json(
            "/api/auth/callback/credentials",
            &json!({
                "email": "signin@example.com",
                "password": PASSWORD,
                "callbackUrl": "https://evil.example/steal",
            }),
        )
        .await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["url"], "/");
}

#[tokio::test]
async fn credentials_signin_failure_reports_error_without_cookie() {
    let app = TestApp::new().await;
    app.post_register("signin@example.com", PASSWORD).await;

    let response = app
        .post_credentials_signin("signin@example.com", "Wrong123!")
        .await;

    assert_eq!(response.status(), 401);
    assert!(app.session_cookie(&response).is_none());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn malformed_signin_bodies_answer_in_json() {
    let app = TestApp::new().await;

    let check = app.post_raw("/api/signin", "not json").await;
    assert_eq!(check.status(), 400);
    let body: Value = check.json().await.unwrap();
    assert_eq!(body["error"], "Malformed request body");

    let callback = app
        .post_raw("/api/auth/callback/credentials", "{\"email\": true}")
        .await;
    assert_eq!(callback.status(), 400);
    let body: Value = callback.json().await.unwrap();
    assert_eq!(body, json!({ "ok": false, "error": "Malformed request body" }));
}
