use fake::{Fake, faker::internet::en::SafeEmail};
use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn register_returns_201_with_normalized_email() {
    let app = TestApp::new().await;

    let response = app.post_register("New.User@Example.com", PASSWORD).await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "email": "new.user@example.com" }));
}

#[tokio::test]
async fn register_twice_returns_409() {
    let app = TestApp::new().await;
    let email: String = SafeEmail().fake();

    assert_eq!(app.post_register(&email, PASSWORD).await.status(), 201);
    let response = app.post_register(&email, PASSWORD).await;

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn register_with_invalid_input_returns_field_errors() {
    let app = TestApp::new().await;

    let cases = [
        (json!({ "email": "not-an-email", "password": PASSWORD }), "email"),
        (json!({ "email": "a@b.com", "password": "short" }), "password"),
        (json!({ "email": "a@b.com", "password": "alllowercase1!" }), "password"),
        (json!({}), "email"),
    ];

    for (body, field) in cases {
        let response = app.post_json("/api/register", &body).await;
        assert_eq!(response.status(), 400, "{body}");

        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], "Invalid input");
        assert!(
            error["fields"][field].as_array().is_some_and(|m| !m.is_empty()),
            "expected {field} errors for {body}: {error}"
        );
    }
}

#[tokio::test]
async fn register_does_not_sign_the_user_in() {
    let app = TestApp::new().await;

    let response = app.post_register("fresh@example.com", PASSWORD).await;

    assert!(app.session_cookie(&response).is_none());
    assert_eq!(app.get_session().await["status"], "unauthenticated");
}

#[tokio::test]
async fn malformed_register_body_is_a_json_400() {
    let app = TestApp::new().await;

    for body in ["{\"email\": ", "{\"email\": 42}"] {
        let response = app.post_raw("/api/register", body).await;

        assert_eq!(response.status(), 400, "{body}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Malformed request body" }));
    }
}
