use crate::helpers::TestApp;

#[tokio::test]
async fn home_page_shows_login_link_when_signed_out() {
    let app = TestApp::new().await;

    let response = app.get("/").await;

    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("href=\"/api/auth/signin\""));
    assert!(html.contains("Tasks"));
}

#[tokio::test]
async fn home_page_shows_user_menu_when_signed_in() {
    let app = TestApp::new().await;
    let email = app.signed_in_user().await;

    let html = app.get("/").await.text().await.unwrap();

    assert!(html.contains(&email));
    assert!(html.contains("href=\"/api/auth/signout\""));
}

#[tokio::test]
async fn signin_page_renders_google_button_and_error_banner() {
    let app = TestApp::new().await;

    let html = app
        .get("/api/auth/signin?error=OAuthCallback")
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("Sign in with Google"));
    assert!(html.contains("Could not sign in with Google"));
    assert!(html.contains("href=\"/register\""));
}

#[tokio::test]
async fn register_page_links_back_to_signin() {
    let app = TestApp::new().await;

    let html = app.get("/register").await.text().await.unwrap();

    assert!(html.contains("Create account"));
    assert!(html.contains("Signin here"));
    assert!(html.contains("href=\"/api/auth/signin\""));
}

#[tokio::test]
async fn signin_page_encodes_a_hostile_callback() {
    let app = TestApp::new().await;

    let html = app
        .get("/api/auth/signin?callbackUrl=%2F%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E")
        .await
        .text()
        .await
        .unwrap();

    assert!(!html.contains("<script>alert"));
    assert!(html.contains("href=\"/api/auth/signin/google?callbackUrl=%2F%2522%253E%253Cscript%253E"));
}

#[tokio::test]
async fn signin_page_drops_a_callback_with_control_characters() {
    let app = TestApp::new().await;

    let html = app
        .get("/api/auth/signin?callbackUrl=%2F%09%2Fevil.example")
        .await
        .text()
        .await
        .unwrap();

    assert!(html.contains("href=\"/api/auth/signin/google?callbackUrl=%2F\""));
    assert!(html.contains("data-callback=\"/\""));
    assert!(!html.contains("evil.example"));
}
