use daybook_adapters::{
    Argon2Hasher, GoogleConfig, GoogleProvider, HashMapUserStore, HashMapRevokedSessionStore,
    SessionConfig, SessionScheme, config::constants,
};
use daybook_service::AppService;
use fake::{Fake, faker::internet::en::SafeEmail};
use reqwest::{Client, Response, redirect};
use secrecy::Secret;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const PASSWORD: &str = "Abcd123!";

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub google_server: MockServer,
    pub cookie_name: String,
    pub revoked_sessions: HashMapRevokedSessionStore,
}

impl TestApp {
    pub async fn new() -> Self {
        let google_server = MockServer::start().await;

        let listener = tokio::net::TcpListener::bind(constants::test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let config = SessionConfig::new(Secret::new(constants::test::SESSION_SECRET.to_string()));
        let cookie_name = config.cookie_name.clone();

        let google = GoogleProvider::new(
            GoogleConfig {
                client_id: "test-client-id".to_string(),
                client_secret: Secret::new("test-client-secret".to_string()),
                authorization_endpoint: format!("{}/o/oauth2/v2/auth", google_server.uri()),
                token_endpoint: format!("{}/token", google_server.uri()),
                userinfo_endpoint: format!("{}/userinfo", google_server.uri()),
                redirect_uri: format!("{address}/api/auth/callback/google"),
            },
            Client::new(),
        );

        let revoked_sessions = HashMapRevokedSessionStore::new();
        let scheme = SessionScheme::new(
            HashMapUserStore::new(),
            Argon2Hasher::default(),
            revoked_sessions.clone(),
            config,
        )
        .with_provider(google);

        let app = AppService::new(scheme);
        tokio::spawn(app.run_standalone(listener, None));

        let http_client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            google_server,
            cookie_name,
            revoked_sessions,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.http_client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> Response {
        self.http_client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_register(&self, email: &str, password: &str) -> Response {
        self.post_json(
            "/api/register",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn post_credentials_signin(&self, email: &str, password: &str) -> Response {
        self.post_json(
            "/api/auth/callback/credentials",
            &json!({ "email": email, "password": password, "callbackUrl": "/tasks" }),
        )
        .await
    }

    pub async fn get_session(&self) -> Value {
        self.get("/api/auth/session").await.json().await.unwrap()
    }

    /// Register a fresh user and sign in, leaving the session cookie in the
    /// client's jar.
    pub async fn signed_in_user(&self) -> String {
        let email: String = SafeEmail().fake();
        assert_eq!(self.post_register(&email, PASSWORD).await.status(), 201);
        assert_eq!(
            self.post_credentials_signin(&email, PASSWORD).await.status(),
            200
        );
        email.to_lowercase()
    }

    /// The session cookie value from a response's `Set-Cookie` headers.
    pub fn session_cookie(&self, response: &Response) -> Option<String> {
        response
            .cookies()
            .find(|cookie| cookie.name() == self.cookie_name)
            .map(|cookie| cookie.value().to_string())
    }
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get("location")
        .expect("missing location header")
        .to_str()
        .unwrap()
        .to_string()
}
