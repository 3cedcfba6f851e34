use daybook_core::{Email, FederatedIdentityError, FederatedIdentityProvider, FederatedProfile};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

pub const GOOGLE_PROVIDER_ID: &str = "google";
pub const GOOGLE_SCOPES: &str = "openid email profile";

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    /// Absolute URL of `/api/auth/callback/google` on this server.
    pub redirect_uri: String,
}

/// Google OAuth 2.0 authorization code flow.
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    http_client: Client,
    config: GoogleConfig,
}

impl GoogleProvider {
    pub fn new(config: GoogleConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait::async_trait]
impl FederatedIdentityProvider for GoogleProvider {
    fn id(&self) -> &'static str {
        GOOGLE_PROVIDER_ID
    }

    fn authorization_url(&self, state: &str) -> Result<String, FederatedIdentityError> {
        Url::parse_with_params(
            &self.config.authorization_endpoint,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", GOOGLE_SCOPES),
                ("state", state),
                ("prompt", "select_account"),
            ],
        )
        .map(String::from)
        .map_err(|e| FederatedIdentityError::Configuration(e.to_string()))
    }

    #[tracing::instrument(name = "Exchanging Google authorization code", skip_all)]
    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, FederatedIdentityError> {
        let token_request = TokenRequest {
            code,
            client_id: &self.config.client_id,
            client_secret: self.config.client_secret.expose_secret(),
            redirect_uri: &self.config.redirect_uri,
            grant_type: "authorization_code",
        };

        let token: TokenResponse = self
            .http_client
            .post(&self.config.token_endpoint)
            .form(&token_request)
            .send()
            .await
            .map_err(|e| FederatedIdentityError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| FederatedIdentityError::Rejected(e.to_string()))?
            .json()
            .await
            .map_err(|e| FederatedIdentityError::Rejected(e.to_string()))?;

        let user_info: UserInfo = self
            .http_client
            .get(&self.config.userinfo_endpoint)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| FederatedIdentityError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| FederatedIdentityError::Rejected(e.to_string()))?
            .json()
            .await
            .map_err(|e| FederatedIdentityError::Rejected(e.to_string()))?;

        user_info.into_profile()
    }
}

#[derive(serde::Serialize, Debug)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    email: Option<String>,
    email_verified: Option<bool>,
    picture: Option<String>,
}

impl UserInfo {
    fn into_profile(self) -> Result<FederatedProfile, FederatedIdentityError> {
        if self.email_verified == Some(false) {
            return Err(FederatedIdentityError::UnverifiedEmail);
        }
        let email = self
            .email
            .ok_or(FederatedIdentityError::UnverifiedEmail)
            .and_then(|email| {
                Email::try_from(Secret::new(email))
                    .map_err(|e| FederatedIdentityError::Rejected(e.to_string()))
            })?;

        Ok(FederatedProfile {
            email,
            image: self.picture,
        })
    }
}
