use async_trait::async_trait;
use daybook_core::{Credentials, FieldErrors, SessionState, paths};
use reqwest::{Client, StatusCode, Url};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// The server calls the forms and the session consumer make.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /api/register`
    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError>;

    /// `POST /api/auth/callback/credentials`. Returns the URL to continue to.
    async fn signin(
        &self,
        credentials: &Credentials,
        callback_url: &str,
    ) -> Result<String, ClientError>;

    /// `GET /api/auth/session`
    async fn session(&self) -> Result<SessionState, ClientError>;

    /// `POST /api/auth/signout`
    async fn signout(&self) -> Result<(), ClientError>;
}

/// [`AuthApi`] over HTTP. The session cookie lives in the reqwest cookie
/// store and is never read or written by this type.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    http_client: Client,
    base_url: Url,
}

impl HttpAuthClient {
    pub fn new(base_url: &str, http_client: Client) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Client with its own cookie store. Redirects are not followed so the
    /// credential endpoint's JSON answer reaches the caller.
    pub fn with_cookie_store(base_url: &str) -> Result<Self, ClientError> {
        let http_client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Self::new(base_url, http_client)
    }

    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "callbackUrl", skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
}

impl<'a> CredentialsBody<'a> {
    fn new(credentials: &'a Credentials, callback_url: Option<&'a str>) -> Self {
        Self {
            email: credentials.email().as_ref().expose_secret(),
            password: credentials.password().as_ref().expose_secret(),
            callback_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    fields: Option<FieldErrors>,
}

#[derive(Debug, Deserialize)]
struct SigninBody {
    ok: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    fields: Option<FieldErrors>,
}

/// Turn a non-success response into [`ClientError::Rejected`] when it carries
/// an error body, and an unexpected response otherwise.
async fn rejection(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) if status != StatusCode::INTERNAL_SERVER_ERROR => ClientError::Rejected {
            status: status.as_u16(),
            message: body.error,
            fields: body.fields,
        },
        _ => ClientError::UnexpectedResponse(format!("status {status}")),
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    #[tracing::instrument(name = "Registering", skip_all)]
    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let response = self
            .http_client
            .post(self.url(paths::REGISTER)?)
            .json(&CredentialsBody::new(credentials, None))
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(rejection(response).await)
    }

    #[tracing::instrument(name = "Signing in", skip_all)]
    async fn signin(
        &self,
        credentials: &Credentials,
        callback_url: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .http_client
            .post(self.url(paths::CREDENTIALS_CALLBACK)?)
            .json(&CredentialsBody::new(credentials, Some(callback_url)))
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ClientError::UnexpectedResponse(format!("status {status}")));
        }

        let body: SigninBody = response.json().await?;
        if body.ok {
            return Ok(paths::sanitize_callback_url(body.url.as_deref()));
        }

        Err(ClientError::Rejected {
            status: status.as_u16(),
            message: body.error.unwrap_or_default(),
            fields: body.fields,
        })
    }

    async fn session(&self) -> Result<SessionState, ClientError> {
        let state = self
            .http_client
            .get(self.url(paths::SESSION)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(state)
    }

    #[tracing::instrument(name = "Signing out", skip_all)]
    async fn signout(&self) -> Result<(), ClientError> {
        self.http_client
            .post(self.url(paths::SIGNOUT)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
