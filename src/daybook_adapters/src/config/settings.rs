use config::{Config, ConfigError, Environment, File};
use daybook_core::paths;
use secrecy::Secret;
use serde::{Deserialize, Deserializer};

use super::constants::{self, env};
use crate::{
    oauth::GoogleConfig,
    session::{
        SessionConfig,
        jwt::{DEFAULT_SESSION_COOKIE_NAME, DEFAULT_SESSION_TTL_SECONDS},
    },
};

/// Layered settings: built-in defaults, `config/base.json`,
/// `config/{APP_ENVIRONMENT}.json`, then `DAYBOOK__SECTION__KEY` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub application: ApplicationSettings,
    pub session: SessionSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub redis: RedisSettings,
    pub google: GoogleSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
    /// Externally visible origin, used to build OAuth redirect URIs.
    pub public_url: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub secret: Secret<String>,
    pub ttl_seconds: i64,
    #[serde(default)]
    pub secure_cookie: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    /// Absent means users live in memory.
    pub url: Option<Secret<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedisSettings {
    /// Absent means revoked sessions live in memory.
    pub host_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<Secret<String>>,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
}

/// Comma-separated list of origins allowed by CORS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for AllowedOrigins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(AllowedOrigins::parse(&raw))
    }
}

impl AppSettings {
    /// Load `.env`, then the layered sources for `APP_ENVIRONMENT`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| constants::DEFAULT_ENVIRONMENT.to_string());
        let config_dir = std::env::var(env::CONFIG_DIR_ENV_VAR)
            .unwrap_or_else(|_| constants::DEFAULT_CONFIG_DIR.to_string());

        Self::load_from(&config_dir, &environment)
    }

    pub fn load_from(config_dir: &str, environment: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("application.address", constants::prod::APP_ADDRESS)?
            .set_default("application.public_url", constants::prod::PUBLIC_URL)?
            .set_default("application.allowed_origins", "")?
            .set_default("session.cookie_name", DEFAULT_SESSION_COOKIE_NAME)?
            .set_default("session.ttl_seconds", DEFAULT_SESSION_TTL_SECONDS)?
            .set_default("session.secure_cookie", false)?
            .set_default(
                "google.authorization_endpoint",
                constants::google::AUTHORIZATION_ENDPOINT,
            )?
            .set_default("google.token_endpoint", constants::google::TOKEN_ENDPOINT)?
            .set_default(
                "google.userinfo_endpoint",
                constants::google::USERINFO_ENDPOINT,
            )?
            .add_source(File::with_name(&format!("{config_dir}/base")).required(false))
            .add_source(File::with_name(&format!("{config_dir}/{environment}")).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cookie_name: self.session.cookie_name.clone(),
            secret: self.session.secret.clone(),
            ttl_seconds: self.session.ttl_seconds,
            secure_cookie: self.session.secure_cookie,
        }
    }

    /// Google is enabled only when both client id and secret are set.
    pub fn google_config(&self) -> Option<GoogleConfig> {
        let google = &self.google;
        let (Some(client_id), Some(client_secret)) =
            (google.client_id.clone(), google.client_secret.clone())
        else {
            return None;
        };

        Some(GoogleConfig {
            client_id,
            client_secret,
            authorization_endpoint: google.authorization_endpoint.clone(),
            token_endpoint: google.token_endpoint.clone(),
            userinfo_endpoint: google.userinfo_endpoint.clone(),
            redirect_uri: format!(
                "{}{}",
                self.application.public_url.trim_end_matches('/'),
                paths::federated_callback("google")
            ),
        })
    }
}
