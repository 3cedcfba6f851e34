pub mod authentication;
pub mod config;
pub mod handlers;
pub mod hashing;
pub mod http;
pub mod oauth;
pub mod persistence;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use authentication::{SessionAuthError, SessionScheme, SessionToken};
pub use config::AppSettings;
pub use hashing::Argon2Hasher;
pub use http::{AuthApiError, ErrorResponse};
pub use oauth::{GoogleConfig, GoogleProvider, OAuthError, PendingStates};
pub use persistence::{
    HashMapUserStore, HashMapRevokedSessionStore, PostgresUserStore, RedisRevokedSessionStore,
};
pub use session::{JwtSessionValidator, SessionClaims, SessionConfig, TokenAuthError};
