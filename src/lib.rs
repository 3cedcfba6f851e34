//! # Daybook
//!
//! Facade over the daybook crates: account registration, credential and
//! Google signin, cookie sessions, and the client-side form controllers.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Credentials`, `SessionState`, `Navbar`
//! - **Ports**: `UserStore`, `RevokedSessionStore`, `PasswordHasher`, `FederatedIdentityProvider`
//! - **Use cases**: `RegisterUseCase`, `VerifyCredentialsUseCase`, `FederatedSigninUseCase`
//! - **Adapters**: stores, `Argon2Hasher`, `GoogleProvider`, `SessionScheme`, settings
//! - **Service**: `AppService`, the axum application
//! - **Client**: `RegisterForm`, `SigninForm`, `SessionConsumer`, `HttpAuthClient`

// ============================================================================
// Core Domain Types
// ============================================================================

pub mod core {
    pub use daybook_core::*;
}

pub use daybook_core::{
    Credentials, CredentialsCandidate, Email, FieldErrors, NAV_ITEMS, NavItem, Navbar, Password,
    PasswordPolicy, SessionState, SessionUser, User, UserError, paths,
};

// ============================================================================
// Ports
// ============================================================================

pub use daybook_core::{
    FederatedIdentityProvider, PasswordHasher, RevokedSessionStore, RevokedSessionStoreError,
    UserStore, UserStoreError,
};

// ============================================================================
// Use Cases
// ============================================================================

pub mod use_cases {
    pub use daybook_application::*;
}

pub use daybook_application::{FederatedSigninUseCase, RegisterUseCase, VerifyCredentialsUseCase};

// ============================================================================
// Adapters
// ============================================================================

pub mod adapters {
    pub use daybook_adapters::*;
}

pub use daybook_adapters::{
    AppSettings, Argon2Hasher, AuthApiError, GoogleProvider, HashMapUserStore,
    HashMapRevokedSessionStore, PostgresUserStore, RedisRevokedSessionStore, SessionConfig,
    SessionScheme,
};

// ============================================================================
// Web
// ============================================================================

pub mod axum_routes {
    pub use daybook_axum::*;
}

pub use daybook_service::AppService;

// ============================================================================
// Client
// ============================================================================

pub mod client {
    pub use daybook_client::*;
}

pub use daybook_client::{HttpAuthClient, RegisterForm, SessionConsumer, SigninForm};

// Commonly needed alongside the re-exports above
pub use secrecy::{ExposeSecret, Secret};
