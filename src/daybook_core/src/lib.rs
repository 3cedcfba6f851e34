pub mod domain;
pub mod http_abstraction;
pub mod http_authentication_scheme;
pub mod paths;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    credentials::{Credentials, CredentialsCandidate, FieldErrors},
    email::Email,
    navigation::{NAV_ITEMS, NavItem, Navbar},
    password::{Password, PasswordPolicy, PasswordRule},
    session::{SessionState, SessionStatus, SessionUser},
    user::{HashedPassword, User, UserError},
};

pub use ports::{
    repositories::{RevokedSessionStore, RevokedSessionStoreError, UserStore, UserStoreError},
    services::{
        FederatedIdentityError, FederatedIdentityProvider, FederatedProfile, PasswordHashError,
        PasswordHasher,
    },
};

pub use strategies::{
    auth_validator::AuthValidator,
    authenticator::{
        AuthenticationScheme, FederatedSignin, SupportsCredentialCheck, SupportsFederatedSignin,
        SupportsRegistration, SupportsTokenRevocation,
    },
};

pub use http_abstraction::{AuthRequest, AuthResponseBuilder, AuthResponseHelpers};
pub use http_authentication_scheme::HttpAuthenticationScheme;
