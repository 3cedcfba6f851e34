pub mod google;
pub mod pending_states;

pub use google::{GoogleConfig, GoogleProvider};
pub use pending_states::{OAuthError, PendingStates};
