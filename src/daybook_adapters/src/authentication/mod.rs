pub mod session_scheme;

pub use session_scheme::{SessionAuthError, SessionScheme, SessionToken};
