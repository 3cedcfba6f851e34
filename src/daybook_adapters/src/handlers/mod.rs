//! Framework-agnostic authentication handlers.
//!
//! Framework routes extract the request data, call these handlers with a
//! response builder, and return whatever the builder produces.

pub mod federated;
pub mod register;
pub mod session;
pub mod signin;
pub mod signout;

pub use federated::{FederatedCallback, handle_federated_callback, handle_federated_signin};
pub use register::handle_register;
pub use session::handle_session;
pub use signin::{credentials_failure, handle_credentials_callback, handle_signin_check};
pub use signout::handle_signout;
