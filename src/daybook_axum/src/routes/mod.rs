//! Axum routes: extract request data, call the framework-agnostic
//! handler, return its response.

pub mod federated;
pub mod register;
pub mod session;
pub mod signin;
pub mod signout;

pub use federated::{federated_callback, federated_signin};
pub use register::register;
pub use session::session;
pub use signin::{credentials_callback, signin_check};
pub use signout::{signout_json, signout_redirect};
