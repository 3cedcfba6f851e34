//! Client-side controllers for the daybook auth flows.
//!
//! Forms validate locally first and only then talk to the server through an
//! [`AuthApi`]. [`HttpAuthClient`] is the reqwest implementation; it keeps the
//! session cookie in its own cookie store.

pub mod api;
pub mod error;
pub mod forms;
pub mod session;

pub use api::{AuthApi, HttpAuthClient};
pub use error::{ClientError, GENERIC_ERROR_MESSAGE};
pub use forms::{
    AlternateLink, FormState, Navigation, RegisterForm, RootError, SigninForm, SubmitOutcome,
};
pub use session::SessionConsumer;
