pub mod error;

pub use error::{AuthApiError, ErrorResponse};
