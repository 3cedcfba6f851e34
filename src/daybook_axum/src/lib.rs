//! Axum integration for the daybook authentication stack.
//!
//! ```text
//! daybook_core      AuthRequest / AuthResponseBuilder (traits)
//!       │
//!       ▼
//! daybook_adapters  framework-agnostic handlers
//!       │
//!       ▼
//! daybook_axum      AxumRequest / AxumResponseBuilder + routes
//! ```
//!
//! ```ignore
//! use axum::{Router, routing::post};
//! use daybook_axum::routes;
//!
//! let app = Router::new()
//!     .route("/api/register", post(routes::register::<Scheme>))
//!     .with_state(scheme);
//! ```

pub mod adapters;
pub mod routes;

pub use adapters::{AxumRequest, AxumResponseBuilder, response_builder};
