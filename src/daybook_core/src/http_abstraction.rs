//! Framework-agnostic HTTP traits.
//!
//! Web frameworks implement these on newtype wrappers around their own
//! request and response-builder types, so the authentication handlers stay
//! independent of any one framework.
//!
//! ```text
//! daybook_core:  AuthRequest / AuthResponseBuilder (traits)
//!        │
//!        ▼
//! daybook_axum:  struct AxumRequest(axum::extract::Request)
//!                impl AuthRequest for AxumRequest { .. }
//! ```

/// Read access to an incoming request.
pub trait AuthRequest {
    /// Header lookup is case-insensitive. `None` if absent or not UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Value of the named cookie from the `Cookie` header.
    fn cookie(&self, name: &str) -> Option<&str>;

    fn method(&self) -> &str;

    fn path(&self) -> &str;
}

/// Builder for outgoing responses.
///
/// ```ignore
/// builder
///     .status(200)
///     .cookie("daybook.session-token=...; HttpOnly; Path=/")
///     .json_body(json!({ "ok": true }))
///     .build()
/// ```
pub trait AuthResponseBuilder: Sized {
    type Response;

    fn status(self, code: u16) -> Self;

    fn header(self, name: &str, value: &str) -> Self;

    /// Add a `Set-Cookie` header with a complete cookie string.
    fn cookie(self, cookie_value: &str) -> Self {
        self.header("set-cookie", cookie_value)
    }

    /// Serialize `body` and set `Content-Type: application/json`.
    fn json_body(self, body: serde_json::Value) -> Self;

    fn build(self) -> Self::Response;
}

/// Shorthands for the responses the handlers produce most often.
pub trait AuthResponseHelpers: AuthResponseBuilder {
    fn ok_json(self, body: serde_json::Value) -> Self::Response {
        self.status(200).json_body(body).build()
    }

    fn created_json(self, body: serde_json::Value) -> Self::Response {
        self.status(201).json_body(body).build()
    }

    fn error_json(self, status: u16, message: &str) -> Self::Response {
        self.status(status)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }

    /// 303 See Other, so the browser follows with a GET.
    fn see_other(self, location: &str) -> Self::Response {
        self.status(303).header("location", location).build()
    }
}

impl<T: AuthResponseBuilder> AuthResponseHelpers for T {}
