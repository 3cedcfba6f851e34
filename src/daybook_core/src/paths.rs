//! Route paths shared by the server router and the client.

use url::{Url, form_urlencoded};

pub const HOME: &str = "/";
pub const SIGNIN_PAGE: &str = "/signin";
pub const REGISTER_PAGE: &str = "/register";

pub const REGISTER: &str = "/api/register";
pub const SIGNIN_CHECK: &str = "/api/signin";

pub const PROVIDER_SIGNIN: &str = "/api/auth/signin";
pub const SIGNOUT: &str = "/api/auth/signout";
pub const SESSION: &str = "/api/auth/session";
pub const CREDENTIALS_CALLBACK: &str = "/api/auth/callback/credentials";
pub const FEDERATED_SIGNIN: &str = "/api/auth/signin/{provider}";
pub const FEDERATED_CALLBACK: &str = "/api/auth/callback/{provider}";

pub fn federated_signin(provider: &str) -> String {
    format!("{PROVIDER_SIGNIN}/{provider}")
}

pub fn federated_callback(provider: &str) -> String {
    format!("/api/auth/callback/{provider}")
}

/// Provider signin link carrying the callback as an encoded query value.
pub fn federated_signin_href(provider: &str, callback_url: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("callbackUrl", callback_url)
        .finish();
    format!("{}?{query}", federated_signin(provider))
}

/// Keep only same-origin relative paths; anything else falls back to home.
///
/// Browsers strip tabs and newlines from URLs and treat `\` like `/`, so
/// those are rejected outright before the path is resolved against a
/// placeholder origin.
pub fn sanitize_callback_url(candidate: Option<&str>) -> String {
    candidate
        .and_then(same_origin_path)
        .unwrap_or_else(|| HOME.to_string())
}

fn same_origin_path(candidate: &str) -> Option<String> {
    if !candidate.starts_with('/')
        || candidate.starts_with("//")
        || candidate
            .chars()
            .any(|c| c == '\\' || c.is_control() || c.is_whitespace())
    {
        return None;
    }

    let base = Url::parse("http://localhost/").ok()?;
    let resolved = base.join(candidate).ok()?;
    if resolved.origin() != base.origin() {
        return None;
    }

    let mut path = resolved.path().to_string();
    if let Some(query) = resolved.query() {
        path.push('?');
        path.push_str(query);
    }
    if let Some(fragment) = resolved.fragment() {
        path.push('#');
        path.push_str(fragment);
    }
    Some(path)
}
