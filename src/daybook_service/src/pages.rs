//! Server-rendered pages: layout with sidebar and navbar, signin and
//! registration forms.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use daybook_core::{
    AuthValidator, AuthenticationScheme, NAV_ITEMS, NavItem, Navbar, SessionState,
    SupportsFederatedSignin, paths,
};
use serde::Deserialize;

/// Flattened [`Navbar`] for templates.
#[derive(Debug, Clone, Default)]
pub struct NavbarView {
    pub is_placeholder: bool,
    pub is_user: bool,
    pub email: String,
    pub image: String,
    pub avatar_fallback: String,
    pub href: String,
}

impl From<Navbar> for NavbarView {
    fn from(navbar: Navbar) -> Self {
        match navbar {
            Navbar::Placeholder => NavbarView {
                is_placeholder: true,
                ..Default::default()
            },
            Navbar::UserMenu {
                email,
                image,
                avatar_fallback,
                logout_href,
            } => NavbarView {
                is_user: true,
                email,
                image: image.unwrap_or_default(),
                avatar_fallback: avatar_fallback.to_string(),
                href: logout_href.to_string(),
                ..Default::default()
            },
            Navbar::LoginLink { href } => NavbarView {
                href: href.to_string(),
                ..Default::default()
            },
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav_items: &'static [NavItem],
    pub navbar: NavbarView,
}

#[derive(Template)]
#[template(path = "signin.html")]
pub struct SigninTemplate {
    pub nav_items: &'static [NavItem],
    pub navbar: NavbarView,
    pub error_message: String,
    pub google_href: String,
    pub register_href: &'static str,
    pub credentials_action: &'static str,
    pub callback_url: String,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub nav_items: &'static [NavItem],
    pub navbar: NavbarView,
    pub register_action: &'static str,
    pub signin_href: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct SigninQuery {
    pub error: Option<String>,
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// Banner text for the `?error=` codes the auth routes redirect with.
pub fn signin_error_message(code: &str) -> &'static str {
    match code {
        "OAuthCallback" | "OAuthSignin" => "Could not sign in with Google. Please try again.",
        "CredentialsSignin" => "Invalid email or password",
        _ => "Something went wrong",
    }
}

pub struct PageError(askama::Error);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "failed to render page");
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
    }
}

fn render(template: impl Template) -> Result<Html<String>, PageError> {
    template.render().map(Html).map_err(PageError)
}

async fn navbar_for<S>(scheme: &S, parts: &Parts) -> NavbarView
where
    S: AuthenticationScheme,
    S::Validator: AuthValidator<RequestParts = Parts>,
{
    let session: SessionState = scheme.validator().resolve_session(parts).await;
    Navbar::for_session(&session).into()
}

pub async fn home<S>(State(scheme): State<S>, parts: Parts) -> Result<Html<String>, PageError>
where
    S: AuthenticationScheme,
    S::Validator: AuthValidator<RequestParts = Parts>,
{
    render(HomeTemplate {
        nav_items: &NAV_ITEMS,
        navbar: navbar_for(&scheme, &parts).await,
    })
}

pub async fn signin<S>(
    State(scheme): State<S>,
    Query(query): Query<SigninQuery>,
    parts: Parts,
) -> Result<Html<String>, PageError>
where
    S: SupportsFederatedSignin,
    S::Validator: AuthValidator<RequestParts = Parts>,
{
    let callback_url = paths::sanitize_callback_url(query.callback_url.as_deref());
    let google_href = if scheme.federated_providers().contains(&"google") {
        paths::federated_signin_href("google", &callback_url)
    } else {
        String::new()
    };

    render(SigninTemplate {
        nav_items: &NAV_ITEMS,
        navbar: navbar_for(&scheme, &parts).await,
        error_message: query
            .error
            .as_deref()
            .map(signin_error_message)
            .unwrap_or_default()
            .to_string(),
        google_href,
        register_href: paths::REGISTER_PAGE,
        credentials_action: paths::CREDENTIALS_CALLBACK,
        callback_url,
    })
}

pub async fn register<S>(State(scheme): State<S>, parts: Parts) -> Result<Html<String>, PageError>
where
    S: AuthenticationScheme,
    S::Validator: AuthValidator<RequestParts = Parts>,
{
    render(RegisterTemplate {
        nav_items: &NAV_ITEMS,
        navbar: navbar_for(&scheme, &parts).await,
        register_action: paths::REGISTER,
        signin_href: paths::PROVIDER_SIGNIN,
    })
}
