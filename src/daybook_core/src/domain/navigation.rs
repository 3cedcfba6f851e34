//! Navigation targets and the session-aware navbar.

use serde::Serialize;

use super::session::SessionState;
use crate::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub url: &'static str,
}

/// Sidebar entries, in display order.
pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { title: "Home", url: paths::HOME },
    NavItem { title: "Tasks", url: "/tasks" },
    NavItem { title: "Calendar", url: "/calendar" },
    NavItem { title: "Notes", url: "/notes" },
    NavItem { title: "Settings", url: "/settings" },
];

/// What the navbar shows for a given session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navbar {
    /// Session still resolving.
    Placeholder,
    UserMenu {
        email: String,
        image: Option<String>,
        avatar_fallback: char,
        logout_href: &'static str,
    },
    LoginLink { href: &'static str },
}

impl Navbar {
    pub const AVATAR_FALLBACK: char = 'U';

    pub fn for_session(session: &SessionState) -> Self {
        match session {
            SessionState::Loading => Navbar::Placeholder,
            SessionState::Authenticated { user, .. } => Navbar::UserMenu {
                email: user.email.clone(),
                image: user.image.clone(),
                avatar_fallback: Self::AVATAR_FALLBACK,
                logout_href: paths::SIGNOUT,
            },
            SessionState::Unauthenticated => Navbar::LoginLink {
                href: paths::PROVIDER_SIGNIN,
            },
        }
    }
}
