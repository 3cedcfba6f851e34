use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

// Local part must not start with a dot or contain "..", checked separately
// since the regex crate has no lookaround.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// A syntactically valid, normalized email address.
///
/// Normalization trims surrounding whitespace and lowercases the address so
/// that lookups and the uniqueness constraint see one spelling per account.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn is_valid(candidate: &str) -> bool {
        !candidate.starts_with('.') && !candidate.contains("..") && EMAIL_PATTERN.is_match(candidate)
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let normalized = value.expose_secret().trim().to_lowercase();
        if Self::is_valid(&normalized) {
            Ok(Self(Secret::new(normalized)))
        } else {
            Err(UserError::InvalidEmail)
        }
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
