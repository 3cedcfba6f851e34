use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use super::{email::Email, password::PasswordRule};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("{}", describe_rules(.0))]
    InvalidPassword(Vec<PasswordRule>),
}

fn describe_rules(rules: &[PasswordRule]) -> String {
    rules
        .iter()
        .map(|rule| rule.message())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A password hash in PHC string format, as produced by the hashing primitive.
#[derive(Debug, Clone)]
pub struct HashedPassword(Secret<String>);

impl HashedPassword {
    pub fn new(phc: Secret<String>) -> Self {
        Self(phc)
    }
}

impl AsRef<Secret<String>> for HashedPassword {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// A stored account.
///
/// Users created through a federated provider have no password hash and can
/// only sign in through that provider.
#[derive(Debug, Clone)]
pub struct User {
    email: Email,
    hashed_password: Option<HashedPassword>,
    image: Option<String>,
}

impl User {
    pub fn new(email: Email, hashed_password: HashedPassword) -> Self {
        Self {
            email,
            hashed_password: Some(hashed_password),
            image: None,
        }
    }

    pub fn federated(email: Email, image: Option<String>) -> Self {
        Self {
            email,
            hashed_password: None,
            image,
        }
    }

    /// Rebuild a user from stored columns.
    pub fn parse(
        email: Secret<String>,
        hashed_password: Option<Secret<String>>,
        image: Option<String>,
    ) -> Result<Self, UserError> {
        Ok(Self {
            email: Email::try_from(email)?,
            hashed_password: hashed_password.map(HashedPassword::new),
            image,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn hashed_password(&self) -> Option<&HashedPassword> {
        self.hashed_password.as_ref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_image(&mut self, image: Option<String>) {
        if image.is_some() {
            self.image = image;
        }
    }

    pub fn email_str(&self) -> &str {
        self.email.as_ref().expose_secret()
    }
}
