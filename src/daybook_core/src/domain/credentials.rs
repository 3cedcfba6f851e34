//! Credential validation shared by the forms and the server endpoints.

use std::fmt;

use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::{
    email::Email,
    password::{Password, PasswordPolicy},
    user::UserError,
};

/// Raw `{ email, password }` as submitted by a form.
///
/// Missing fields deserialize to empty strings so they are reported as field
/// errors instead of rejected by the body parser.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsCandidate {
    #[serde(default = "empty_secret")]
    pub email: Secret<String>,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

impl CredentialsCandidate {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Secret::new(email.into()),
            password: Secret::new(password.into()),
        }
    }
}

/// Field-scoped validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub password: Vec<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.password.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn count(&self) -> usize {
        self.email.len() + self.password.len()
    }

    fn record(&mut self, error: UserError) {
        match error {
            UserError::InvalidEmail => self.email.push(error.to_string()),
            UserError::InvalidPassword(rules) => self
                .password
                .extend(rules.iter().map(|rule| rule.message().to_string())),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let all: Vec<&str> = self
            .email
            .iter()
            .chain(self.password.iter())
            .map(String::as_str)
            .collect();
        write!(f, "{}", all.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Email and password that passed validation.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: Email,
    password: Password,
}

impl Credentials {
    /// Validate both fields, collecting every violation before failing.
    pub fn validate(
        candidate: CredentialsCandidate,
        policy: PasswordPolicy,
    ) -> Result<Self, FieldErrors> {
        let email = Email::try_from(candidate.email);
        let password = Password::parse(candidate.password, policy);

        match (email, password) {
            (Ok(email), Ok(password)) => Ok(Self { email, password }),
            (email, password) => {
                let mut errors = FieldErrors::default();
                if let Err(e) = email {
                    errors.record(e);
                }
                if let Err(e) = password {
                    errors.record(e);
                }
                Err(errors)
            }
        }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn into_parts(self) -> (Email, Password) {
        (self.email, self.password)
    }
}
