use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::user::UserError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A single password requirement.
///
/// Rules are reported individually so a form can show every unmet
/// requirement at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 5] = [
        PasswordRule::MinLength,
        PasswordRule::Uppercase,
        PasswordRule::Lowercase,
        PasswordRule::Digit,
        PasswordRule::Special,
    ];

    pub fn message(self) -> &'static str {
        match self {
            PasswordRule::MinLength => "Password must be at least 8 characters",
            PasswordRule::Uppercase => "Password must contain at least one uppercase letter",
            PasswordRule::Lowercase => "Password must contain at least one lowercase letter",
            PasswordRule::Digit => "Password must contain at least one number",
            PasswordRule::Special => "Password must contain at least one special character",
        }
    }

    pub fn is_satisfied_by(self, candidate: &str) -> bool {
        match self {
            PasswordRule::MinLength => candidate.chars().count() >= MIN_PASSWORD_LENGTH,
            PasswordRule::Uppercase => candidate.chars().any(|c| c.is_ascii_uppercase()),
            PasswordRule::Lowercase => candidate.chars().any(|c| c.is_ascii_lowercase()),
            PasswordRule::Digit => candidate.chars().any(|c| c.is_ascii_digit()),
            // Anything outside [A-Za-z0-9] counts, underscore included.
            PasswordRule::Special => candidate.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }
}

/// Which rules a password is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordPolicy {
    /// Length plus upper, lower, digit and special character.
    #[default]
    Complexity,
    /// Length only. Used by the stateless credential check endpoint.
    LengthOnly,
}

impl PasswordPolicy {
    pub fn rules(self) -> &'static [PasswordRule] {
        match self {
            PasswordPolicy::Complexity => &PasswordRule::ALL,
            PasswordPolicy::LengthOnly => &PasswordRule::ALL[..1],
        }
    }

    /// Rules the candidate fails, in declaration order.
    pub fn violations(self, candidate: &str) -> Vec<PasswordRule> {
        self.rules()
            .iter()
            .copied()
            .filter(|rule| !rule.is_satisfied_by(candidate))
            .collect()
    }
}

/// A plaintext password that satisfied a [`PasswordPolicy`].
///
/// Never persisted; only the hash derived from it is stored.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(candidate: Secret<String>, policy: PasswordPolicy) -> Result<Self, UserError> {
        let violations = policy.violations(candidate.expose_secret());
        if violations.is_empty() {
            Ok(Self(candidate))
        } else {
            Err(UserError::InvalidPassword(violations))
        }
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value, PasswordPolicy::Complexity)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn violations(s: &str) -> Vec<PasswordRule> {
        PasswordPolicy::Complexity.violations(s)
    }

    #[test]
    fn compliant_password_passes() {
        assert!(violations("Abcd123!").is_empty());
        assert!(Password::try_from(Secret::new("Abcd123!".to_string())).is_ok());
    }

    #[test]
    fn reports_missing_uppercase_and_special() {
        assert_eq!(
            violations("abc12345"),
            vec![PasswordRule::Uppercase, PasswordRule::Special]
        );
    }

    #[test]
    fn underscore_counts_as_special() {
        assert!(violations("Abcd1234_").is_empty());
    }

    #[test]
    fn empty_password_fails_every_rule() {
        assert_eq!(violations(""), PasswordRule::ALL.to_vec());
    }

    #[test]
    fn length_only_policy_ignores_complexity() {
        assert!(PasswordPolicy::LengthOnly.violations("abcdefgh").is_empty());
        assert_eq!(
            PasswordPolicy::LengthOnly.violations("short"),
            vec![PasswordRule::MinLength]
        );
    }

    #[test]
    fn every_rule_has_a_distinct_message() {
        let mut messages: Vec<_> = PasswordRule::ALL.iter().map(|r| r.message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), PasswordRule::ALL.len());
    }

    #[quickcheck]
    fn violations_match_individual_rule_checks(candidate: String) -> bool {
        let reported = violations(&candidate);
        PasswordRule::ALL
            .iter()
            .all(|rule| reported.contains(rule) != rule.is_satisfied_by(&candidate))
    }

    #[quickcheck]
    fn parse_fails_exactly_when_some_rule_is_violated(candidate: String) -> bool {
        let parsed = Password::try_from(Secret::new(candidate.clone()));
        match parsed {
            Ok(_) => violations(&candidate).is_empty(),
            Err(UserError::InvalidPassword(rules)) => rules == violations(&candidate),
            Err(_) => false,
        }
    }
}
