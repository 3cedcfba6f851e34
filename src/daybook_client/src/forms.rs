//! Register and signin form controllers.
//!
//! A submit runs in this order: in-flight check, local validation, server
//! call. Validation failures never reach the network and a submit while
//! another is in flight is ignored.

use std::sync::atomic::{AtomicBool, Ordering};

use daybook_core::{Credentials, CredentialsCandidate, FieldErrors, PasswordPolicy, paths};
use tokio::sync::watch;

use crate::{api::AuthApi, error::ClientError};

/// Link to the other auth flow, shown next to a root error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternateLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootError {
    pub message: String,
    pub alternate: AlternateLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// In-app route change.
    Client(&'static str),
    /// Reload so server-rendered state picks up the new session cookie.
    FullPageLoad(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(FieldErrors),
    Rejected(RootError),
    Navigate(Navigation),
    /// Another submit was in flight.
    Ignored,
}

/// Render state of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Disables the submit button and shows the loading skeleton.
    pub submitting: bool,
    pub field_errors: FieldErrors,
    pub root_error: Option<RootError>,
    pub password_visible: bool,
}

impl FormState {
    pub fn password_input_type(&self) -> &'static str {
        if self.password_visible { "text" } else { "password" }
    }
}

struct FormCore {
    in_flight: AtomicBool,
    state: watch::Sender<FormState>,
}

impl FormCore {
    fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            state: watch::Sender::new(FormState::default()),
        }
    }

    fn try_begin(&self) -> Option<Submission<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Submission { core: self })
    }

    fn validate(&self, candidate: CredentialsCandidate) -> Result<Credentials, FieldErrors> {
        let result = Credentials::validate(candidate, PasswordPolicy::Complexity);
        self.state.send_modify(|state| {
            state.root_error = None;
            state.field_errors = match &result {
                Ok(_) => FieldErrors::default(),
                Err(errors) => errors.clone(),
            };
        });
        result
    }

    fn reject(&self, error: ClientError, alternate: AlternateLink) -> SubmitOutcome {
        tracing::debug!(%error, "submission rejected");
        let root_error = RootError {
            message: error.user_message(),
            alternate,
        };
        self.state.send_modify(|state| {
            if let Some(fields) = error.field_errors() {
                state.field_errors = fields.clone();
            }
            state.root_error = Some(root_error.clone());
        });
        SubmitOutcome::Rejected(root_error)
    }
}

/// Held for the duration of one request; dropping it re-enables the form.
struct Submission<'a> {
    core: &'a FormCore,
}

impl Submission<'_> {
    fn mark_submitting(&self) {
        self.core.state.send_modify(|state| state.submitting = true);
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.core.state.send_modify(|state| state.submitting = false);
        self.core.in_flight.store(false, Ordering::Release);
    }
}

// ============================================================================
// Register
// ============================================================================

pub struct RegisterForm<A> {
    api: A,
    core: FormCore,
}

impl<A: AuthApi> RegisterForm<A> {
    pub const ALTERNATE: AlternateLink = AlternateLink {
        label: "Signin here",
        href: paths::PROVIDER_SIGNIN,
    };

    pub fn new(api: A) -> Self {
        Self {
            api,
            core: FormCore::new(),
        }
    }

    pub fn state(&self) -> FormState {
        self.core.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.core.state.subscribe()
    }

    pub async fn submit(&self, candidate: CredentialsCandidate) -> SubmitOutcome {
        let Some(submission) = self.core.try_begin() else {
            return SubmitOutcome::Ignored;
        };

        let credentials = match self.core.validate(candidate) {
            Ok(credentials) => credentials,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        submission.mark_submitting();
        match self.api.register(&credentials).await {
            Ok(()) => SubmitOutcome::Navigate(Navigation::Client(paths::SIGNIN_PAGE)),
            Err(error) => self.core.reject(error, Self::ALTERNATE),
        }
    }
}

// ============================================================================
// Signin
// ============================================================================

pub struct SigninForm<A> {
    api: A,
    core: FormCore,
    callback_url: String,
}

impl<A: AuthApi> SigninForm<A> {
    pub const ALTERNATE: AlternateLink = AlternateLink {
        label: "Create account",
        href: paths::REGISTER_PAGE,
    };

    pub fn new(api: A) -> Self {
        Self {
            api,
            core: FormCore::new(),
            callback_url: paths::HOME.to_string(),
        }
    }

    /// Where to land after signing in. Off-site values fall back to `/`.
    pub fn with_callback_url(mut self, callback_url: &str) -> Self {
        self.callback_url = paths::sanitize_callback_url(Some(callback_url));
        self
    }

    pub fn state(&self) -> FormState {
        self.core.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.core.state.subscribe()
    }

    pub fn toggle_password_visibility(&self) {
        self.core
            .state
            .send_modify(|state| state.password_visible = !state.password_visible);
    }

    /// Target of the "Sign in with Google" button.
    pub fn google_signin_href(&self) -> String {
        paths::federated_signin_href("google", &self.callback_url)
    }

    pub async fn submit(&self, candidate: CredentialsCandidate) -> SubmitOutcome {
        let Some(submission) = self.core.try_begin() else {
            return SubmitOutcome::Ignored;
        };

        let credentials = match self.core.validate(candidate) {
            Ok(credentials) => credentials,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        submission.mark_submitting();
        match self.api.signin(&credentials, &self.callback_url).await {
            Ok(url) => SubmitOutcome::Navigate(Navigation::FullPageLoad(url)),
            Err(error) => self.core.reject(error, Self::ALTERNATE),
        }
    }
}
