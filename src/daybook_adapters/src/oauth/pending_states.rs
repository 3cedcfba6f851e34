use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use rand::distr::{Alphanumeric, SampleString};
use thiserror::Error;

pub const STATE_TTL: Duration = Duration::from_secs(10 * 60);
const STATE_LENGTH: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OAuthError {
    #[error("Unknown or already used OAuth state")]
    UnknownState,
    #[error("OAuth state has expired")]
    ExpiredState,
    #[error("OAuth state was issued for another provider")]
    ProviderMismatch,
}

#[derive(Debug, Clone)]
struct PendingState {
    provider: String,
    callback_url: String,
    issued_at: Instant,
}

/// One-time `state` values for in-flight OAuth redirects, each remembering
/// where to send the user afterwards.
#[derive(Debug, Clone)]
pub struct PendingStates {
    states: Arc<DashMap<String, PendingState>>,
    ttl: Duration,
}

impl Default for PendingStates {
    fn default() -> Self {
        Self::new(STATE_TTL)
    }
}

impl PendingStates {
    pub fn new(ttl: Duration) -> Self {
        Self {
            states: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn issue(&self, provider: &str, callback_url: String) -> String {
        self.purge_expired();

        let state = Alphanumeric.sample_string(&mut rand::rng(), STATE_LENGTH);
        self.states.insert(
            state.clone(),
            PendingState {
                provider: provider.to_string(),
                callback_url,
                issued_at: Instant::now(),
            },
        );
        state
    }

    /// Remove the state and return its callback URL. A state can only be
    /// consumed once, whatever the outcome.
    pub fn consume(&self, state: &str, provider: &str) -> Result<String, OAuthError> {
        let (_, pending) = self.states.remove(state).ok_or(OAuthError::UnknownState)?;

        if pending.issued_at.elapsed() > self.ttl {
            return Err(OAuthError::ExpiredState);
        }
        if pending.provider != provider {
            return Err(OAuthError::ProviderMismatch);
        }

        Ok(pending.callback_url)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn purge_expired(&self) {
        let ttl = self.ttl;
        self.states.retain(|_, pending| pending.issued_at.elapsed() <= ttl);
    }
}
