use daybook_core::{Navbar, SessionState};
use tokio::sync::watch;

use crate::{api::AuthApi, error::ClientError};

/// Read-only view of the session for UI consumers.
///
/// Starts in `Loading`. [`load`](Self::load) resolves it once; after that it
/// only changes through [`sign_out`](Self::sign_out).
pub struct SessionConsumer {
    state: watch::Sender<SessionState>,
}

impl Default for SessionConsumer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConsumer {
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(SessionState::Loading),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn navbar(&self) -> Navbar {
        Navbar::for_session(&self.state.borrow())
    }

    /// Fetch the session. A failed fetch counts as signed out.
    pub async fn load<A: AuthApi>(&self, api: &A) -> SessionState {
        let state = match api.session().await {
            Ok(SessionState::Loading) | Err(_) => SessionState::Unauthenticated,
            Ok(state) => state,
        };
        self.state.send_replace(state.clone());
        state
    }

    pub async fn sign_out<A: AuthApi>(&self, api: &A) -> Result<(), ClientError> {
        api.signout().await?;
        self.state.send_replace(SessionState::Unauthenticated);
        Ok(())
    }
}
