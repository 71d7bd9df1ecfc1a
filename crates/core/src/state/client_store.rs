//! Injectable container for client state.
//!
//! One `ClientStore` is created by the application and passed (usually as an
//! `Arc`) to whatever needs it. There is no process-wide instance.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use super::state_model::{ClientState, Session, Theme};

/// Supplies the bearer token for API requests.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// A fixed token, for scripts and tests.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenSource for StaticToken {
    fn access_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

#[derive(Debug, Default)]
pub struct ClientStore {
    state: RwLock<ClientState>,
}

impl ClientStore {
    /// Creates a store holding the default initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> ClientState {
        self.read().clone()
    }

    pub fn toggle_sidebar(&self) -> bool {
        let mut state = self.write();
        state.sidebar_open = !state.sidebar_open;
        state.sidebar_open
    }

    pub fn set_sidebar_open(&self, open: bool) {
        self.write().sidebar_open = open;
    }

    pub fn set_theme(&self, theme: Theme) {
        self.write().theme = theme;
    }

    pub fn sign_in(&self, session: Session) {
        debug!("Signing in user {}", session.user_id);
        self.write().session = Some(session);
    }

    /// Clears the session and everything tied to the signed-in user.
    pub fn sign_out(&self) {
        let mut state = self.write();
        if let Some(session) = state.session.take() {
            debug!("Signing out user {}", session.user_id);
        }
        state.unread_notifications = 0;
    }

    pub fn set_unread_notifications(&self, count: u32) {
        self.write().unread_notifications = count;
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read().session.as_ref().is_some_and(|s| s.is_admin)
    }

    fn read(&self) -> RwLockReadGuard<'_, ClientState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ClientState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenSource for ClientStore {
    fn access_token(&self) -> Option<String> {
        self.read().session.as_ref().map(|s| s.access_token.clone())
    }
}
