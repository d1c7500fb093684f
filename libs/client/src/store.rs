//! The single store owning all client state

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    action::Action,
    alert::AlertState,
    auth::{AuthState, TokenChange, token_change},
    storage::TokenStorage,
};

/// Complete client state, serializable as one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootState {
    pub alert: AlertState,
    pub auth: AuthState,
}

impl RootState {
    pub fn reduce(&self, action: &Action) -> RootState {
        RootState {
            alert: self.alert.reduce(action),
            auth: self.auth.reduce(action),
        }
    }
}

/// Owns the state and applies token persistence for dispatched actions
pub struct Store {
    state: RootState,
    storage: Box<dyn TokenStorage>,
}

impl Store {
    /// Create a store whose auth slice starts from the persisted token
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        let token = storage.load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable persisted token: {}", e);
            None
        });

        Self {
            state: RootState {
                alert: AlertState::default(),
                auth: AuthState::initial(token),
            },
            storage,
        }
    }

    pub fn state(&self) -> &RootState {
        &self.state
    }

    pub fn dispatch(&mut self, action: &Action) {
        let persisted = match token_change(action) {
            Some(TokenChange::Persist(token)) => self.storage.save(&token),
            Some(TokenChange::Clear) => self.storage.clear(),
            None => Ok(()),
        };
        if let Err(e) = persisted {
            warn!("Failed to update persisted token: {}", e);
        }

        self.state = self.state.reduce(action);
    }
}
