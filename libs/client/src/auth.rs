//! Authentication slice

use serde::{Deserialize, Serialize};

use crate::action::{Action, UserInfo};

/// What a dispatched action requires of the persisted token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenChange {
    Persist(String),
    Clear,
}

/// Authentication state mirrored from the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub token: Option<String>,
    /// `None` until the first auth outcome is known
    pub is_authenticated: Option<bool>,
    pub loading: bool,
    pub user: Option<UserInfo>,
}

impl AuthState {
    /// State at startup, seeded with the persisted token
    pub fn initial(token: Option<String>) -> Self {
        Self {
            token,
            is_authenticated: None,
            loading: true,
            user: None,
        }
    }

    pub fn reduce(&self, action: &Action) -> AuthState {
        match action {
            Action::UserLoaded(user) => AuthState {
                user: Some(user.clone()),
                is_authenticated: Some(true),
                loading: false,
                ..self.clone()
            },
            Action::RegisterSuccess(payload) | Action::LoginSuccess(payload) => AuthState {
                token: Some(payload.token.clone()),
                is_authenticated: Some(true),
                loading: false,
                ..self.clone()
            },
            Action::RegisterFail | Action::LoginFail | Action::AuthError => AuthState {
                token: None,
                is_authenticated: Some(false),
                loading: false,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }
}

/// The effect `action` has on the persisted token
pub fn token_change(action: &Action) -> Option<TokenChange> {
    match action {
        Action::RegisterSuccess(payload) | Action::LoginSuccess(payload) => {
            Some(TokenChange::Persist(payload.token.clone()))
        }
        Action::RegisterFail | Action::LoginFail | Action::AuthError => Some(TokenChange::Clear),
        _ => None,
    }
}
