//! Actions dispatched to the client store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual style of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Danger,
    Info,
}

/// A message shown to the user until removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    pub msg: String,
    pub alert_type: AlertKind,
}

impl Alert {
    pub fn new(msg: impl Into<String>, alert_type: AlertKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            msg: msg.into(),
            alert_type,
        }
    }
}

/// The authenticated user as returned by `GET /api/auth`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

/// Payload of a successful login or registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub token: String,
}

/// Everything that can change client state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetAlert(Alert),
    RemoveAlert(Uuid),
    UserLoaded(UserInfo),
    RegisterSuccess(TokenPayload),
    LoginSuccess(TokenPayload),
    RegisterFail,
    LoginFail,
    AuthError,
}
