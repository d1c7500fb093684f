//! Client-side state for the DevConnector front end
//!
//! All state lives in one serializable [`RootState`] owned by a [`Store`].
//! Reducers are pure functions of the previous state and an [`Action`]; the
//! only side effect, persisting the session token, is applied by the store
//! through a [`TokenStorage`].

pub mod action;
pub mod alert;
pub mod auth;
pub mod storage;
pub mod store;

pub use action::{Action, Alert, AlertKind, TokenPayload, UserInfo};
pub use alert::AlertState;
pub use auth::{AuthState, TokenChange};
pub use storage::{FileTokenStorage, MemoryTokenStorage, StorageError, TokenStorage};
pub use store::{RootState, Store};
