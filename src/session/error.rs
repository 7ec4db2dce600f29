use thiserror::Error;

use super::machine::{SessionEvent, SessionState};
use crate::compositor::CompositeError;
use crate::store::StoreError;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session transition: from {from:?} using event {event:?}")]
    InvalidTransition {
        from: SessionState,
        event: SessionEvent,
    },

    #[error("session is not editing (state {state:?})")]
    NotEditing { state: SessionState },

    #[error("viewport bounds are not ready")]
    ViewportNotReady,

    #[error("a {active} gesture is already in progress")]
    GestureInProgress { active: &'static str },

    #[error("no gesture in progress")]
    NoActiveGesture,

    #[error(transparent)]
    Composite(#[from] CompositeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
