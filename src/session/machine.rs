use super::error::{SessionError, SessionResult};

/// Lifecycle of one edit session over one content entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Closed,
    Editing,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    BeginSave,
    SaveCompleted,
    SaveFailed,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: SessionState,
    pub event: SessionEvent,
    pub to: SessionState,
}

impl StateTransition {
    pub const fn new(from: SessionState, event: SessionEvent, to: SessionState) -> Self {
        Self { from, event, to }
    }
}

#[derive(Debug, Default)]
pub struct SessionMachine {
    state: SessionState,
    transition_history: Vec<StateTransition>,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == SessionState::Editing
    }

    pub fn next_state(&self, event: SessionEvent) -> Option<SessionState> {
        use SessionEvent::*;
        match (self.state, event) {
            (SessionState::Closed, Start) => Some(SessionState::Editing),
            (SessionState::Editing, BeginSave) => Some(SessionState::Saving),
            // A failed save keeps the edits so the user can retry.
            (SessionState::Saving, SaveFailed) => Some(SessionState::Editing),
            (SessionState::Saving, SaveCompleted) => Some(SessionState::Closed),
            (SessionState::Editing, Cancel) => Some(SessionState::Closed),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: SessionEvent) -> SessionResult<SessionState> {
        tracing::debug!(from = ?self.state, event = ?event, "request session transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid session transition requested");
            SessionError::InvalidTransition { from, event }
        })?;

        self.transition_history
            .push(StateTransition::new(self.state, event, next));
        self.state = next;

        Ok(self.state)
    }
}

#[cfg(test)]
impl SessionMachine {
    fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}
