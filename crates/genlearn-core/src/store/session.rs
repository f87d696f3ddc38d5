use crate::session::{Session, SessionSequencer};

/// The learning run currently in progress, if any.
///
/// `is_submitting` is advisory: it stops the presentation layer from
/// dispatching a second answer while the first is in flight. The sequencer
/// enforces the one-answer-per-segment rule on its own.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    session: Option<Session>,
    sequencer: Option<SessionSequencer>,
    is_submitting: bool,
    error: Option<String>,
}

impl SessionStore {
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn sequencer(&self) -> Option<&SessionSequencer> {
        self.sequencer.as_ref()
    }

    pub fn sequencer_mut(&mut self) -> Option<&mut SessionSequencer> {
        self.sequencer.as_mut()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Installs a freshly started session.
    pub fn begin(&mut self, session: Session, sequencer: SessionSequencer) {
        self.session = Some(session);
        self.sequencer = Some(sequencer);
        self.is_submitting = false;
        self.error = None;
    }

    pub fn update_session(&mut self, apply: impl FnOnce(&mut Session)) {
        if let Some(session) = self.session.as_mut() {
            apply(session);
        }
    }

    /// Claims the submit guard. Returns `false` if a submission is already
    /// in flight.
    pub fn try_begin_submit(&mut self) -> bool {
        if self.is_submitting {
            return false;
        }
        self.is_submitting = true;
        true
    }

    pub fn finish_submit(&mut self) {
        self.is_submitting = false;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
