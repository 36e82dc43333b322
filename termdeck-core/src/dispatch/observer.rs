//! Disconnect notifications for plugin observers

use std::sync::Mutex;

use crate::id::SessionId;

/// Receives a notification whenever the core tears down a session.
///
/// Called synchronously from the layout mutation, before the destroy
/// intent is processed by the backend.
pub trait SessionObserver: Send + Sync {
    /// Called with the id of a session that is being torn down.
    fn on_session_disconnected(&self, session_id: &SessionId);
}

/// Observer that remembers every disconnect it saw, in order.
#[derive(Debug, Default)]
pub struct DisconnectLog {
    seen: Mutex<Vec<SessionId>>,
}

impl DisconnectLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the disconnected session ids in notification order.
    #[must_use]
    pub fn entries(&self) -> Vec<SessionId> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl SessionObserver for DisconnectLog {
    fn on_session_disconnected(&self, session_id: &SessionId) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(session_id.clone()),
            Err(e) => tracing::warn!(%e, "Disconnect log poisoned"),
        }
    }
}
