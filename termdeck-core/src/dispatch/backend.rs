//! Session backend boundary
//!
//! The backend owns the actual processes and connections. The core only
//! ever asks it to create local pseudo-terminals and to destroy sessions;
//! remote shells and SFTP channels are created upstream by the
//! connection-setup flow and handed to the core as ready ids.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{SessionError, SessionResult};
use crate::id::SessionId;

/// Asynchronous command surface of the session backend.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Starts a local pseudo-terminal session with the given id.
    async fn create_pty_session(&self, session_id: &SessionId) -> SessionResult<()>;

    /// Tears down a pseudo-terminal or remote shell session.
    async fn destroy_pty_session(&self, session_id: &SessionId) -> SessionResult<()>;

    /// Tears down an SFTP session.
    async fn destroy_sftp_session(&self, session_id: &SessionId) -> SessionResult<()>;
}

/// Backend keeping its sessions in memory.
///
/// Used by the command-line driver and by tests. Creation can be made to
/// fail so the asynchronous failure path can be exercised.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<BackendState>>,
}

#[derive(Debug, Default)]
struct BackendState {
    live: BTreeSet<SessionId>,
    fail_creates: bool,
    created: usize,
    destroyed: usize,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent create call fail.
    #[must_use]
    pub fn with_failing_creates(self, fail: bool) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.fail_creates = fail;
        }
        self
    }

    /// Registers a session created outside the core (remote shell or SFTP).
    pub fn adopt(&self, session_id: SessionId) {
        if let Ok(mut state) = self.state.lock() {
            state.live.insert(session_id);
        }
    }

    /// Returns the live sessions in id order.
    #[must_use]
    pub fn live_sessions(&self) -> Vec<SessionId> {
        self.state
            .lock()
            .map(|state| state.live.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns true if the session is live.
    #[must_use]
    pub fn is_live(&self, session_id: &SessionId) -> bool {
        self.state
            .lock()
            .is_ok_and(|state| state.live.contains(session_id))
    }

    /// Returns how many sessions were created and destroyed so far.
    #[must_use]
    pub fn counters(&self) -> (usize, usize) {
        self.state
            .lock()
            .map(|state| (state.created, state.destroyed))
            .unwrap_or_default()
    }

    fn lock(&self) -> SessionResult<MutexGuard<'_, BackendState>> {
        self.state
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))
    }

    fn destroy(&self, session_id: &SessionId) -> SessionResult<()> {
        let mut state = self.lock()?;
        if state.live.remove(session_id) {
            state.destroyed += 1;
            Ok(())
        } else {
            Err(SessionError::DestroyFailed {
                session_id: session_id.clone(),
                reason: "no such session".to_string(),
            })
        }
    }
}

#[async_trait]
impl SessionBackend for InMemoryBackend {
    async fn create_pty_session(&self, session_id: &SessionId) -> SessionResult<()> {
        let mut state = self.lock()?;
        if state.fail_creates {
            return Err(SessionError::CreateFailed {
                session_id: session_id.clone(),
                reason: "creation disabled".to_string(),
            });
        }
        if !state.live.insert(session_id.clone()) {
            return Err(SessionError::CreateFailed {
                session_id: session_id.clone(),
                reason: "session already exists".to_string(),
            });
        }
        state.created += 1;
        Ok(())
    }

    async fn destroy_pty_session(&self, session_id: &SessionId) -> SessionResult<()> {
        self.destroy(session_id)
    }

    async fn destroy_sftp_session(&self, session_id: &SessionId) -> SessionResult<()> {
        self.destroy(session_id)
    }
}
