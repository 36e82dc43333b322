//! Session intents and the events reporting their outcome

use std::fmt;

use tokio::sync::mpsc;

use crate::error::SessionError;
use crate::id::SessionId;
use crate::pane::SessionBinding;

/// A fire-and-forget request to the session backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionIntent {
    /// Start a local pseudo-terminal session
    CreatePty {
        /// Session to create
        session_id: SessionId,
    },
    /// Tear down a pseudo-terminal or remote shell session
    DestroyPty {
        /// Session to destroy
        session_id: SessionId,
    },
    /// Tear down an SFTP session
    DestroySftp {
        /// Session to destroy
        session_id: SessionId,
    },
}

impl SessionIntent {
    /// Returns the destroy intent that releases a binding.
    #[must_use]
    pub fn release(binding: SessionBinding) -> Self {
        match binding {
            SessionBinding::Pty(session_id) => Self::DestroyPty { session_id },
            SessionBinding::Sftp(session_id) => Self::DestroySftp { session_id },
        }
    }

    /// Returns the session the intent targets.
    #[must_use]
    pub const fn session_id(&self) -> &SessionId {
        match self {
            Self::CreatePty { session_id }
            | Self::DestroyPty { session_id }
            | Self::DestroySftp { session_id } => session_id,
        }
    }

    /// Returns true for creation intents.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::CreatePty { .. })
    }
}

impl fmt::Display for SessionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatePty { session_id } => write!(f, "create-pty {session_id}"),
            Self::DestroyPty { session_id } => write!(f, "destroy-pty {session_id}"),
            Self::DestroySftp { session_id } => write!(f, "destroy-sftp {session_id}"),
        }
    }
}

/// Outcome of a dispatched intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend started the session
    Created(SessionId),
    /// The backend tore the session down
    Destroyed(SessionId),
    /// The backend rejected the intent
    Failed {
        /// Intent that failed
        intent: SessionIntent,
        /// Backend error
        error: SessionError,
    },
}

/// Sending half of the intent queue.
///
/// Sending never blocks. If the dispatcher has gone away the intent is
/// dropped with a warning; layout state is never affected.
#[derive(Debug, Clone)]
pub struct IntentSender {
    tx: mpsc::UnboundedSender<SessionIntent>,
}

/// Receiving half of the intent queue.
pub type IntentReceiver = mpsc::UnboundedReceiver<SessionIntent>;

/// Creates an intent queue.
#[must_use]
pub fn intent_channel() -> (IntentSender, IntentReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (IntentSender { tx }, rx)
}

impl IntentSender {
    /// Queues an intent for the dispatcher.
    pub fn send(&self, intent: SessionIntent) {
        tracing::trace!(%intent, "Session intent queued");
        if let Err(e) = self.tx.send(intent) {
            tracing::warn!(intent = %e.0, "Session dispatcher is gone, intent dropped");
        }
    }

    /// Returns true if the dispatcher side has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
