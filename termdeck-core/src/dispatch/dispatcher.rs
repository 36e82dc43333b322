//! Intent dispatcher
//!
//! Drains the intent queue and runs every intent as its own task against
//! the backend. Tasks are never cancelled and no ordering is guaranteed
//! between them; a destroy may overtake the create of the same session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

use super::backend::SessionBackend;
use super::intent::{IntentReceiver, SessionEvent, SessionIntent};

/// Runs queued session intents against a backend.
#[derive(Clone)]
pub struct SessionDispatcher {
    backend: Arc<dyn SessionBackend>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl std::fmt::Debug for SessionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDispatcher")
            .field("reports_events", &self.events.is_some())
            .finish_non_exhaustive()
    }
}

impl SessionDispatcher {
    /// Creates a dispatcher for the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self {
            backend,
            events: None,
        }
    }

    /// Reports the outcome of every intent on the given channel.
    #[must_use]
    pub fn with_events(mut self, events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Dispatches intents until the queue closes and every task finishes.
    ///
    /// Returns the number of intents dispatched.
    pub async fn run(self, mut intents: IntentReceiver) -> usize {
        let mut tasks = JoinSet::new();
        let mut dispatched = 0usize;

        while let Some(intent) = intents.recv().await {
            dispatched += 1;
            let backend = Arc::clone(&self.backend);
            let events = self.events.clone();
            tasks.spawn(async move {
                let event = execute(backend.as_ref(), intent).await;
                report(events.as_ref(), event);
            });

            while let Some(joined) = tasks.try_join_next() {
                log_join(joined);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            log_join(joined);
        }
        tracing::debug!(dispatched, "Session dispatcher stopped");
        dispatched
    }

    /// Spawns [`run`](Self::run) on the current runtime.
    pub fn spawn(self, intents: IntentReceiver) -> JoinHandle<usize> {
        tokio::spawn(self.run(intents))
    }
}

/// Runs a single intent and converts the result into an event.
pub async fn execute(backend: &dyn SessionBackend, intent: SessionIntent) -> SessionEvent {
    let result = match &intent {
        SessionIntent::CreatePty { session_id } => backend.create_pty_session(session_id).await,
        SessionIntent::DestroyPty { session_id } => backend.destroy_pty_session(session_id).await,
        SessionIntent::DestroySftp { session_id } => {
            backend.destroy_sftp_session(session_id).await
        }
    };

    match result {
        Ok(()) => {
            tracing::debug!(%intent, "Session intent completed");
            match intent {
                SessionIntent::CreatePty { session_id } => SessionEvent::Created(session_id),
                SessionIntent::DestroyPty { session_id }
                | SessionIntent::DestroySftp { session_id } => SessionEvent::Destroyed(session_id),
            }
        }
        Err(error) => {
            tracing::warn!(%intent, %error, "Session intent failed");
            SessionEvent::Failed { intent, error }
        }
    }
}

fn report(events: Option<&mpsc::UnboundedSender<SessionEvent>>, event: SessionEvent) {
    if let Some(tx) = events
        && tx.send(event).is_err()
    {
        tracing::trace!("Session event receiver dropped");
    }
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::warn!(%e, "Session intent task aborted");
    }
}
