//! End-to-end tests wiring the session coordinator to a dispatcher and an
//! in-memory backend on the tokio runtime.

use std::sync::Arc;

use termdeck_core::command::WorkspaceCommand;
use termdeck_core::dispatch::{
    DisconnectLog, InMemoryBackend, SessionDispatcher, SessionEvent, SessionIntent, execute,
    intent_channel,
};
use termdeck_core::error::SessionError;
use termdeck_core::id::SessionId;
use termdeck_core::lifecycle::{ClosePaneResult, SessionCoordinator};
use termdeck_core::split::SplitDirection;
use tokio::sync::mpsc;

struct Rig {
    coordinator: SessionCoordinator,
    backend: InMemoryBackend,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    dispatcher: tokio::task::JoinHandle<usize>,
}

impl Rig {
    fn start(backend: InMemoryBackend) -> Self {
        let (intents, rx) = intent_channel();
        let (events_tx, events) = mpsc::unbounded_channel();
        let dispatcher = SessionDispatcher::new(Arc::new(backend.clone()))
            .with_events(events_tx)
            .spawn(rx);
        Self {
            coordinator: SessionCoordinator::new(intents),
            backend,
            events,
            dispatcher,
        }
    }

    /// Drops the coordinator, waits for the dispatcher and returns every
    /// event it reported.
    async fn finish(self) -> (InMemoryBackend, usize, Vec<SessionEvent>) {
        let Self {
            coordinator,
            backend,
            mut events,
            dispatcher,
        } = self;
        drop(coordinator);
        let dispatched = dispatcher.await.expect("dispatcher panicked");
        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event);
        }
        (backend, dispatched, seen)
    }
}

#[tokio::test]
async fn local_tabs_create_live_sessions() {
    let mut rig = Rig::start(InMemoryBackend::new());
    let first = rig.coordinator.create_local_tab();
    let second = rig.coordinator.create_local_tab();

    let (backend, dispatched, events) = rig.finish().await;

    assert_eq!(dispatched, 2);
    assert_eq!(events.len(), 2);
    assert!(backend.is_live(first.session_id.as_ref().unwrap()));
    assert!(backend.is_live(second.session_id.as_ref().unwrap()));
}

#[tokio::test]
async fn closing_tab_destroys_session() {
    let backend = InMemoryBackend::new();
    let (intents, mut rx) = intent_channel();
    let mut coordinator = SessionCoordinator::new(intents);

    let tab = coordinator.create_local_tab();
    coordinator.close_tab(&tab.id);
    drop(coordinator);

    // executed inline so the create lands before the destroy
    let mut events = Vec::new();
    while let Some(intent) = rx.recv().await {
        events.push(execute(&backend, intent).await);
    }

    let session = tab.session_id.unwrap();
    assert_eq!(
        events,
        vec![
            SessionEvent::Created(session.clone()),
            SessionEvent::Destroyed(session)
        ]
    );
    assert!(backend.live_sessions().is_empty());
    assert_eq!(backend.counters(), (1, 1));
}

#[tokio::test]
async fn failed_create_keeps_pane_and_reports_failure() {
    let mut rig = Rig::start(InMemoryBackend::new().with_failing_creates(true));
    let tab = rig.coordinator.create_local_tab();
    let session = tab.session_id.clone().unwrap();

    assert_eq!(rig.coordinator.workspace().tab_count(), 1);
    let (backend, _, events) = rig.finish().await;

    assert!(backend.live_sessions().is_empty());
    assert!(matches!(
        events.as_slice(),
        [SessionEvent::Failed {
            intent: SessionIntent::CreatePty { session_id },
            error: SessionError::CreateFailed { .. },
        }] if session_id == &session
    ));
}

#[tokio::test]
async fn upstream_sessions_are_destroyed_on_close() {
    let backend = InMemoryBackend::new();
    backend.adopt(SessionId::from_raw("ssh-1"));
    backend.adopt(SessionId::from_raw("sftp-1"));
    let mut rig = Rig::start(backend);
    let log = Arc::new(DisconnectLog::new());
    rig.coordinator.add_observer(log.clone());

    let ssh = rig
        .coordinator
        .open_ssh_tab(SessionId::from_raw("ssh-1"), "web01");
    let pending = rig
        .coordinator
        .split_pane(SplitDirection::Vertical, None)
        .unwrap();
    assert!(
        rig.coordinator
            .replace_pending_with_sftp_pane(&pending, SessionId::from_raw("sftp-1"))
    );

    let result = rig.coordinator.close_pane_by_id(&pending);
    assert!(matches!(result, ClosePaneResult::PaneRemoved { ref released } if released.len() == 1));
    rig.coordinator.close_tab(&ssh.id);

    let (backend, dispatched, events) = rig.finish().await;
    assert_eq!(dispatched, 2);
    assert!(backend.live_sessions().is_empty());
    assert!(
        events
            .iter()
            .all(|event| matches!(event, SessionEvent::Destroyed(_)))
    );
    assert_eq!(
        log.entries(),
        vec![SessionId::from_raw("sftp-1"), SessionId::from_raw("ssh-1")]
    );
}

#[tokio::test]
async fn scripted_session_survives_dispatch() {
    let mut rig = Rig::start(InMemoryBackend::new());
    for command in [
        WorkspaceCommand::NewLocalTab,
        WorkspaceCommand::SplitPane {
            direction: SplitDirection::Horizontal,
        },
        WorkspaceCommand::BindLocal,
        WorkspaceCommand::SplitGroup {
            direction: SplitDirection::Vertical,
        },
        WorkspaceCommand::NewLocalTab,
        WorkspaceCommand::CloseFocusedGroup,
    ] {
        rig.coordinator.apply(&command);
    }
    let remaining: Vec<_> = rig
        .coordinator
        .active_tab()
        .unwrap()
        .bound_sessions()
        .iter()
        .map(|binding| binding.session_id().clone())
        .collect();
    assert_eq!(rig.coordinator.workspace().group_count(), 1);

    let (backend, dispatched, _) = rig.finish().await;

    // three creates and one destroy
    assert_eq!(dispatched, 4);
    let live = backend.live_sessions();
    for id in &remaining {
        assert!(live.contains(id));
    }
}
