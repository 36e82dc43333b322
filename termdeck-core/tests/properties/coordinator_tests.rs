//! Property-based tests for session lifecycle bookkeeping
//!
//! Replays random command sequences and checks the intent stream against
//! the layout: every pty session bound in a pane was created exactly once,
//! and every session that left the layout was destroyed exactly once.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use termdeck_core::command::WorkspaceCommand;
use termdeck_core::dispatch::{IntentReceiver, SessionIntent, intent_channel};
use termdeck_core::id::SessionId;
use termdeck_core::lifecycle::SessionCoordinator;
use termdeck_core::pane::SessionBinding;
use termdeck_core::split::SplitDirection;

fn direction_strategy() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![
        Just(SplitDirection::Horizontal),
        Just(SplitDirection::Vertical),
    ]
}

fn command_strategy() -> impl Strategy<Value = WorkspaceCommand> {
    prop_oneof![
        3 => Just(WorkspaceCommand::NewLocalTab),
        1 => Just(WorkspaceCommand::OpenSettings),
        2 => Just(WorkspaceCommand::CloseActiveTab),
        1 => Just(WorkspaceCommand::NextTab),
        1 => Just(WorkspaceCommand::PreviousTab),
        1 => direction_strategy().prop_map(|direction| WorkspaceCommand::SplitGroup { direction }),
        1 => Just(WorkspaceCommand::CloseFocusedGroup),
        1 => Just(WorkspaceCommand::NextGroup),
        1 => Just(WorkspaceCommand::PreviousGroup),
        3 => direction_strategy().prop_map(|direction| WorkspaceCommand::SplitPane { direction }),
        3 => Just(WorkspaceCommand::CloseFocusedPane),
        1 => Just(WorkspaceCommand::FocusNextPane),
        1 => Just(WorkspaceCommand::FocusPreviousPane),
        3 => Just(WorkspaceCommand::BindLocal),
    ]
}

#[derive(Default)]
struct Ledger {
    created: HashMap<SessionId, usize>,
    destroyed: HashMap<SessionId, usize>,
}

impl Ledger {
    fn drain(&mut self, rx: &mut IntentReceiver) {
        while let Ok(intent) = rx.try_recv() {
            let counter = if intent.is_create() {
                &mut self.created
            } else {
                &mut self.destroyed
            };
            *counter.entry(intent.session_id().clone()).or_default() += 1;
        }
    }

    fn live(&self) -> BTreeSet<SessionId> {
        self.created
            .keys()
            .filter(|id| !self.destroyed.contains_key(*id))
            .cloned()
            .collect()
    }
}

fn bound_pty_sessions(coordinator: &SessionCoordinator) -> BTreeSet<SessionId> {
    coordinator
        .workspace()
        .tabs()
        .iter()
        .flat_map(|tab| tab.bound_sessions())
        .filter_map(|binding| match binding {
            SessionBinding::Pty(id) => Some(id),
            SessionBinding::Sftp(_) => None,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn intents_track_bound_sessions(commands in proptest::collection::vec(command_strategy(), 0..50)) {
        let (tx, mut rx) = intent_channel();
        let mut coordinator = SessionCoordinator::new(tx);
        let mut ledger = Ledger::default();

        for command in &commands {
            coordinator.apply(command);
            ledger.drain(&mut rx);

            prop_assert!(ledger.created.values().all(|count| *count == 1));
            prop_assert!(ledger.destroyed.values().all(|count| *count == 1));
            prop_assert!(ledger.destroyed.keys().all(|id| ledger.created.contains_key(id)));
            prop_assert_eq!(ledger.live(), bound_pty_sessions(&coordinator));
        }
    }

    #[test]
    fn closing_everything_destroys_everything(commands in proptest::collection::vec(command_strategy(), 0..40)) {
        let (tx, mut rx) = intent_channel();
        let mut coordinator = SessionCoordinator::new(tx);
        let mut ledger = Ledger::default();
        for command in &commands {
            coordinator.apply(command);
        }

        while coordinator.workspace().group_count() > 1 || coordinator.workspace().tab_count() > 0 {
            coordinator.apply(&WorkspaceCommand::CloseFocusedGroup);
        }
        ledger.drain(&mut rx);

        prop_assert!(ledger.live().is_empty());
        prop_assert_eq!(ledger.created.len(), ledger.destroyed.len());
    }
}
