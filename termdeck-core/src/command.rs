//! Workspace commands
//!
//! [`WorkspaceCommand`] is the vocabulary shared by keyboard shortcuts, the
//! command palette and scripted replays. Every command targets the current
//! focus: the focused group, its active tab and that tab's focused pane.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{GroupId, PaneId, SessionId, TabId};
use crate::lifecycle::{ClosePaneResult, SessionCoordinator};
use crate::split::{CycleDirection, SplitDirection};
use crate::tracing::span_names;

/// A user-level command against the focused part of the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum WorkspaceCommand {
    /// Open a local shell tab in the focused group
    NewLocalTab,
    /// Show the settings tab
    OpenSettings,
    /// Close the focused group's active tab
    CloseActiveTab,
    /// Activate the next tab of the focused group
    NextTab,
    /// Activate the previous tab of the focused group
    PreviousTab,
    /// Split the focused group
    SplitGroup {
        /// Orientation of the new split
        direction: SplitDirection,
    },
    /// Close the focused group and all its tabs
    CloseFocusedGroup,
    /// Focus the next group
    NextGroup,
    /// Focus the previous group
    PreviousGroup,
    /// Split the active tab's focused pane
    SplitPane {
        /// Orientation of the new split
        direction: SplitDirection,
    },
    /// Close the active tab's focused pane
    CloseFocusedPane,
    /// Focus the next pane of the active tab
    FocusNextPane,
    /// Focus the previous pane of the active tab
    FocusPreviousPane,
    /// Bind the focused pending pane to a new local shell
    BindLocal,
    /// Rename the active tab
    RenameActiveTab {
        /// New title
        title: String,
    },
}

impl WorkspaceCommand {
    /// Returns the kebab-case command name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NewLocalTab => "new-local-tab",
            Self::OpenSettings => "open-settings",
            Self::CloseActiveTab => "close-active-tab",
            Self::NextTab => "next-tab",
            Self::PreviousTab => "previous-tab",
            Self::SplitGroup { .. } => "split-group",
            Self::CloseFocusedGroup => "close-focused-group",
            Self::NextGroup => "next-group",
            Self::PreviousGroup => "previous-group",
            Self::SplitPane { .. } => "split-pane",
            Self::CloseFocusedPane => "close-focused-pane",
            Self::FocusNextPane => "focus-next-pane",
            Self::FocusPreviousPane => "focus-previous-pane",
            Self::BindLocal => "bind-local",
            Self::RenameActiveTab { .. } => "rename-active-tab",
        }
    }
}

impl fmt::Display for WorkspaceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SplitGroup { direction } | Self::SplitPane { direction } => {
                write!(f, "{} {direction}", self.name())
            }
            Self::RenameActiveTab { title } => write!(f, "{} {title:?}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// What a command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A tab was created or brought forward
    TabOpened(TabId),
    /// A tab was closed
    TabClosed(TabId),
    /// A group was created
    GroupOpened(GroupId),
    /// A group was closed, or emptied when it was the last one
    GroupClosed {
        /// Group that was targeted
        group_id: GroupId,
        /// Number of tabs that went with it
        closed_tabs: usize,
    },
    /// A pending pane was inserted
    PaneOpened(PaneId),
    /// A pane was removed while its tab survived
    PaneClosed {
        /// Removed pane
        pane_id: PaneId,
        /// Number of sessions torn down
        released: usize,
    },
    /// A pending pane was bound to a new session
    SessionBound {
        /// Pane that was bound
        pane_id: PaneId,
        /// Session that will back it
        session_id: SessionId,
    },
    /// Focus moved or a title changed
    Updated,
    /// Nothing to act on
    NoOp,
}

impl CommandOutcome {
    /// Returns `true` if the command had no effect.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }

    const fn from_changed(changed: bool) -> Self {
        if changed { Self::Updated } else { Self::NoOp }
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TabOpened(id) => write!(f, "tab opened {id}"),
            Self::TabClosed(id) => write!(f, "tab closed {id}"),
            Self::GroupOpened(id) => write!(f, "group opened {id}"),
            Self::GroupClosed {
                group_id,
                closed_tabs,
            } => write!(f, "group closed {group_id} ({closed_tabs} tabs)"),
            Self::PaneOpened(id) => write!(f, "pane opened {id}"),
            Self::PaneClosed { pane_id, released } => {
                write!(f, "pane closed {pane_id} ({released} sessions released)")
            }
            Self::SessionBound {
                pane_id,
                session_id,
            } => write!(f, "pane {pane_id} bound to {session_id}"),
            Self::Updated => f.write_str("updated"),
            Self::NoOp => f.write_str("no-op"),
        }
    }
}

impl SessionCoordinator {
    /// Applies a command to the current focus.
    ///
    /// Commands with nothing to act on (no active tab, a settings tab, a
    /// single pane to cycle) return [`CommandOutcome::NoOp`].
    pub fn apply(&mut self, command: &WorkspaceCommand) -> CommandOutcome {
        let _span =
            crate::trace_operation_debug!(span_names::COMMAND_APPLY, op = command.name())
                .entered();

        let outcome = match command {
            WorkspaceCommand::NewLocalTab => CommandOutcome::TabOpened(self.create_local_tab().id),
            WorkspaceCommand::OpenSettings => CommandOutcome::TabOpened(self.open_settings()),
            WorkspaceCommand::CloseActiveTab => match self.active_tab().map(|tab| tab.id.clone()) {
                Some(tab_id) => self
                    .close_tab(&tab_id)
                    .map_or(CommandOutcome::NoOp, |tab| CommandOutcome::TabClosed(tab.id)),
                None => CommandOutcome::NoOp,
            },
            WorkspaceCommand::NextTab => {
                CommandOutcome::from_changed(self.cycle_focused_group_tab(CycleDirection::Next))
            }
            WorkspaceCommand::PreviousTab => {
                CommandOutcome::from_changed(self.cycle_focused_group_tab(CycleDirection::Previous))
            }
            WorkspaceCommand::SplitGroup { direction } => {
                CommandOutcome::GroupOpened(self.split_focused_group(*direction))
            }
            WorkspaceCommand::CloseFocusedGroup => {
                let group_id = self.workspace().focused_group_id().clone();
                let closed_tabs = self.close_group(&group_id).len();
                CommandOutcome::GroupClosed {
                    group_id,
                    closed_tabs,
                }
            }
            WorkspaceCommand::NextGroup => {
                CommandOutcome::from_changed(self.cycle_focused_pane_group(CycleDirection::Next))
            }
            WorkspaceCommand::PreviousGroup => CommandOutcome::from_changed(
                self.cycle_focused_pane_group(CycleDirection::Previous),
            ),
            WorkspaceCommand::SplitPane { direction } => self
                .split_pane(*direction, None)
                .map_or(CommandOutcome::NoOp, CommandOutcome::PaneOpened),
            WorkspaceCommand::CloseFocusedPane => self.close_focused_pane(),
            WorkspaceCommand::FocusNextPane => {
                CommandOutcome::from_changed(self.cycle_focused_pane(CycleDirection::Next))
            }
            WorkspaceCommand::FocusPreviousPane => {
                CommandOutcome::from_changed(self.cycle_focused_pane(CycleDirection::Previous))
            }
            WorkspaceCommand::BindLocal => {
                match self.active_tab().map(|tab| tab.focused_pane_id.clone()) {
                    Some(pane_id) => self.replace_pending_with_local(&pane_id).map_or(
                        CommandOutcome::NoOp,
                        |session_id| CommandOutcome::SessionBound {
                            pane_id,
                            session_id,
                        },
                    ),
                    None => CommandOutcome::NoOp,
                }
            }
            WorkspaceCommand::RenameActiveTab { title } => {
                match self.active_tab().map(|tab| tab.id.clone()) {
                    Some(tab_id) => CommandOutcome::from_changed(self.rename_tab(&tab_id, title)),
                    None => CommandOutcome::NoOp,
                }
            }
        };

        if outcome.is_noop() {
            tracing::trace!(command = %command, "Command had no effect");
        } else {
            tracing::debug!(command = %command, outcome = %outcome, "Command applied");
        }
        outcome
    }

    fn close_focused_pane(&mut self) -> CommandOutcome {
        let Some(pane_id) = self.active_tab().map(|tab| tab.focused_pane_id.clone()) else {
            return CommandOutcome::NoOp;
        };
        match self.close_pane_by_id(&pane_id) {
            ClosePaneResult::NotFound => CommandOutcome::NoOp,
            ClosePaneResult::PaneRemoved { released } => CommandOutcome::PaneClosed {
                pane_id,
                released: released.len(),
            },
            ClosePaneResult::TabClosed(tab) => CommandOutcome::TabClosed(tab.id),
        }
    }
}
