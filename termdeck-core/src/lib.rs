//! `termdeck` Core Library
//!
//! Layout and session-lifecycle core for a tabbed terminal client: pane
//! groups hold tabs, tabs hold a tree of split panes, and pane leaves are
//! bound to backend sessions that are created and destroyed in lockstep
//! with the layout.
//!
//! # Crate Structure
//!
//! - [`split`] - Generic split-tree algebra shared by both layout levels
//! - [`pane`] - Pane leaves and their session bindings
//! - [`workspace`] - Pane groups, tabs and the workspace controller
//! - [`lifecycle`] - Session coordinator keeping sessions and panes in sync
//! - [`dispatch`] - Asynchronous boundary towards the session backend
//! - [`command`] - Keyboard and scripted command surface
//! - [`config`] - Settings and keybindings
//! - [`tracing`] - Structured logging setup
//!
//! # Example
//!
//! ```
//! use termdeck_core::command::WorkspaceCommand;
//! use termdeck_core::dispatch::intent_channel;
//! use termdeck_core::lifecycle::SessionCoordinator;
//! use termdeck_core::split::SplitDirection;
//!
//! let (intents, _rx) = intent_channel();
//! let mut coordinator = SessionCoordinator::new(intents);
//! coordinator.apply(&WorkspaceCommand::NewLocalTab);
//! coordinator.apply(&WorkspaceCommand::SplitPane {
//!     direction: SplitDirection::Vertical,
//! });
//!
//! assert_eq!(coordinator.active_tab().map(|tab| tab.pane_count()), Some(2));
//! ```

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod pane;
pub mod split;
pub mod tracing;
pub mod workspace;

pub use command::{CommandOutcome, WorkspaceCommand};
pub use config::{AppSettings, ConfigManager};
pub use dispatch::{
    InMemoryBackend, IntentSender, SessionBackend, SessionDispatcher, SessionEvent, SessionIntent,
};
pub use error::{ConfigError, SessionError, TermdeckError};
pub use id::{GroupId, IdGenerator, PaneId, SessionId, SplitId, TabId};
pub use lifecycle::{ClosePaneResult, SessionCoordinator};
pub use pane::{Pane, PaneTree, SessionBinding};
pub use split::{CycleDirection, LayoutNode, SplitDirection};
pub use workspace::{Tab, TabKind, Workspace};
