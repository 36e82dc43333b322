//! Workspace layout: tab groups arranged in a split tree
//!
//! The workspace tree's leaves are tab groups. Each group holds an ordered
//! list of tabs with one active tab, and each tab owns its own pane tree.
//!
//! # Example
//!
//! ```
//! use termdeck_core::split::SplitDirection;
//! use termdeck_core::workspace::Workspace;
//!
//! let mut workspace = Workspace::new();
//! let first = workspace.focused_group_id().clone();
//!
//! let second = workspace.split_focused_group(SplitDirection::Vertical);
//! assert_eq!(workspace.group_ids(), vec![first, second.clone()]);
//! assert_eq!(workspace.focused_group_id(), &second);
//! ```

mod controller;
mod tab;

pub use controller::{Workspace, WorkspaceSnapshot};
pub use tab::{GroupLeaf, PaneGroup, Tab, TabKind, TabSpec, WorkspaceTree};
