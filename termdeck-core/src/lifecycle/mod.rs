//! Tab and session lifecycle
//!
//! [`SessionCoordinator`] is the single entry point for layout changes that
//! create or release backend sessions. Pure layout changes can go straight
//! to the [`Workspace`](crate::workspace::Workspace), but anything that adds
//! or removes a bound pane must go through the coordinator so the session
//! set and the pane leaves stay in lockstep.

mod coordinator;

pub use coordinator::{ClosePaneResult, SessionCoordinator};
