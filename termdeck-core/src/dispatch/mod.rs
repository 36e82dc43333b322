//! Asynchronous session command boundary
//!
//! Layout mutations never await the backend. Instead they queue
//! [`SessionIntent`]s on an [`IntentSender`]; a [`SessionDispatcher`]
//! running on the tokio runtime turns each intent into a backend call on
//! its own task and reports the outcome as a [`SessionEvent`].
//!
//! ```text
//! SessionCoordinator ──intent──▶ queue ──▶ SessionDispatcher ──spawn──▶ SessionBackend
//!                                                  │
//!                                                  └──▶ SessionEvent (Created / Destroyed / Failed)
//! ```
//!
//! A failed create leaves the pane bound to a session that never started.
//! The layout does not heal itself; whoever consumes the events decides
//! whether to close the dead pane.

mod backend;
mod dispatcher;
mod intent;
mod observer;

pub use backend::{InMemoryBackend, SessionBackend};
pub use dispatcher::{SessionDispatcher, execute};
pub use intent::{IntentReceiver, IntentSender, SessionEvent, SessionIntent, intent_channel};
pub use observer::{DisconnectLog, SessionObserver};
