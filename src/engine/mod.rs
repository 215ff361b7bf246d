//! Countdown and synchronization engine
//!
//! Pure state machines. Transitions return [`Command`]s instead of performing
//! I/O; the controller loop in `tasks` executes them.

pub mod command;
pub mod controller;
pub mod countdown;

pub use command::Command;
pub use controller::{RenderState, SyncController, SyncStatus, UiEvent};
pub use countdown::{CountdownEngine, CountdownPhase, TickOutcome};
