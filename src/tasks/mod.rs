//! Background tasks module
//!
//! This module contains the controller loop that runs alongside the UI server.

pub mod controller_loop;

// Re-export main functions
pub use controller_loop::{controller_task, spawn_controller, ControllerHandle, TICK_PERIOD};
