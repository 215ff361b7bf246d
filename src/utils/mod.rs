//! Utility functions module
//!
//! Process-level helpers used by the binary entry point.

pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
