//! Shared state handed to the UI surface handlers

use std::time::Instant;

use crate::{device::Dialect, tasks::ControllerHandle};

/// Process metadata plus a handle to the controller loop
#[derive(Debug, Clone)]
pub struct AppState {
    pub controller: ControllerHandle,
    /// Server metadata
    pub start_time: Instant,
    pub device_url: String,
    pub dialect: Dialect,
}

impl AppState {
    pub fn new(controller: ControllerHandle, device_url: String, dialect: Dialect) -> Self {
        Self {
            controller,
            start_time: Instant::now(),
            device_url,
            dialect,
        }
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }
}

fn format_uptime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
