//! Timer state structure for the shutdown countdown

use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

/// Longest countdown accepted from the device or the slider
pub const MAX_TIMER_SECONDS: u64 = u32::MAX as u64;

/// Countdown state as last confirmed with the device.
///
/// `server_seconds` is the value that crossed the wire; `deadline` is derived
/// locally when arming is confirmed and never leaves this process, because the
/// device clock and ours are not assumed to agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub server_seconds: u64,
    pub deadline: Option<Instant>,
}

impl TimerState {
    /// Create a disarmed timer state
    pub fn idle() -> Self {
        Self {
            server_seconds: 0,
            deadline: None,
        }
    }

    /// Create an armed timer state whose deadline is `seconds` after `now`.
    /// Zero seconds yields a disarmed state; durations are capped at
    /// [`MAX_TIMER_SECONDS`].
    pub fn armed(seconds: u64, now: Instant) -> Self {
        let seconds = clamp_timer_seconds(seconds);
        if seconds == 0 {
            return Self::idle();
        }
        match now.checked_add(Duration::from_secs(seconds)) {
            Some(deadline) => Self {
                server_seconds: seconds,
                deadline: Some(deadline),
            },
            None => {
                warn!("Countdown of {}s cannot be represented, leaving timer disarmed", seconds);
                Self::idle()
            }
        }
    }

    /// Check if the countdown is running
    pub fn is_armed(&self) -> bool {
        self.server_seconds > 0
    }

    /// Whole seconds left until the deadline, rounded to the nearest second.
    /// Negative once the deadline has passed; zero when disarmed.
    pub fn remaining_seconds(&self, now: Instant) -> i64 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        match deadline.checked_duration_since(now) {
            Some(left) => round_to_seconds(left) as i64,
            None => -(round_to_seconds(now.duration_since(deadline)) as i64),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Cap a countdown length at [`MAX_TIMER_SECONDS`]
pub fn clamp_timer_seconds(seconds: u64) -> u64 {
    seconds.min(MAX_TIMER_SECONDS)
}

fn round_to_seconds(duration: Duration) -> u64 {
    ((duration.as_millis() + 500) / 1000) as u64
}
