//! Timer slider model: the minute value the UI shows and accepts

use serde::{Deserialize, Serialize};

/// Step between selectable values while no countdown runs
pub const RESTING_STEP_MINUTES: u64 = 5;
/// Step used while a countdown is displayed
pub const COUNTDOWN_STEP_MINUTES: u64 = 1;
pub const DEFAULT_MAX_MINUTES: u64 = 120;

/// Timer slider configuration and value, in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSlider {
    pub value: u64,
    pub step: u64,
    pub disabled: bool,
    pub max: u64,
}

impl TimerSlider {
    /// Slider at rest: zeroed, coarse step, accepting input
    pub fn resting(max: u64) -> Self {
        Self {
            value: 0,
            step: RESTING_STEP_MINUTES,
            disabled: false,
            max,
        }
    }

    /// Lock the slider while a countdown is displayed on it
    pub fn lock_for_countdown(&mut self) {
        self.step = COUNTDOWN_STEP_MINUTES;
        self.disabled = true;
    }

    /// Back to the resting configuration
    pub fn reset(&mut self) {
        *self = Self::resting(self.max);
    }

    /// Apply a user drag. Ignored while locked; otherwise snapped to the
    /// nearest step and clamped to `max`. Returns whether the value was taken.
    pub fn set_candidate(&mut self, minutes: u64) -> bool {
        if self.disabled {
            return false;
        }
        let step = self.step.max(1);
        let snapped = (minutes.saturating_add(step / 2) / step) * step;
        self.value = snapped.min(self.max);
        true
    }

    /// Show a countdown value, bypassing step snapping
    pub fn show_remaining(&mut self, remaining_seconds: i64) {
        self.value = display_minutes(remaining_seconds);
    }
}

impl Default for TimerSlider {
    fn default() -> Self {
        Self::resting(DEFAULT_MAX_MINUTES)
    }
}

/// Minutes shown for a remaining-seconds value.
///
/// Rounded up, so the display never reads 0 while any time remains.
pub fn display_minutes(remaining_seconds: i64) -> u64 {
    if remaining_seconds <= 0 {
        return 0;
    }
    (remaining_seconds as u64).div_ceil(60)
}
