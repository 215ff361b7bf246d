//! State management module
//!
//! Plain data held by the controller: the colour and effect types, the local
//! device mirror, the countdown timer state and the timer slider, plus the
//! state shared with the UI surface handlers.

pub mod app_state;
pub mod color;
pub mod effect;
pub mod mirror;
pub mod slider;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use color::Color;
pub use effect::{Effect, UnknownEffect};
pub use mirror::{DeviceMirror, DeviceSnapshot, MirrorView};
pub use slider::{display_minutes, TimerSlider};
pub use timer_state::{clamp_timer_seconds, TimerState, MAX_TIMER_SECONDS};
