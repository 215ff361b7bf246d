//! Side effects requested by the engine, executed by the controller loop

use crate::state::{Color, Effect};

/// Work the controller loop performs on behalf of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fire-and-forget `set_color`
    PushColor(Color),
    /// Fire-and-forget `set_effect`
    PushEffect(Effect),
    /// Fire-and-forget `set_timer`; `0` cancels on the device
    PushTimer(u64),
    /// Replace any running 1 Hz ticker with a fresh one
    StartTicker,
    StopTicker,
}
