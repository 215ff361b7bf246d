//! JSON payloads exchanged with the device

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::{clamp_timer_seconds, Color, DeviceSnapshot, Effect};

/// Colour as the device sends it; channels are clamped on the way in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPayload {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl From<Color> for ColorPayload {
    fn from(color: Color) -> Self {
        Self {
            r: color.r.into(),
            g: color.g.into(),
            b: color.b.into(),
        }
    }
}

impl From<ColorPayload> for Color {
    fn from(payload: ColorPayload) -> Self {
        Color::clamped(payload.r, payload.g, payload.b)
    }
}

/// Body of `GET /state`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePayload {
    pub color: ColorPayload,
    pub effect: String,
    pub timer: i64,
}

impl From<StatePayload> for DeviceSnapshot {
    fn from(payload: StatePayload) -> Self {
        let effect = match payload.effect.parse::<Effect>() {
            Ok(effect) => Some(effect),
            Err(e) => {
                warn!("Ignoring effect reported by device: {}", e);
                None
            }
        };
        DeviceSnapshot {
            color: Some(payload.color.into()),
            effect,
            timer_seconds: clamp_seconds(payload.timer),
        }
    }
}

/// Body of `POST /effect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectPayload {
    pub effect: String,
}

impl From<Effect> for EffectPayload {
    fn from(effect: Effect) -> Self {
        Self {
            effect: effect.name().to_string(),
        }
    }
}

/// Body of `GET /timer` and `POST /timer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerPayload {
    pub seconds: i64,
}

impl TimerPayload {
    pub fn new(seconds: u64) -> Self {
        Self {
            seconds: i64::try_from(seconds).unwrap_or(i64::MAX),
        }
    }

    /// Seconds as a non-negative count
    pub fn seconds(&self) -> u64 {
        clamp_seconds(self.seconds)
    }
}

/// Negative values read as disarmed, oversized ones are capped
fn clamp_seconds(seconds: i64) -> u64 {
    clamp_timer_seconds(u64::try_from(seconds).unwrap_or(0))
}
