//! Remote control client module
//!
//! Thin request layer against the device's HTTP control surface. No business
//! logic lives here: one logical write issues exactly one request, and nothing
//! is batched or retried.

pub mod http;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::state::{Color, Effect};

pub use crate::state::DeviceSnapshot;
pub use http::{effect_request, Dialect, HttpDevice};

/// Failures of a device round-trip
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Network or HTTP failure
    #[error("transport error: {0}")]
    Transport(String),
    /// The device answered, but not with the fields we expect
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for DeviceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DeviceError::MalformedResponse(err.to_string())
        } else {
            DeviceError::Transport(err.to_string())
        }
    }
}

/// Operations the device control surface offers
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// Read colour, effect and remaining timer seconds
    async fn get_state(&self) -> Result<DeviceSnapshot, DeviceError>;

    async fn set_color(&self, color: Color) -> Result<(), DeviceError>;

    async fn set_effect(&self, effect: Effect) -> Result<(), DeviceError>;

    /// Arm the device-side shutdown; `0` cancels it
    async fn set_timer(&self, seconds: u64) -> Result<(), DeviceError>;
}
