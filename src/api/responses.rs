//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    device::Dialect,
    engine::RenderState,
    state::Color,
};

/// Picker colour as posted by the UI; channels are clamped, never rejected
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColorRequest {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl From<ColorRequest> for Color {
    fn from(request: ColorRequest) -> Self {
        Color::clamped(request.r, request.g, request.b)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SliderRequest {
    pub minutes: u64,
}

/// Response to every UI event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// View at the time the event was queued; it may not include the event yet
    pub view: RenderState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, view: RenderState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            view,
        }
    }

    /// The event was queued for the controller
    pub fn accepted(message: String, view: RenderState) -> Self {
        Self::new("accepted".to_string(), message, view)
    }

    /// Create an error response
    pub fn error(message: String, view: RenderState) -> Self {
        Self::new("error".to_string(), message, view)
    }
}

/// Controller status with process metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub view: RenderState,
    pub uptime: String,
    pub device_url: String,
    pub dialect: Dialect,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
