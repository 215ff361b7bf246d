//! RGB colour value shared by the mirror, the wire layer and the UI surface

use serde::{Deserialize, Serialize};

/// Colour as three 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Fully off
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from arbitrary integers, clamping each channel into 0..=255
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Channels formatted as `"r, g, b"`, the form used for the page's CSS colour variable
    pub fn channel_string(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }
}

fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, u8::MAX as i64) as u8
}
