//! Local mirror of the device's colour, effect and timer

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Color, Effect};

/// Device state as reported by one successful read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub color: Option<Color>,
    /// `None` when the device dialect does not report the running effect
    pub effect: Option<Effect>,
    pub timer_seconds: u64,
}

/// Mirrored fields, read by the render builder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorView {
    /// Colour last committed or reported; `None` until either happens
    pub color: Option<Color>,
    /// Colour currently shown while the user drags the picker
    pub preview: Option<Color>,
    pub active_effect: Option<Effect>,
    /// Timer seconds as last reported by the device
    pub timer_seconds: u64,
}

/// Browser-local copy of the device state; the single source for rendering
#[derive(Debug)]
pub struct DeviceMirror {
    view: MirrorView,
}

impl DeviceMirror {
    pub fn new() -> Self {
        Self {
            view: MirrorView::default(),
        }
    }

    pub fn view(&self) -> &MirrorView {
        &self.view
    }

    /// Overwrite local fields with a device snapshot
    pub fn apply_remote(&mut self, snapshot: &DeviceSnapshot) {
        debug!("Applying remote snapshot: {:?}", snapshot);
        self.update(|view| {
            if let Some(color) = snapshot.color {
                view.color = Some(color);
                view.preview = Some(color);
            }
            if let Some(effect) = snapshot.effect {
                view.active_effect = Some(effect);
            }
            view.timer_seconds = snapshot.timer_seconds;
        });
    }

    /// Show a colour while dragging without committing it
    pub fn preview_color(&mut self, color: Color) {
        self.update(|view| view.preview = Some(color));
    }

    /// Commit a colour chosen by the user
    pub fn commit_color(&mut self, color: Color) {
        self.update(|view| {
            view.color = Some(color);
            view.preview = Some(color);
        });
    }

    /// Make `effect` the only active effect
    pub fn set_active_effect(&mut self, effect: Effect) {
        self.update(|view| view.active_effect = Some(effect));
    }

    /// Display the light as off, used when the countdown runs out
    pub fn force_off(&mut self) {
        self.update(|view| {
            view.color = Some(Color::BLACK);
            view.preview = Some(Color::BLACK);
            view.timer_seconds = 0;
        });
    }

    pub fn set_timer_seconds(&mut self, seconds: u64) {
        self.update(|view| view.timer_seconds = seconds);
    }

    fn update<F>(&mut self, updater: F)
    where
        F: FnOnce(&mut MirrorView),
    {
        updater(&mut self.view);
    }
}

impl Default for DeviceMirror {
    fn default() -> Self {
        Self::new()
    }
}
