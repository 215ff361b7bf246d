//! Synchronization controller: startup reconciliation and user intent
//!
//! Owns the mirror and the countdown engine. Every entry point is synchronous
//! and returns the commands the loop must run, so the whole flow can be
//! exercised without a runtime or a device.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{sync::watch, time::Instant};
use tracing::{debug, info, warn};

use super::{Command, CountdownEngine, TickOutcome};
use crate::{
    device::{DeviceError, DeviceSnapshot},
    state::{Color, DeviceMirror, Effect, TimerSlider},
};

/// Input from the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Picker is being dragged
    ColorPreview(Color),
    /// Picker released
    ColorCommitted(Color),
    EffectSelected(Effect),
    TimerSliderMoved(u64),
    TimerArmPressed,
}

/// Outcome of the startup state fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SyncStatus {
    Pending,
    Synced { at: DateTime<Utc> },
    Failed { reason: String },
}

/// Everything the UI needs to draw itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderState {
    pub color: Option<Color>,
    pub preview: Option<Color>,
    pub active_effect: Option<Effect>,
    pub armed: bool,
    pub remaining_display_minutes: u64,
    pub slider: TimerSlider,
    pub device_sync: SyncStatus,
}

#[derive(Debug)]
pub struct SyncController {
    mirror: DeviceMirror,
    countdown: CountdownEngine,
    sync: SyncStatus,
    render_tx: watch::Sender<RenderState>,
}

impl SyncController {
    pub fn new(slider_max: u64) -> Self {
        let mirror = DeviceMirror::new();
        let countdown = CountdownEngine::new(slider_max);
        let initial = build_render(&mirror, &countdown, &SyncStatus::Pending);
        let (render_tx, _) = watch::channel(initial);

        Self {
            mirror,
            countdown,
            sync: SyncStatus::Pending,
            render_tx,
        }
    }

    /// Render callback: receives a fresh `RenderState` after every change
    pub fn subscribe(&self) -> watch::Receiver<RenderState> {
        self.render_tx.subscribe()
    }

    pub fn mirror(&self) -> &DeviceMirror {
        &self.mirror
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    pub fn sync_status(&self) -> &SyncStatus {
        &self.sync
    }

    /// Apply the result of the one startup `get_state`.
    ///
    /// A device-side countdown is resumed rather than re-armed, so nothing is
    /// pushed back. On failure local defaults stay in place.
    pub fn reconcile(
        &mut self,
        fetched: Result<DeviceSnapshot, DeviceError>,
        now: Instant,
    ) -> Vec<Command> {
        if self.sync != SyncStatus::Pending {
            warn!("Startup reconciliation already ran, ignoring another result");
            return Vec::new();
        }

        let commands = match fetched {
            Ok(snapshot) => {
                info!(
                    "Device state fetched: color={:?}, effect={:?}, timer={}s",
                    snapshot.color, snapshot.effect, snapshot.timer_seconds
                );
                self.mirror.apply_remote(&snapshot);
                self.sync = SyncStatus::Synced { at: Utc::now() };
                let commands = self.countdown.resume(snapshot.timer_seconds, now);
                self.sync_timer_seconds();
                commands
            }
            Err(e) => {
                warn!("Failed to fetch device state, keeping defaults: {}", e);
                self.sync = SyncStatus::Failed {
                    reason: e.to_string(),
                };
                Vec::new()
            }
        };

        self.publish();
        commands
    }

    /// Route one UI event to its transition
    pub fn dispatch(&mut self, event: UiEvent, now: Instant) -> Vec<Command> {
        debug!("Dispatching UI event: {:?}", event);
        let commands = match event {
            UiEvent::ColorPreview(color) => {
                self.mirror.preview_color(color);
                Vec::new()
            }
            UiEvent::ColorCommitted(color) => {
                self.mirror.commit_color(color);
                vec![Command::PushColor(color)]
            }
            UiEvent::EffectSelected(effect) => {
                self.mirror.set_active_effect(effect);
                vec![Command::PushEffect(effect)]
            }
            UiEvent::TimerSliderMoved(minutes) => {
                if !self.countdown.set_candidate(minutes) {
                    debug!("Slider is locked by a running countdown");
                }
                Vec::new()
            }
            UiEvent::TimerArmPressed => self.countdown.press(now),
        };

        self.sync_timer_seconds();
        self.publish();
        commands
    }

    /// One ticker period elapsed
    pub fn on_tick(&mut self, now: Instant) -> Vec<Command> {
        let commands = match self.countdown.tick(now) {
            TickOutcome::Idle => Vec::new(),
            TickOutcome::Counting { .. } => Vec::new(),
            TickOutcome::Expired(commands) => {
                self.mirror.force_off();
                commands
            }
        };

        self.publish();
        commands
    }

    pub fn render(&self) -> RenderState {
        build_render(&self.mirror, &self.countdown, &self.sync)
    }

    fn sync_timer_seconds(&mut self) {
        let seconds = self.countdown.timer().server_seconds;
        if self.mirror.view().timer_seconds != seconds {
            self.mirror.set_timer_seconds(seconds);
        }
    }

    fn publish(&self) {
        self.render_tx.send_replace(self.render());
    }
}

fn build_render(mirror: &DeviceMirror, countdown: &CountdownEngine, sync: &SyncStatus) -> RenderState {
    let view = mirror.view();
    let armed = countdown.is_armed();
    RenderState {
        color: view.color,
        preview: view.preview,
        active_effect: view.active_effect,
        armed,
        remaining_display_minutes: if armed { countdown.slider().value } else { 0 },
        slider: *countdown.slider(),
        device_sync: sync.clone(),
    }
}
