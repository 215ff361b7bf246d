//! Countdown engine: the Idle/Armed state machine behind the shutdown timer
//!
//! The displayed countdown is recomputed from a local deadline on every tick,
//! never decremented, so late or skipped ticks cannot accumulate error.

use tokio::time::Instant;
use tracing::{debug, info};

use super::Command;
use crate::state::{clamp_timer_seconds, TimerSlider, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    Idle,
    Armed,
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is counting down
    Idle,
    /// Still armed; `remaining` whole seconds left
    Counting { remaining: i64 },
    /// The deadline passed and the engine went back to Idle
    Expired(Vec<Command>),
}

#[derive(Debug, Clone)]
pub struct CountdownEngine {
    timer: TimerState,
    slider: TimerSlider,
}

impl CountdownEngine {
    pub fn new(slider_max: u64) -> Self {
        Self {
            timer: TimerState::idle(),
            slider: TimerSlider::resting(slider_max),
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        if self.timer.is_armed() {
            CountdownPhase::Armed
        } else {
            CountdownPhase::Idle
        }
    }

    pub fn is_armed(&self) -> bool {
        self.phase() == CountdownPhase::Armed
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn slider(&self) -> &TimerSlider {
        &self.slider
    }

    pub fn remaining_seconds(&self, now: Instant) -> i64 {
        self.timer.remaining_seconds(now)
    }

    /// Slider drag: only the candidate minutes change
    pub fn set_candidate(&mut self, minutes: u64) -> bool {
        self.slider.set_candidate(minutes)
    }

    /// Timer button: arm from the slider when idle, disarm when armed
    pub fn press(&mut self, now: Instant) -> Vec<Command> {
        match self.phase() {
            CountdownPhase::Idle => self.arm(self.slider.value.saturating_mul(60), now),
            CountdownPhase::Armed => self.disarm(),
        }
    }

    /// Start a fresh countdown of `seconds` and tell the device once.
    /// A zero duration is ignored. Arming while armed restarts the countdown.
    pub fn arm(&mut self, seconds: u64, now: Instant) -> Vec<Command> {
        let seconds = clamp_timer_seconds(seconds);
        if seconds == 0 {
            debug!("Ignoring arm request with zero duration");
            return Vec::new();
        }
        info!("Arming shutdown countdown for {}s", seconds);
        vec![Command::PushTimer(seconds), self.start(seconds, now)]
    }

    /// Enter Armed from a value the device already holds; nothing is pushed back
    pub fn resume(&mut self, seconds: u64, now: Instant) -> Vec<Command> {
        let seconds = clamp_timer_seconds(seconds);
        if seconds == 0 {
            return Vec::new();
        }
        info!("Resuming device countdown with {}s left", seconds);
        vec![self.start(seconds, now)]
    }

    /// Recompute the remaining time from the deadline
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if !self.is_armed() {
            return TickOutcome::Idle;
        }
        let remaining = self.timer.remaining_seconds(now);
        if remaining <= 0 {
            return TickOutcome::Expired(self.expire());
        }
        debug!("Countdown tick: {}s remaining", remaining);
        self.slider.show_remaining(remaining);
        TickOutcome::Counting { remaining }
    }

    /// Natural end of the countdown. The device enforces its own deadline,
    /// so nothing is pushed.
    pub fn expire(&mut self) -> Vec<Command> {
        if !self.is_armed() {
            return Vec::new();
        }
        info!("Shutdown countdown expired");
        self.reset();
        vec![Command::StopTicker]
    }

    /// User cancel; a no-op while idle
    pub fn disarm(&mut self) -> Vec<Command> {
        if !self.is_armed() {
            debug!("Disarm requested while idle, nothing to do");
            return Vec::new();
        }
        info!("Disarming shutdown countdown");
        self.reset();
        vec![Command::StopTicker, Command::PushTimer(0)]
    }

    fn start(&mut self, seconds: u64, now: Instant) -> Command {
        self.timer = TimerState::armed(seconds, now);
        self.slider.lock_for_countdown();
        self.slider.show_remaining(self.timer.remaining_seconds(now));
        Command::StartTicker
    }

    fn reset(&mut self) {
        self.timer = TimerState::idle();
        self.slider.reset();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::state::{slider::RESTING_STEP_MINUTES, MAX_TIMER_SECONDS};

    fn engine() -> CountdownEngine {
        CountdownEngine::new(120)
    }

    #[test]
    fn arm_reads_back_full_duration() {
        for seconds in [1, 59, 60, 61, 90, 3_600] {
            let now = Instant::now();
            let mut engine = engine();
            let commands = engine.arm(seconds, now);

            assert_eq!(commands, vec![Command::PushTimer(seconds), Command::StartTicker]);
            assert_eq!(engine.remaining_seconds(now), seconds as i64);
            assert_eq!(engine.slider().value, seconds.div_ceil(60));
            assert!(engine.slider().disabled);
        }
    }

    #[test]
    fn arm_with_zero_is_ignored() {
        let mut engine = engine();
        assert!(engine.arm(0, Instant::now()).is_empty());
        assert_eq!(engine.phase(), CountdownPhase::Idle);
    }

    #[test]
    fn disarm_while_idle_does_nothing() {
        let mut engine = engine();
        assert!(engine.disarm().is_empty());
        assert!(engine.disarm().is_empty());
        assert_eq!(engine.phase(), CountdownPhase::Idle);
    }

    #[test]
    fn disarm_cancels_on_device() {
        let mut engine = engine();
        engine.arm(300, Instant::now());
        assert_eq!(engine.disarm(), vec![Command::StopTicker, Command::PushTimer(0)]);
        assert_eq!(*engine.slider(), TimerSlider::resting(120));
        assert_eq!(*engine.timer(), TimerState::idle());
    }

    #[test]
    fn arming_twice_restarts_single_countdown() {
        let now = Instant::now();
        let mut engine = engine();
        engine.arm(600, now);
        let later = now + Duration::from_secs(100);
        let commands = engine.arm(120, later);

        assert_eq!(commands, vec![Command::PushTimer(120), Command::StartTicker]);
        assert_eq!(engine.remaining_seconds(later), 120);
        assert_eq!(engine.timer().server_seconds, 120);
    }

    #[test]
    fn resume_does_not_push() {
        let now = Instant::now();
        let mut engine = engine();
        assert_eq!(engine.resume(90, now), vec![Command::StartTicker]);
        assert!(engine.is_armed());
        assert_eq!(engine.slider().value, 2);
        assert!(engine.resume(0, now).is_empty());
    }

    #[test]
    fn oversized_durations_are_capped() {
        let now = Instant::now();
        let mut engine = engine();
        assert_eq!(engine.resume(u64::MAX, now), vec![Command::StartTicker]);
        assert_eq!(engine.timer().server_seconds, MAX_TIMER_SECONDS);
        assert!(engine.is_armed());

        assert_eq!(
            engine.arm(u64::MAX, now),
            vec![Command::PushTimer(MAX_TIMER_SECONDS), Command::StartTicker]
        );
        assert_eq!(engine.press(now), vec![Command::StopTicker, Command::PushTimer(0)]);
        assert_eq!(engine.phase(), CountdownPhase::Idle);
    }

    #[test]
    fn tick_tracks_deadline() {
        let now = Instant::now();
        let mut engine = engine();
        engine.arm(180, now);

        let outcome = engine.tick(now + Duration::from_secs(61));
        assert_eq!(outcome, TickOutcome::Counting { remaining: 119 });
        assert_eq!(engine.slider().value, 2);
    }

    #[test]
    fn delayed_tick_does_not_compound() {
        let now = Instant::now();
        let mut engine = engine();
        engine.arm(30, now);

        engine.tick(now + Duration::from_secs(1));
        // two periods pass without a tick
        let outcome = engine.tick(now + Duration::from_millis(3_900));
        assert_eq!(outcome, TickOutcome::Counting { remaining: 26 });
    }

    #[test]
    fn tick_past_deadline_expires() {
        let now = Instant::now();
        let mut engine = engine();
        engine.set_candidate(1);
        engine.arm(60, now);

        let outcome = engine.tick(now + Duration::from_secs(60));
        assert_eq!(outcome, TickOutcome::Expired(vec![Command::StopTicker]));
        assert_eq!(engine.phase(), CountdownPhase::Idle);
        assert_eq!(engine.slider().value, 0);
        assert_eq!(engine.slider().step, RESTING_STEP_MINUTES);
        assert!(!engine.slider().disabled);
        assert_eq!(engine.tick(now + Duration::from_secs(61)), TickOutcome::Idle);
    }

    #[test]
    fn press_toggles_between_states() {
        let now = Instant::now();
        let mut engine = engine();
        assert!(engine.press(now).is_empty());

        engine.set_candidate(10);
        assert_eq!(
            engine.press(now),
            vec![Command::PushTimer(600), Command::StartTicker]
        );
        assert_eq!(
            engine.press(now + Duration::from_secs(5)),
            vec![Command::StopTicker, Command::PushTimer(0)]
        );
        assert!(!engine.is_armed());
    }

    #[test]
    fn slider_is_locked_while_armed() {
        let now = Instant::now();
        let mut engine = engine();
        engine.set_candidate(20);
        engine.press(now);
        assert!(!engine.set_candidate(5));
        assert_eq!(engine.slider().value, 20);
    }
}
