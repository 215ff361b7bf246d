//! Controller event loop
//!
//! The only place where time passes and requests leave the process. One task
//! owns the [`SyncController`] and multiplexes the startup fetch, UI events and
//! the 1 Hz ticker, so no controller state is shared or locked. Writes go
//! through a single push task and reach the device in the order issued.

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    device::{DeviceApi, DeviceError},
    engine::{Command, RenderState, SyncController, UiEvent},
};

/// Period of the countdown ticker
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const EVENT_QUEUE_DEPTH: usize = 64;

/// Cloneable access to a running controller loop
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    events_tx: mpsc::Sender<UiEvent>,
    render_rx: watch::Receiver<RenderState>,
}

impl ControllerHandle {
    /// Queue a UI event; returns once the loop has accepted it
    pub async fn send(&self, event: UiEvent) -> Result<(), String> {
        self.events_tx
            .send(event)
            .await
            .map_err(|e| format!("Controller loop is gone: {}", e))
    }

    /// Latest rendered state
    pub fn view(&self) -> RenderState {
        self.render_rx.borrow().clone()
    }

    /// Receiver that wakes on every render
    pub fn subscribe(&self) -> watch::Receiver<RenderState> {
        self.render_rx.clone()
    }
}

/// Spawn the controller loop and return a handle to it.
///
/// The loop stops once every handle has been dropped.
pub fn spawn_controller(
    controller: SyncController,
    device: Arc<dyn DeviceApi>,
) -> (ControllerHandle, JoinHandle<()>) {
    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
    let render_rx = controller.subscribe();
    let task = tokio::spawn(controller_task(controller, device, events_rx));

    (ControllerHandle { events_tx, render_rx }, task)
}

/// Run the controller until the UI event channel closes
pub async fn controller_task(
    mut controller: SyncController,
    device: Arc<dyn DeviceApi>,
    mut events_rx: mpsc::Receiver<UiEvent>,
) {
    info!("Starting controller task");

    let startup_device = Arc::clone(&device);
    let mut startup = tokio::spawn(async move { startup_device.get_state().await });
    let mut startup_pending = true;
    let mut ticker: Option<Interval> = None;

    let (push_tx, push_rx) = mpsc::unbounded_channel();
    let pusher = tokio::spawn(push_task(Arc::clone(&device), push_rx));

    loop {
        tokio::select! {
            joined = &mut startup, if startup_pending => {
                startup_pending = false;
                let fetched = joined.unwrap_or_else(|e| {
                    Err(DeviceError::Transport(format!("startup fetch did not complete: {}", e)))
                });
                let commands = controller.reconcile(fetched, Instant::now());
                run_commands(commands, &push_tx, &mut ticker);
            }

            event = events_rx.recv() => {
                match event {
                    Some(event) => {
                        let commands = controller.dispatch(event, Instant::now());
                        run_commands(commands, &push_tx, &mut ticker);
                    }
                    None => {
                        info!("UI event channel closed, stopping controller task");
                        break;
                    }
                }
            }

            _ = next_tick(&mut ticker) => {
                let commands = controller.on_tick(Instant::now());
                run_commands(commands, &push_tx, &mut ticker);
            }
        }
    }

    if startup_pending {
        startup.abort();
    }

    // queued writes still drain
    drop(push_tx);
    if let Err(e) = pusher.await {
        warn!("Push task ended abnormally: {}", e);
    }
}

/// Wait for the ticker, or forever when none is running
async fn next_tick(ticker: &mut Option<Interval>) -> Instant {
    match ticker {
        Some(interval) => interval.tick().await,
        None => std::future::pending().await,
    }
}

fn new_ticker() -> Interval {
    // the arm transition already rendered the first value
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

fn run_commands(
    commands: Vec<Command>,
    push_tx: &mpsc::UnboundedSender<Command>,
    ticker: &mut Option<Interval>,
) {
    for command in commands {
        match command {
            Command::StartTicker => {
                if ticker.is_some() {
                    debug!("Replacing running ticker");
                }
                *ticker = Some(new_ticker());
            }
            Command::StopTicker => {
                *ticker = None;
            }
            push => {
                if push_tx.send(push).is_err() {
                    warn!("Push task is gone, dropping {:?}", push);
                }
            }
        }
    }
}

/// Send writes one at a time; failures are logged and dropped
async fn push_task(device: Arc<dyn DeviceApi>, mut push_rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = push_rx.recv().await {
        debug!("Pushing {:?} to device", command);
        let result = match command {
            Command::PushColor(color) => device.set_color(color).await,
            Command::PushEffect(effect) => device.set_effect(effect).await,
            Command::PushTimer(seconds) => device.set_timer(seconds).await,
            Command::StartTicker | Command::StopTicker => Ok(()),
        };
        if let Err(e) = result {
            warn!("Device write {:?} failed, local state stays authoritative: {}", command, e);
        }
    }
    debug!("Push queue closed");
}
