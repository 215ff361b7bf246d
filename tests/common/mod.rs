#![allow(dead_code)]

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use tokio::sync::watch;
use wifirgb_remote::{
    device::{DeviceApi, DeviceError, DeviceSnapshot},
    engine::RenderState,
    state::{Color, Effect},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    GetState,
    SetColor(Color),
    SetEffect(Effect),
    SetTimer(u64),
}

/// In-memory device that records every call once it completes
#[derive(Debug)]
pub struct RecordingDevice {
    snapshot: Result<DeviceSnapshot, DeviceError>,
    calls: Mutex<Vec<DeviceCall>>,
    fetch_delay: Duration,
    arm_delay: Duration,
}

impl RecordingDevice {
    pub fn with_snapshot(snapshot: DeviceSnapshot) -> Self {
        Self::answering(Ok(snapshot))
    }

    fn answering(snapshot: Result<DeviceSnapshot, DeviceError>) -> Self {
        Self {
            snapshot,
            calls: Mutex::new(Vec::new()),
            fetch_delay: Duration::ZERO,
            arm_delay: Duration::ZERO,
        }
    }

    /// Answer `get_state` only after `delay`
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Complete non-zero `set_timer` calls only after `delay`
    pub fn with_arm_delay(mut self, delay: Duration) -> Self {
        self.arm_delay = delay;
        self
    }

    pub fn idle() -> Self {
        Self::with_snapshot(DeviceSnapshot {
            color: Some(Color::new(255, 255, 255)),
            effect: Some(Effect::Off),
            timer_seconds: 0,
        })
    }

    pub fn unreachable() -> Self {
        Self::answering(Err(DeviceError::Transport("connection refused".to_string())))
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<DeviceCall> {
        self.calls()
            .into_iter()
            .filter(|call| *call != DeviceCall::GetState)
            .collect()
    }

    fn record(&self, call: DeviceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DeviceApi for RecordingDevice {
    async fn get_state(&self) -> Result<DeviceSnapshot, DeviceError> {
        tokio::time::sleep(self.fetch_delay).await;
        self.record(DeviceCall::GetState);
        self.snapshot.clone()
    }

    async fn set_color(&self, color: Color) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetColor(color));
        Ok(())
    }

    async fn set_effect(&self, effect: Effect) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetEffect(effect));
        Ok(())
    }

    async fn set_timer(&self, seconds: u64) -> Result<(), DeviceError> {
        if seconds > 0 {
            tokio::time::sleep(self.arm_delay).await;
        }
        self.record(DeviceCall::SetTimer(seconds));
        Ok(())
    }
}

/// Wait until a rendered state satisfies `done`
pub async fn wait_for<F>(rx: &mut watch::Receiver<RenderState>, mut done: F) -> RenderState
where
    F: FnMut(&RenderState) -> bool,
{
    tokio::time::timeout(Duration::from_secs(3_600), async {
        loop {
            let view = rx.borrow_and_update().clone();
            if done(&view) {
                return view;
            }
            rx.changed().await.expect("controller stopped rendering");
        }
    })
    .await
    .expect("expected render never happened")
}
