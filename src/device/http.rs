//! HTTP implementation of the device control surface

use std::time::Duration;

use async_trait::async_trait;
use clap::ValueEnum;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    wire::{ColorPayload, EffectPayload, StatePayload, TimerPayload},
    DeviceApi, DeviceError, DeviceSnapshot,
};
use crate::state::{Color, Effect};

/// Which set of endpoints the device firmware exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `GET /state`, `POST /color`, `POST /effect`, `POST /timer`
    #[default]
    Unified,
    /// `GET /rgb` + `GET /timer`, `POST /rgb`, `POST /<effect>`, `POST /timer`
    Legacy,
}

impl Dialect {
    fn color_path(self) -> &'static str {
        match self {
            Dialect::Unified => "/color",
            Dialect::Legacy => "/rgb",
        }
    }
}

/// Where an effect selection travels: in the path or in the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectRequest {
    pub path: String,
    pub body: Option<EffectPayload>,
}

/// Encode an effect selection for `dialect`
pub fn effect_request(dialect: Dialect, effect: Effect) -> EffectRequest {
    match dialect {
        Dialect::Unified => EffectRequest {
            path: "/effect".to_string(),
            body: Some(effect.into()),
        },
        Dialect::Legacy => EffectRequest {
            path: format!("/{}", effect.name()),
            body: None,
        },
    }
}

/// Device reached over plain HTTP
#[derive(Debug, Clone)]
pub struct HttpDevice {
    client: Client,
    base: String,
    dialect: Dialect,
}

impl HttpDevice {
    /// Create a client for the device at `base_url`
    pub fn new(base_url: &str, dialect: Dialect, timeout: Duration) -> Result<Self, DeviceError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| DeviceError::Transport(format!("invalid device URL {}: {}", base_url, e)))?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base: parsed.as_str().trim_end_matches('/').to_string(),
            dialect,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, DeviceError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<T>(&self, path: &str, body: &T) -> Result<(), DeviceError>
    where
        T: Serialize + ?Sized,
    {
        debug!("POST {}", path);
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn post_empty(&self, path: &str) -> Result<(), DeviceError> {
        debug!("POST {} (empty body)", path);
        self.client
            .post(self.url(path))
            .body("")
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl DeviceApi for HttpDevice {
    async fn get_state(&self) -> Result<DeviceSnapshot, DeviceError> {
        match self.dialect {
            Dialect::Unified => {
                let payload: StatePayload = self.get_json("/state").await?;
                Ok(payload.into())
            }
            Dialect::Legacy => {
                let color: ColorPayload = self.get_json("/rgb").await?;
                let timer: TimerPayload = self.get_json("/timer").await?;
                Ok(DeviceSnapshot {
                    color: Some(color.into()),
                    effect: None,
                    timer_seconds: timer.seconds(),
                })
            }
        }
    }

    async fn set_color(&self, color: Color) -> Result<(), DeviceError> {
        self.post_json(self.dialect.color_path(), &ColorPayload::from(color))
            .await
    }

    async fn set_effect(&self, effect: Effect) -> Result<(), DeviceError> {
        let request = effect_request(self.dialect, effect);
        match request.body {
            Some(body) => self.post_json(&request.path, &body).await,
            None => self.post_empty(&request.path).await,
        }
    }

    async fn set_timer(&self, seconds: u64) -> Result<(), DeviceError> {
        self.post_json("/timer", &TimerPayload::new(seconds)).await
    }
}
