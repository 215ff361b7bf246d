//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::device::Dialect;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "wifirgb-remote")]
#[command(about = "Controller for a networked RGB light with a shutdown countdown")]
#[command(version)]
pub struct Config {
    /// Base URL of the light's control surface
    #[arg(short, long, default_value = "http://wifirgb.local")]
    pub device: String,

    /// Endpoint set the device firmware speaks
    #[arg(long, value_enum, default_value_t = Dialect::Unified)]
    pub dialect: Dialect,

    /// Port to serve the UI surface on
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Largest value of the timer slider, in minutes
    #[arg(long, default_value = "120")]
    pub slider_max: u64,

    /// Timeout for a single device request, in seconds
    #[arg(long, default_value = "5")]
    pub request_timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.max(1))
    }
}
