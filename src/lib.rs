//! WiFi RGB remote - keeps a networked light's colour, effect and shutdown
//! countdown in sync with a local controller
//!
//! The device owns the truth; this crate mirrors it, pushes user intent with
//! one request per committed change, and renders the countdown from a local
//! deadline between device round-trips.

pub mod api;
pub mod config;
pub mod device;
pub mod engine;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use device::{DeviceApi, DeviceError, Dialect, HttpDevice};
pub use engine::{Command, RenderState, SyncController, UiEvent};
pub use state::{AppState, Color, Effect};
pub use utils::signals::shutdown_signal;
