//! WiFi RGB remote - controller for a networked RGB light
//!
//! This is the main entry point for the wifirgb-remote application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use wifirgb_remote::{
    api::create_router,
    config::Config,
    device::{DeviceApi, HttpDevice},
    engine::SyncController,
    state::AppState,
    tasks::spawn_controller,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("wifirgb_remote={},tower_http=info", config.log_level()))
        .init();

    info!("Starting wifirgb-remote v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: device={}, dialect={:?}, host={}, port={}, slider_max={}min",
          config.device, config.dialect, config.host, config.port, config.slider_max);

    let device = HttpDevice::new(&config.device, config.dialect, config.request_timeout())?;
    let device_url = device.base_url().to_string();
    let device: Arc<dyn DeviceApi> = Arc::new(device);

    // Start the controller loop; it fetches the device state once on its own
    let controller = SyncController::new(config.slider_max);
    let (handle, controller_task) = spawn_controller(controller, device);

    let state = Arc::new(AppState::new(handle, device_url, config.dialect));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("UI surface running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /view           - Current render state");
    info!("  POST /color/preview  - Preview a colour locally");
    info!("  POST /color/commit   - Commit a colour to the device");
    info!("  POST /effect/:name   - Select an effect");
    info!("  POST /timer/slider   - Move the timer slider");
    info!("  POST /timer/press    - Arm or disarm the shutdown timer");
    info!("  GET  /status         - Status and uptime");
    info!("  GET  /health         - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Signal handling failed: {}", e),
            }
        }
    }

    controller_task.abort();
    info!("Shutdown complete");
    Ok(())
}
