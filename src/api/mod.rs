//! HTTP API module
//!
//! The UI-facing surface: colour, effect and timer events in, render state out.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/view", get(view_handler))
        .route("/color/preview", post(color_preview_handler))
        .route("/color/commit", post(color_commit_handler))
        .route("/effect/:name", post(effect_handler))
        .route("/timer/slider", post(timer_slider_handler))
        .route("/timer/press", post(timer_press_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
