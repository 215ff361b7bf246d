//! HTTP endpoint handlers for the UI surface

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, warn};

use crate::{
    engine::{RenderState, UiEvent},
    state::{AppState, Effect},
};
use super::responses::{ApiResponse, ColorRequest, HealthResponse, SliderRequest, StatusResponse};

type EventReply = Result<(StatusCode, Json<ApiResponse>), StatusCode>;

/// Queue `event` and answer 202 with the current view
async fn submit(state: &AppState, event: UiEvent, message: String) -> EventReply {
    match state.controller.send(event).await {
        Ok(()) => {
            debug!("Queued UI event {:?}", event);
            Ok((
                StatusCode::ACCEPTED,
                Json(ApiResponse::accepted(message, state.controller.view())),
            ))
        }
        Err(e) => {
            error!("Failed to queue UI event: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle GET /view - Current render state
pub async fn view_handler(State(state): State<Arc<AppState>>) -> Json<RenderState> {
    Json(state.controller.view())
}

/// Handle POST /color/preview - Picker dragged, local preview only
pub async fn color_preview_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ColorRequest>,
) -> EventReply {
    let color = request.into();
    submit(&state, UiEvent::ColorPreview(color), "Color preview updated".to_string()).await
}

/// Handle POST /color/commit - Picker released, color sent to the device
pub async fn color_commit_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ColorRequest>,
) -> EventReply {
    let color = request.into();
    submit(&state, UiEvent::ColorCommitted(color), "Color committed".to_string()).await
}

/// Handle POST /effect/:name - Select an effect
pub async fn effect_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> EventReply {
    match name.parse::<Effect>() {
        Ok(effect) => {
            submit(&state, UiEvent::EffectSelected(effect), format!("Effect {} selected", effect)).await
        }
        Err(e) => {
            warn!("Rejected effect selection: {}", e);
            Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e.to_string(), state.controller.view())),
            ))
        }
    }
}

/// Handle POST /timer/slider - Slider dragged
pub async fn timer_slider_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SliderRequest>,
) -> EventReply {
    submit(
        &state,
        UiEvent::TimerSliderMoved(request.minutes),
        format!("Timer slider moved to {} min", request.minutes),
    )
    .await
}

/// Handle POST /timer/press - Timer button pressed
pub async fn timer_press_handler(State(state): State<Arc<AppState>>) -> EventReply {
    submit(&state, UiEvent::TimerArmPressed, "Timer button pressed".to_string()).await
}

/// Handle GET /status - Render state plus process metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        view: state.controller.view(),
        uptime: state.get_uptime(),
        device_url: state.device_url.clone(),
        dialect: state.dialect,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
