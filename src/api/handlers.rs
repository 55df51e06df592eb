//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info};

use crate::state::AppState;

use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start - Begin the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok((timer, true)) => {
            info!("Start endpoint called - countdown running");
            Ok(Json(ApiResponse::applied(
                "Countdown started".to_string(),
                timer,
            )))
        }
        Ok((timer, false)) => {
            debug!("Start endpoint ignored outside idle state");
            Ok(Json(ApiResponse::ignored(
                "Start is only valid while idle".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Freeze the countdown
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause() {
        Ok((timer, true)) => {
            info!("Pause endpoint called - countdown frozen at {}", timer.clock);
            Ok(Json(ApiResponse::applied(
                "Countdown paused".to_string(),
                timer,
            )))
        }
        Ok((timer, false)) => {
            debug!("Pause endpoint ignored outside running state");
            Ok(Json(ApiResponse::ignored(
                "Pause is only valid while running".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to pause countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /resume - Continue a paused countdown
pub async fn resume_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.resume() {
        Ok((timer, true)) => {
            info!("Resume endpoint called - countdown running");
            Ok(Json(ApiResponse::applied(
                "Countdown resumed".to_string(),
                timer,
            )))
        }
        Ok((timer, false)) => {
            debug!("Resume endpoint ignored outside paused state");
            Ok(Json(ApiResponse::ignored(
                "Resume is only valid while paused".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to resume countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /cancel - Abandon the countdown and return to idle
pub async fn cancel_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.cancel() {
        Ok((timer, true)) => {
            info!("Cancel endpoint called - timer idle");
            Ok(Json(ApiResponse::applied(
                "Countdown cancelled".to_string(),
                timer,
            )))
        }
        Ok((timer, false)) => {
            debug!("Cancel endpoint ignored while already idle");
            Ok(Json(ApiResponse::ignored(
                "Cancel is only valid while running or paused".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to cancel countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /phase/:phase_index/increment - Lengthen a phase by one minute
pub async fn phase_increment_handler(
    State(state): State<Arc<AppState>>,
    Path(phase_index): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    adjust_phase(state, phase_index, 1).await
}

/// Handle POST /phase/:phase_index/decrement - Shorten a phase by one minute
pub async fn phase_decrement_handler(
    State(state): State<Arc<AppState>>,
    Path(phase_index): Path<usize>,
) -> Result<Json<ApiResponse>, StatusCode> {
    adjust_phase(state, phase_index, -1).await
}

async fn adjust_phase(
    state: Arc<AppState>,
    phase_index: usize,
    delta_minutes: i64,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.adjust_length(phase_index, delta_minutes) {
        Ok((timer, true)) => {
            info!(
                "Phase {} length adjusted by {:+} minute(s)",
                phase_index, delta_minutes
            );
            let message = format!(
                "{} length set to {} minute(s)",
                timer.phases[phase_index].name, timer.phases[phase_index].minutes
            );
            Ok(Json(ApiResponse::applied(message, timer)))
        }
        Ok((timer, false)) => {
            debug!("Length adjustment ignored for phase {}", phase_index);
            Ok(Json(ApiResponse::ignored(
                "Lengths adjust only while idle, for known phases, within 1-60 minutes"
                    .to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to adjust phase length: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current timer snapshot and server metadata
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.current_snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        alarm: state.alarm_label.clone(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
