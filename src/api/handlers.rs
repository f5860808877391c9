//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tracing::{error, info, warn};

use super::responses::{
    AdjustRequest, AdjustResponse, ApiError, ApiResponse, DurationRequest, HealthResponse,
    StatusResponse,
};
use crate::{
    error::InputError,
    input::{field_progress, field_text, parse_duration, parse_field, step, TimeField},
    state::{AppState, Snapshot, TimerStatus},
};

/// Reject field edits while the countdown runs
fn ensure_editable(state: &AppState) -> Result<(), ApiError> {
    if state.engine.snapshot()?.status == TimerStatus::Running {
        return Err(ApiError::Conflict(
            "Duration fields are locked while the countdown is running".to_string(),
        ));
    }
    Ok(())
}

/// Handle POST /duration - Validate field text and set the countdown length
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let values = parse_duration(&request.hours, &request.minutes, &request.seconds).map_err(|e| {
        warn!("Rejected duration input: {}", e);
        e
    })?;

    let snapshot = state.apply("duration", |engine| engine.set_fields_if_editable(values))?;
    Ok(Json(ApiResponse::from_snapshot(
        format!("Duration set to {}", snapshot.formatted),
        snapshot,
    )))
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.apply("start", |engine| engine.start()).map_err(|e| {
        error!("Failed to start countdown: {}", e);
        e
    })?;
    info!("Start endpoint called - countdown {}", snapshot.status.as_str());

    let message = if snapshot.status == TimerStatus::Running {
        "Countdown started"
    } else {
        "Nothing on the clock, countdown finished"
    };
    Ok(Json(ApiResponse::from_snapshot(message, snapshot)))
}

/// Handle POST /pause - Suspend the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.apply("pause", |engine| engine.pause()).map_err(|e| {
        error!("Failed to pause countdown: {}", e);
        e
    })?;
    Ok(Json(ApiResponse::from_snapshot("Countdown paused", snapshot)))
}

/// Handle POST /reset - Zero the countdown
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.apply("reset", |engine| engine.reset()).map_err(|e| {
        error!("Failed to reset countdown: {}", e);
        e
    })?;
    Ok(Json(ApiResponse::from_snapshot("Countdown reset", snapshot)))
}

/// Handle POST /reload - Restore the last started duration
pub async fn reload_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.apply("reload", |engine| engine.reload()).map_err(|e| {
        error!("Failed to reload countdown: {}", e);
        e
    })?;

    let message = if snapshot.initial_seconds.is_some() {
        "Countdown reloaded"
    } else {
        "Nothing to reload"
    };
    Ok(Json(ApiResponse::from_snapshot(message, snapshot)))
}

/// Handle POST /adjust/:field - Step one field by a drag notch
pub async fn adjust_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
    Json(request): Json<AdjustRequest>,
) -> Result<Json<AdjustResponse>, ApiError> {
    let field: TimeField = field
        .parse()
        .map_err(|e: InputError| ApiError::NotFound(e.to_string()))?;
    ensure_editable(&state)?;

    let current = parse_field(field, &request.value)?;
    let value = step(field, current, request.direction);

    Ok(Json(AdjustResponse {
        field,
        value,
        text: field_text(value),
        progress: field_progress(field, value),
    }))
}

/// Handle GET /status - Return the timer snapshot and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let timer = state.engine.snapshot().map_err(|e| {
        error!("Failed to get timer snapshot: {}", e);
        e
    })?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

fn snapshot_event(snapshot: &Snapshot) -> Event {
    Event::default()
        .event("snapshot")
        .json_data(snapshot)
        .unwrap_or_else(|e| {
            warn!("Failed to encode snapshot event: {}", e);
            Event::default().comment("encoding failed")
        })
}

/// Handle GET /events - Stream a snapshot on every change, current one first
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.engine.subscribe();
    let current = rx.borrow_and_update().clone();

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let snapshot = rx.borrow_and_update().clone();
        Some((snapshot, rx))
    });

    let stream = stream::once(async move { current })
        .chain(updates)
        .map(|snapshot| Ok(snapshot_event(&snapshot)));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
