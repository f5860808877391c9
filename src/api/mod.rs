//! HTTP API module
//!
//! A thin JSON adapter that lets a front-end forward timer intents and read
//! or stream snapshots.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/duration", post(duration_handler))
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/reset", post(reset_handler))
        .route("/reload", post(reload_handler))
        .route("/adjust/:field", post(adjust_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
