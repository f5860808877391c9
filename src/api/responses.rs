//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::{InputError, TimerError},
    input::{Direction, TimeField},
    state::Snapshot,
};

/// Body of `POST /duration`; each field is raw text, missing means blank
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DurationRequest {
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub minutes: String,
    #[serde(default)]
    pub seconds: String,
}

/// Body of `POST /adjust/:field`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustRequest {
    #[serde(default)]
    pub value: String,
    pub direction: Direction,
}

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: Snapshot,
}

impl ApiResponse {
    pub fn new(status: String, message: String, timer: Snapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Response whose status mirrors the timer's status
    pub fn from_snapshot(message: impl Into<String>, timer: Snapshot) -> Self {
        Self::new(timer.status.as_str().to_string(), message.into(), timer)
    }
}

/// Result of stepping a field by one drag notch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustResponse {
    pub field: TimeField,
    pub value: u64,
    pub text: String,
    pub progress: f64,
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: Snapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body returned for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Handler failures and the HTTP status each maps to
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    InvalidInput(#[from] InputError),

    #[error(transparent)]
    Timer(#[from] TimerError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) | ApiError::Timer(TimerError::FieldsLocked) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Timer(TimerError::StatePoisoned) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
