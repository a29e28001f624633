//! The uniform JSON envelope wrapped around every response.
//!
//! ```json
//! { "success": true, "message": "...", "data": { ... }, "timestamp": "2025-01-01T00:00:00Z" }
//! { "success": false, "message": "...", "errors": [ ... ], "timestamp": "2025-01-01T00:00:00Z" }
//! ```

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{AppError, FieldError};

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
            timestamp: Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload, e.g. after a password change.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            errors: None,
            timestamp: Utc::now(),
        }
    }
}

/// Handler return type for the common `200 OK` + envelope case.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Wraps `data` in a successful envelope.
pub fn ok<T>(message: impl Into<String>, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(message, data))
}
