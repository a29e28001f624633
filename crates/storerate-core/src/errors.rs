//! Application error type and its HTTP mapping.
//!
//! Every failure that leaves a handler is an [`AppError`]. The status code
//! selects the kind (validation, unauthorized, forbidden, not found, conflict,
//! internal) and the response body is always the standard
//! [`ApiResponse`](crate::response::ApiResponse) envelope with
//! `success: false`.
//!
//! Internal errors are logged with their full cause chain and reach the
//! client only as `"Internal Server Error"`. The real message travels with the
//! response as an [`ErrorDetail`] extension so an outer layer can put it back
//! in the body, which the server does in development.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::response::ApiResponse;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// Message of a server error, attached to its response extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetail(pub String);

/// A single field-level problem reported alongside a validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<serde_json::Value>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub details: Vec<FieldError>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            details: Vec::new(),
        }
    }

    fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, Error::msg(message.into()))
    }

    pub fn validation(details: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: Error::msg(VALIDATION_FAILED_MESSAGE),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::CONFLICT, message)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Message as it will appear in the response envelope.
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(status = %self.status.as_u16(), error = ?self.error, "Request failed with server error");
        } else {
            debug!(status = %self.status.as_u16(), error = %self.error, "Request rejected");
        }

        let body = ApiResponse::<()>::failure(self.public_message(), self.details);
        let mut response = (self.status, Json(body)).into_response();
        if self.status.is_server_error() {
            response
                .extensions_mut()
                .insert(ErrorDetail(self.error.to_string()));
        }
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// Flattens `validator` output into the envelope's field list.
///
/// Field names are reported in the camelCase used on the wire and sorted so
/// the order is stable. Submitted values are echoed back except for password
/// fields.
pub fn field_errors_from_validation(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            let wire_name = to_camel_case(field);
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", wire_name));
                let value = if wire_name.to_lowercase().contains("password") {
                    None
                } else {
                    error.params.get("value").cloned()
                };
                FieldError {
                    field: wire_name.clone(),
                    message,
                    value,
                }
            })
        })
        .collect();

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::ValidationError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let response = AppError::not_found("Store not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Store not found");
        assert!(body["errors"].as_array().unwrap().is_empty());
        assert!(body.get("data").is_none());
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_internal_error_message_is_hidden_by_default() {
        let response = AppError::internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(
            response.extensions().get::<ErrorDetail>(),
            Some(&ErrorDetail("connection refused".to_string()))
        );

        let body = body_json(response).await;
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_client_errors_carry_no_detail() {
        let response = AppError::conflict("User with this email already exists").into_response();
        assert!(response.extensions().get::<ErrorDetail>().is_none());
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let err = AppError::validation(vec![FieldError::new("email", "Please provide a valid email address")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], VALIDATION_FAILED_MESSAGE);
        assert_eq!(body["errors"][0]["field"], "email");
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(AppError::conflict("dup").status, StatusCode::CONFLICT);
        assert_eq!(AppError::forbidden("no").status, StatusCode::FORBIDDEN);
        assert_eq!(AppError::unauthorized("no").status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_field_errors_use_wire_names_and_hide_passwords() {
        let mut errors = ValidationErrors::new();

        let mut email_error = ValidationError::new("email");
        email_error.message = Some("Please provide a valid email address".into());
        email_error.add_param("value".into(), &"not-an-email");
        errors.add("email", email_error);

        let mut password_error = ValidationError::new("password_strength");
        password_error.message = Some("too weak".into());
        password_error.add_param("value".into(), &"abc");
        errors.add("new_password", password_error);

        let details = field_errors_from_validation(&errors);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].field, "email");
        assert_eq!(details[0].value, Some(serde_json::json!("not-an-email")));
        assert_eq!(details[1].field, "newPassword");
        assert_eq!(details[1].value, None);
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("store_id"), "storeId");
        assert_eq!(to_camel_case("confirm_password"), "confirmPassword");
        assert_eq!(to_camel_case("name"), "name");
    }
}
