use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use storerate_core::errors::field_errors_from_validation;
use storerate_core::{AppError, FieldError};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";

/// JSON body extractor that runs `validator` rules before the handler sees
/// the value. Rule failures become a 400 "Validation failed" with one entry
/// per broken rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_to_error)?;

        value.validate().map_err(|errors| {
            let details = field_errors_from_validation(&errors);
            debug!(fields = ?details.iter().map(|d| &d.field).collect::<Vec<_>>(), "Validation failed");
            AppError::validation(details)
        })?;

        Ok(ValidatedJson(value))
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonSyntaxError(_) => AppError::bad_request(INVALID_JSON_MESSAGE),
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("Missing 'Content-Type: application/json' header")
        }
        JsonRejection::JsonDataError(err) => {
            let error_msg = err.body_text();
            match missing_field_name(&error_msg) {
                Some(field) => AppError::validation(vec![FieldError::new(
                    field,
                    format!("{} is required", field),
                )]),
                None => AppError::bad_request("Invalid field type in request"),
            }
        }
        _ => AppError::bad_request("Invalid request body"),
    }
}

fn missing_field_name(error_msg: &str) -> Option<&str> {
    error_msg
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
}

/// Query string extractor whose rejection uses the response envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ListQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                debug!(error = %rejection.body_text(), "Query rejected");
                AppError::bad_request("Invalid query parameters")
            })?;
        Ok(ListQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_name() {
        assert_eq!(
            missing_field_name("Failed to deserialize the JSON body into the target type: missing field `storeId` at line 1 column 13"),
            Some("storeId")
        );
        assert_eq!(missing_field_name("invalid type: string \"x\", expected i32"), None);
    }
}
