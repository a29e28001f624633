use axum::{
    Json,
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use storerate_core::{ApiResponse, ErrorDetail};

/// Rewrites 5xx envelopes to carry the underlying error message.
///
/// Only mounted in development; elsewhere clients see the generic message.
pub async fn expose_error_details(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    let (_, body) = Json(ApiResponse::<()>::failure(detail, Vec::new()))
        .into_response()
        .into_parts();

    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use http_body_util::BodyExt;
    use storerate_core::AppError;
    use storerate_core::errors::INTERNAL_ERROR_MESSAGE;
    use tower::ServiceExt;

    fn app(expose: bool) -> Router {
        let router = Router::new()
            .route("/boom", get(|| async { AppError::internal_error("pool timed out") }))
            .route("/missing", get(|| async { AppError::not_found("Store not found") }));
        if expose {
            router.layer(middleware::from_fn(expose_error_details))
        } else {
            router
        }
    }

    async fn message(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(axum::http::Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_server_error_detail_exposed() {
        let (status, body) = message(app(true), "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "pool timed out");
        assert_eq!(body["errors"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_server_error_detail_hidden_without_layer() {
        let (_, body) = message(app(false), "/boom").await;
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_client_errors_untouched() {
        let (status, body) = message(app(true), "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Store not found");
    }
}
