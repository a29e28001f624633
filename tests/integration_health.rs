mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{body_json, create_test_user, get, setup_test_app, token_for};
use storerate_auth::UserRole;

#[sqlx::test(migrations = "./migrations")]
async fn test_health_is_public(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app.oneshot(get("/api/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "OK");
    assert_eq!(body["data"]["environment"], "test");
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["data"].get("role").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_reports_caller_role(pool: PgPool) {
    let owner = create_test_user(&pool, UserRole::StoreOwner).await;
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .clone()
        .oneshot(get("/api/health", Some(&token_for(&owner))))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["role"], "store_owner");

    let response = app
        .oneshot(get("/api/health", Some("garbage")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"].get("role").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_route_uses_envelope(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app.oneshot(get("/api/nope", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route /api/nope not found");
    assert_eq!(body["errors"], serde_json::json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_openapi_document_served(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(get("/api-docs/openapi.json", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"].get("/api/user/ratings").is_some());
    assert!(body["components"]["securitySchemes"].get("bearer_auth").is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_metrics_not_routed_when_disabled(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app.oneshot(get("/metrics", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
