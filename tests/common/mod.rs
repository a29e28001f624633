#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use storerate::router::init_router;
use storerate::state::AppState;
use storerate_auth::{UserRole, create_access_token};
use storerate_config::{CorsConfig, Environment, JwtConfig, ServerConfig};
use storerate_core::password::hash_password_with_cost;

pub const TEST_PASSWORD: &str = "Secret@123";
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub struct TestUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub struct TestStore {
    pub id: i32,
    pub name: String,
    pub email: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        token_expiry: 3600,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::from_list("http://localhost:3000"),
        server_config: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: Environment::Test,
            log_dir: "storage/logs".to_string(),
            metrics_enabled: false,
        },
        metrics_handle: None,
    }
}

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    init_router(test_state(pool))
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts a user directly, hashing with a low bcrypt cost.
pub async fn create_test_user(pool: &PgPool, role: UserRole) -> TestUser {
    create_named_user(pool, "Integration Test Person", &generate_unique_email(), role).await
}

pub async fn create_named_user(pool: &PgPool, name: &str, email: &str, role: UserRole) -> TestUser {
    let hashed = hash_password_with_cost(TEST_PASSWORD, 4).unwrap();

    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (name, email, password, address, role)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(&hashed)
    .bind("42 Test Street")
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        role,
    }
}

pub async fn create_test_store(pool: &PgPool, name: &str, owner_id: Option<i32>) -> TestStore {
    let email = format!("store-{}@test.com", Uuid::new_v4());

    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO stores (name, email, address, owner_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(name)
    .bind(&email)
    .bind("1 Market Square")
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap();

    TestStore {
        id,
        name: name.to_string(),
        email,
    }
}

pub async fn create_test_rating(pool: &PgPool, user_id: i32, store_id: i32, rating: i32) {
    sqlx::query("INSERT INTO ratings (user_id, store_id, rating) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(store_id)
        .bind(rating)
        .execute(pool)
        .await
        .unwrap();
}

pub fn token_for(user: &TestUser) -> String {
    create_access_token(user.id, &user.email, user.role, &user.name, &test_jwt_config()).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
