use axum::{Router, routing::get};

use super::controller::{
    create_store, create_user, get_dashboard, get_stores, get_user_by_id, get_users,
};
use crate::state::AppState;

/// Routes under `/api/admin`. The caller applies the system-admin layer.
pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/users", get(get_users).post(create_user))
        .route("/users/{id}", get(get_user_by_id))
        .route("/stores", get(get_stores).post(create_store))
}
