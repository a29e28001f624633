use axum::{Router, routing::get};

use super::controller::{get_dashboard, get_ratings};
use crate::state::AppState;

pub fn init_store_owner_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/ratings", get(get_ratings))
}
