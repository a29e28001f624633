use axum::{Router, routing::get};

use super::controller::health_check;
use crate::state::AppState;

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
