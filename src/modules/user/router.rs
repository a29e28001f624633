use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_stores, submit_rating};
use crate::state::AppState;

pub fn init_user_router() -> Router<AppState> {
    Router::new()
        .route("/stores", get(get_stores))
        .route("/ratings", post(submit_rating))
}
