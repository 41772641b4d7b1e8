//! Item CRUD routes. There is no delete.

use crate::handlers::items::{create, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn item_routes(state: AppState) -> Router {
    Router::new()
        .route("/items", get(list).post(create))
        .route("/items/:id", get(read).patch(update))
        .with_state(state)
}
