use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handlers;
use crate::models::AppState;

// sets up all the routes for the web server
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/weather/{icao}", get(handlers::get_weather))
        .fallback(handlers::not_found)
        .with_state(state)
}
