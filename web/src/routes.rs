//! Router configuration for the seat map server.

use crate::handlers::{api, health, page, seats};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `/`, `/seats/toggle`, `/seat-count`: the HTML front end
/// - `/api/...`: the JSON API
/// - `/health`, `/ready`: liveness and readiness
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/session", get(api::get_session))
        .route("/seats/:seat_id/toggle", post(api::toggle_seat))
        .route("/seats/:seat_id/status", put(api::set_seat_status))
        .route("/seat-count", put(api::set_seat_count));

    Router::new()
        .route("/", get(page::index))
        .route("/seats/toggle", post(seats::toggle_seat))
        .route("/seat-count", post(seats::set_seat_count))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
