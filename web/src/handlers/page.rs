//! The seat map page.

use crate::error::AppError;
use crate::render::{html, SessionView};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use seatmap_core::session::SessionPhase;

/// Full page: header, grid, legend and total
///
/// 503 with an error page when the show failed to load or is still loading.
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```
///
/// # Errors
///
/// Returns 500 if the page cannot be rendered.
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let (status, page) = state
        .store
        .state(|s| match &s.phase {
            SessionPhase::Ready(session) => {
                html::render_page(&SessionView::build(session, &state.show)).map(|page| (StatusCode::OK, page))
            },
            SessionPhase::Failed(error) => {
                html::render_error_page(error).map(|page| (StatusCode::SERVICE_UNAVAILABLE, page))
            },
            SessionPhase::Idle | SessionPhase::Loading => {
                html::render_loading_page().map(|page| (StatusCode::SERVICE_UNAVAILABLE, page))
            },
        })
        .await
        .map_err(|e| AppError::internal("Failed to render the seat map").with_source(e.into()))?;

    Ok((status, Html(page)).into_response())
}
