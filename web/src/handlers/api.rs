//! JSON API over the session.
//!
//! Every mutating endpoint answers with the session view after the change.

use super::checked_count;
use crate::error::AppError;
use crate::render::SessionView;
use crate::state::AppState;
use crate::WebResult;
use axum::{
    extract::{Path, State},
    Json,
};
use seatmap_core::session::SeatPickerAction;
use seatmap_core::types::{SeatId, SeatStatus};
use serde::Deserialize;

/// Body of `PUT /api/seat-count`
#[derive(Debug, Deserialize)]
pub struct SeatCountRequest {
    /// Requested cap
    pub count: usize,
}

/// Body of `PUT /api/seats/:seat_id/status`
#[derive(Debug, Deserialize)]
pub struct SeatStatusRequest {
    /// `taken` or `progress`
    pub status: Option<String>,
}

fn parse_seat_id(raw_id: &str) -> Result<SeatId, AppError> {
    SeatId::new(raw_id).map_err(|_| AppError::not_found("Seat", raw_id))
}

/// Current session snapshot
///
/// # Endpoint
///
/// ```text
/// GET /api/session
/// ```
///
/// # Errors
///
/// Returns 503 when no show is loaded.
pub async fn get_session(State(state): State<AppState>) -> WebResult<Json<SessionView>> {
    Ok(Json(state.snapshot().await?))
}

/// Toggle a seat
///
/// # Endpoint
///
/// ```text
/// POST /api/seats/:seat_id/toggle
/// ```
///
/// # Errors
///
/// Returns 404 for an unknown seat, 409 for a taken or in-progress seat, 503
/// when no show is loaded or the server is shutting down.
pub async fn toggle_seat(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> WebResult<Json<SessionView>> {
    let seat_id = parse_seat_id(&raw_id)?;
    state
        .with_session(|session| session.check_toggle(&seat_id))
        .await??;

    state.dispatch(SeatPickerAction::ToggleSeat { seat_id }).await?;
    Ok(Json(state.snapshot().await?))
}

/// Change the cap, clearing the selection
///
/// # Endpoint
///
/// ```text
/// PUT /api/seat-count
/// {"count": 2}
/// ```
///
/// # Errors
///
/// Returns 422 for a count outside the selector range, 503 when no show is
/// loaded or the server is shutting down.
pub async fn set_seat_count(
    State(state): State<AppState>,
    Json(request): Json<SeatCountRequest>,
) -> WebResult<Json<SessionView>> {
    let count = checked_count(&state.show, request.count)?;
    state.with_session(|_| ()).await?;
    state.dispatch(SeatPickerAction::SetMaxSeats { count }).await?;
    Ok(Json(state.snapshot().await?))
}

/// Record a booking made elsewhere
///
/// Only a bookable seat can be locked; taken and in-progress seats keep their
/// status for the rest of the session. A selected seat that gets locked is
/// dropped from the selection.
///
/// # Endpoint
///
/// ```text
/// PUT /api/seats/:seat_id/status
/// {"status": "taken"}
/// ```
///
/// # Errors
///
/// Returns 422 for a status other than `taken` or `progress`, 404 for an
/// unknown seat, 409 for a seat that already carries a status, 503 when no
/// show is loaded or the server is shutting down.
pub async fn set_seat_status(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(request): Json<SeatStatusRequest>,
) -> WebResult<Json<SessionView>> {
    let seat_id = parse_seat_id(&raw_id)?;
    let status = match request.status.as_deref() {
        Some(raw) => SeatStatus::from_wire(raw)
            .ok_or_else(|| AppError::validation(format!("unknown seat status {raw:?}")))?,
        None => return Err(AppError::validation("seat status cannot be cleared")),
    };
    state
        .with_session(|session| session.check_toggle(&seat_id))
        .await??;

    tracing::info!(%seat_id, ?status, "Seat status changed");
    state
        .dispatch(SeatPickerAction::SeatStatusChanged { seat_id, status })
        .await?;
    Ok(Json(state.snapshot().await?))
}
