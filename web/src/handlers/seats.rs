//! Form endpoints behind the HTML page.
//!
//! Both answer with a 303 back to `/` so a reload never resubmits the form.

use super::checked_count;
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::Redirect, Form};
use seatmap_core::session::SeatPickerAction;
use seatmap_core::types::SeatId;
use serde::Deserialize;

/// Body of a seat button's form
#[derive(Debug, Deserialize)]
pub struct SeatToggleForm {
    /// The clicked seat
    pub seat_id: String,
}

/// Body of the seat-count form
#[derive(Debug, Deserialize)]
pub struct SeatCountForm {
    /// Requested cap
    pub count: usize,
}

/// Toggle a seat from the page
///
/// Unknown and unbookable seats leave the session untouched.
///
/// # Endpoint
///
/// ```text
/// POST /seats/toggle
/// seat_id=A1
/// ```
///
/// # Errors
///
/// Returns 503 when no show is loaded or the server is shutting down.
pub async fn toggle_seat(
    State(state): State<AppState>,
    Form(form): Form<SeatToggleForm>,
) -> Result<Redirect, AppError> {
    let Ok(seat_id) = SeatId::new(form.seat_id.as_str()) else {
        tracing::warn!(seat_id = %form.seat_id, "Ignored toggle for invalid seat id");
        return Ok(Redirect::to("/"));
    };

    match state.with_session(|session| session.check_toggle(&seat_id)).await? {
        Ok(()) => {
            metrics::counter!("web.seat_toggles", "outcome" => "dispatched").increment(1);
            state.dispatch(SeatPickerAction::ToggleSeat { seat_id }).await?;
        },
        Err(rejection) => {
            metrics::counter!("web.seat_toggles", "outcome" => "rejected").increment(1);
            tracing::warn!(%rejection, "Ignored toggle");
        },
    }

    Ok(Redirect::to("/"))
}

/// Change the seat-count cap from the page, clearing the selection
///
/// # Endpoint
///
/// ```text
/// POST /seat-count
/// count=3
/// ```
///
/// # Errors
///
/// Returns 422 for a count outside the selector range, 503 when no show is
/// loaded or the server is shutting down.
pub async fn set_seat_count(
    State(state): State<AppState>,
    Form(form): Form<SeatCountForm>,
) -> Result<Redirect, AppError> {
    let count = checked_count(&state.show, form.count)?;
    state.with_session(|_| ()).await?;
    state.dispatch(SeatPickerAction::SetMaxSeats { count }).await?;
    Ok(Redirect::to("/"))
}
