//! HTTP request handlers.
//!
//! `page` and `seats` serve the HTML front end, `api` the JSON equivalent,
//! `health` the liveness and readiness checks.

pub mod api;
pub mod health;
pub mod page;
pub mod seats;

use crate::config::ShowConfig;
use crate::error::AppError;

/// Reject caps the seat-count selector does not offer
fn checked_count(show: &ShowConfig, count: usize) -> Result<usize, AppError> {
    if show.allows_count(count) {
        Ok(count)
    } else {
        Err(AppError::validation(format!(
            "seat count must be between 1 and {}",
            show.max_selectable
        )))
    }
}
