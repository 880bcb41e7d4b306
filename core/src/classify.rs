//! Seat classification.
//!
//! Precedence, highest first: `Taken > InProgress > Selected > Available`.
//! A status entry always wins over the local selection.

use crate::selection::SelectionState;
use crate::types::{SeatId, SeatStatus, SeatStatusMap};
use serde::{Deserialize, Serialize};

/// How a seat is displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    /// Sold to someone
    Taken,
    /// Being booked by someone else
    InProgress,
    /// Picked in this session
    Selected,
    /// Free to pick
    Available,
}

impl DisplayState {
    /// All states in legend order
    pub const ALL: [Self; 4] = [Self::Available, Self::Selected, Self::Taken, Self::InProgress];

    /// Stable CSS class for the seat element
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Taken => "seat-taken",
            Self::InProgress => "seat-progress",
            Self::Selected => "seat-selected",
            Self::Available => "seat-available",
        }
    }

    /// Legend label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Taken => "Taken",
            Self::InProgress => "In Progress",
            Self::Selected => "Selected",
            Self::Available => "Available",
        }
    }

    /// Whether the state comes from the status map rather than the selection
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Taken | Self::InProgress)
    }
}

impl From<SeatStatus> for DisplayState {
    fn from(status: SeatStatus) -> Self {
        match status {
            SeatStatus::Taken => Self::Taken,
            SeatStatus::InProgress => Self::InProgress,
        }
    }
}

/// Classify a seat
#[must_use]
pub fn classify(
    seat_id: &SeatId,
    statuses: &SeatStatusMap,
    selection: &SelectionState,
) -> DisplayState {
    match statuses.get(seat_id) {
        Some(status) => status.into(),
        None if selection.contains(seat_id) => DisplayState::Selected,
        None => DisplayState::Available,
    }
}

/// Whether a seat may be picked at all (no status entry)
///
/// Checked before a seat is given a click target and before a toggle is
/// dispatched.
#[must_use]
pub fn is_bookable(seat_id: &SeatId, statuses: &SeatStatusMap) -> bool {
    statuses.get(seat_id).is_none()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> SeatId {
        SeatId::new(s).unwrap()
    }

    #[test]
    fn taken_beats_selected() {
        let mut selection = SelectionState::new(2);
        selection.toggle(&id("A1"));
        let statuses: SeatStatusMap = [(id("A1"), SeatStatus::Taken)].into_iter().collect();

        assert_eq!(classify(&id("A1"), &statuses, &selection), DisplayState::Taken);
    }

    #[test]
    fn in_progress_beats_selected() {
        let mut selection = SelectionState::new(2);
        selection.toggle(&id("A1"));
        let statuses: SeatStatusMap = [(id("A1"), SeatStatus::InProgress)].into_iter().collect();

        assert_eq!(classify(&id("A1"), &statuses, &selection), DisplayState::InProgress);
    }

    #[test]
    fn selection_without_status() {
        let mut selection = SelectionState::new(1);
        selection.toggle(&id("A1"));
        let statuses = SeatStatusMap::new();

        assert_eq!(classify(&id("A1"), &statuses, &selection), DisplayState::Selected);
        assert_eq!(classify(&id("A2"), &statuses, &selection), DisplayState::Available);
    }

    #[test]
    fn bookability_follows_status_map() {
        let statuses: SeatStatusMap = [(id("A2"), SeatStatus::Taken)].into_iter().collect();
        assert!(is_bookable(&id("A1"), &statuses));
        assert!(!is_bookable(&id("A2"), &statuses));
    }

    #[test]
    fn css_classes_are_distinct() {
        let classes: std::collections::HashSet<_> =
            DisplayState::ALL.iter().map(|s| s.css_class()).collect();
        assert_eq!(classes.len(), 4);
        assert!(DisplayState::Taken.is_locked());
        assert!(!DisplayState::Selected.is_locked());
    }
}
