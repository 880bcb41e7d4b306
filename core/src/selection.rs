//! Selection state machine.
//!
//! States are "k of `max_seats` seats chosen". Transitions are a click
//! ([`SelectionState::toggle`]) and a seat-count change
//! ([`SelectionState::set_max_seats`]). There is no terminal state.

use crate::types::SeatId;
use serde::{Deserialize, Serialize};

/// Cap used before the user touches the seat-count selector
pub const DEFAULT_MAX_SEATS: usize = 1;

/// What a toggle did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// Seat appended to the selection
    Selected,
    /// Seat removed from the selection
    Deselected,
    /// Cap already reached; nothing changed
    CapReached,
}

/// Seats picked in this session, in click order
///
/// Invariant: `selected.len() <= max_seats` and no duplicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Vec<SeatId>,
    max_seats: usize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEATS)
    }
}

impl SelectionState {
    /// Empty selection with the given cap
    #[must_use]
    pub const fn new(max_seats: usize) -> Self {
        Self {
            selected: Vec::new(),
            max_seats,
        }
    }

    /// Selected seats in click order
    #[must_use]
    pub fn selected(&self) -> &[SeatId] {
        &self.selected
    }

    /// Current cap
    #[must_use]
    pub const fn max_seats(&self) -> usize {
        self.max_seats
    }

    /// Number of selected seats
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether the cap is reached
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.max_seats
    }

    /// How many more seats may be picked
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.max_seats.saturating_sub(self.selected.len())
    }

    /// Whether a seat is selected
    #[must_use]
    pub fn contains(&self, seat_id: &SeatId) -> bool {
        self.selected.contains(seat_id)
    }

    /// Select or deselect a seat
    ///
    /// Deselecting is always allowed. Selecting past the cap is a silent
    /// no-op reported as [`ToggleOutcome::CapReached`].
    pub fn toggle(&mut self, seat_id: &SeatId) -> ToggleOutcome {
        if let Some(index) = self.selected.iter().position(|id| id == seat_id) {
            self.selected.remove(index);
            return ToggleOutcome::Deselected;
        }

        if self.selected.len() < self.max_seats {
            self.selected.push(seat_id.clone());
            ToggleOutcome::Selected
        } else {
            ToggleOutcome::CapReached
        }
    }

    /// Replace the cap and clear the selection
    ///
    /// A hard reset even when the current selection would fit the new cap.
    pub fn set_max_seats(&mut self, max_seats: usize) {
        self.max_seats = max_seats;
        self.selected.clear();
    }

    /// Remove a seat if selected, returning whether it was
    pub fn deselect(&mut self, seat_id: &SeatId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| id != seat_id);
        self.selected.len() != before
    }
}
