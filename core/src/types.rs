//! Domain types for the seat map.
//!
//! Value objects (seat ids, prices), the seat layout grid, the status map and
//! the show descriptor that ties them together.

use crate::error::{LoadError, SeatIdError};
use crate::layout;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// ============================================================================
// Identifiers and values
// ============================================================================

/// Identifier of a seat, unique within a show (e.g. `A1`)
///
/// Never empty and never contains `:`, which separates id from price in the
/// layout encoding.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId(String);

impl SeatId {
    /// Create a seat id
    ///
    /// # Errors
    ///
    /// Returns [`SeatIdError`] if `id` is empty or contains `:`.
    pub fn new(id: impl Into<String>) -> Result<Self, SeatIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SeatIdError::Empty);
        }
        if id.contains(layout::SEPARATOR) {
            return Err(SeatIdError::ContainsSeparator);
        }
        Ok(Self(id))
    }

    /// Borrow the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SeatId {
    type Error = SeatIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SeatId> for String {
    fn from(id: SeatId) -> Self {
        id.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat price in whole currency units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero price, the total of an empty selection
    pub const ZERO: Self = Self(0);

    /// Create a price
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Layout
// ============================================================================

/// A seat as it appears in the layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatSpec {
    /// Seat identifier
    pub id: SeatId,
    /// Seat price
    pub price: Price,
}

/// One position in a layout row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeatCell {
    /// Aisle gap, not a seat
    Spacer,
    /// A seat
    Seat(SeatSpec),
}

impl SeatCell {
    /// The seat in this cell, if any
    #[must_use]
    pub const fn as_seat(&self) -> Option<&SeatSpec> {
        match self {
            Self::Spacer => None,
            Self::Seat(spec) => Some(spec),
        }
    }
}

/// Ordered rows of ordered cells
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeatLayout {
    rows: Vec<Vec<SeatCell>>,
}

impl SeatLayout {
    /// Create a layout from rows
    #[must_use]
    pub const fn new(rows: Vec<Vec<SeatCell>>) -> Self {
        Self { rows }
    }

    /// The rows, front to back
    #[must_use]
    pub fn rows(&self) -> &[Vec<SeatCell>] {
        &self.rows
    }

    /// Every seat in row-major order, spacers skipped
    pub fn seats(&self) -> impl Iterator<Item = &SeatSpec> {
        self.rows.iter().flatten().filter_map(SeatCell::as_seat)
    }

    /// Number of seats (spacers excluded)
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats().count()
    }

    /// Look up a seat by id
    #[must_use]
    pub fn find(&self, id: &SeatId) -> Option<&SeatSpec> {
        self.seats().find(|seat| &seat.id == id)
    }
}

// ============================================================================
// Status
// ============================================================================

/// Externally assigned status of a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Sold
    Taken,
    /// Someone else is in the middle of booking it
    #[serde(rename = "progress")]
    InProgress,
}

impl SeatStatus {
    /// Parse the wire value (`taken` or `progress`)
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "taken" => Some(Self::Taken),
            "progress" => Some(Self::InProgress),
            _ => None,
        }
    }

    /// The wire value
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Taken => "taken",
            Self::InProgress => "progress",
        }
    }
}

/// Seat id → status; a seat without an entry is bookable
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeatStatusMap(HashMap<SeatId, SeatStatus>);

impl SeatStatusMap {
    /// Create an empty map (every seat bookable)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of a seat, `None` when bookable
    #[must_use]
    pub fn get(&self, id: &SeatId) -> Option<SeatStatus> {
        self.0.get(id).copied()
    }

    /// Set or clear a seat's status, returning the previous one
    pub fn set(&mut self, id: SeatId, status: Option<SeatStatus>) -> Option<SeatStatus> {
        match status {
            Some(status) => self.0.insert(id, status),
            None => self.0.remove(&id),
        }
    }

    /// Number of seats carrying a status
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether every seat is bookable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(seat, status)` entries in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&SeatId, SeatStatus)> {
        self.0.iter().map(|(id, status)| (id, *status))
    }
}

impl FromIterator<(SeatId, SeatStatus)> for SeatStatusMap {
    fn from_iter<T: IntoIterator<Item = (SeatId, SeatStatus)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Show descriptor
// ============================================================================

/// Movie metadata shown in the header block
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInfo {
    /// Movie title
    pub title: String,
    /// Poster image URL
    pub image: String,
    /// Release date, as supplied by the source
    pub release_date: String,
    /// Show time, as supplied by the source
    pub show_time: String,
}

/// Everything known about one show, immutable for the session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowDescriptor {
    /// Movie metadata
    pub movie: MovieInfo,
    /// Auditorium name
    pub auditorium: String,
    /// Seat grid
    pub seat_layout: SeatLayout,
    /// Statuses at load time
    pub seat_status: SeatStatusMap,
}

impl ShowDescriptor {
    /// Decode and validate a show document
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] for invalid JSON, missing fields, malformed seat
    /// cells, unknown statuses or duplicate seat ids.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let document: layout::ShowDocument = serde_json::from_str(json)?;
        layout::decode_document(document)
    }

    /// Encode back into the wire document
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&layout::encode_document(self))
    }
}
