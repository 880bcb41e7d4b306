//! Error types for loading and decoding a show.
//!
//! Every error here is `Clone` because a failed load is kept in the session
//! state and carried inside reducer actions.

use crate::types::SeatId;
use thiserror::Error;

/// Why a seat identifier was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatIdError {
    /// The identifier is the empty string
    #[error("seat id is empty")]
    Empty,

    /// The identifier contains the `:` cell separator
    #[error("seat id contains the ':' separator")]
    ContainsSeparator,
}

/// What is wrong with a layout cell
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellDefect {
    /// Neither the spacer marker nor `<id>:<price>`
    #[error("expected \"&\" or \"<id>:<price>\"")]
    MissingSeparator,

    /// Nothing before the colon
    #[error("seat id is empty")]
    EmptyId,

    /// The part after the colon is not a non-negative integer
    #[error("price is not a non-negative integer")]
    InvalidPrice,
}

/// A layout cell string that does not decode into a spacer or a seat
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed seat cell {cell:?}: {defect}")]
pub struct MalformedSeatCell {
    /// The raw cell text
    pub cell: String,
    /// What is wrong with it
    pub defect: CellDefect,
}

/// Failure to obtain a usable show descriptor
///
/// Loading is never retried; a `LoadError` ends the session in the failed
/// phase and is shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source could not be contacted at all
    #[error("show source {location} is unreachable: {reason}")]
    Unreachable {
        /// URL or path that was tried
        location: String,
        /// Transport error text
        reason: String,
    },

    /// The source answered with a non-success HTTP status
    #[error("show source {location} answered with HTTP {status}")]
    HttpStatus {
        /// URL that was requested
        location: String,
        /// Status code received
        status: u16,
    },

    /// Reading the document failed
    #[error("failed to read {location}: {reason}")]
    Io {
        /// URL or path being read
        location: String,
        /// I/O error text
        reason: String,
    },

    /// Invalid JSON or a missing required field
    #[error("malformed show descriptor: {0}")]
    Malformed(String),

    /// A layout cell failed to decode
    #[error(transparent)]
    Cell(#[from] MalformedSeatCell),

    /// A status entry is neither `taken` nor `progress`
    #[error("unknown status {status:?} for seat {seat_id}")]
    UnknownStatus {
        /// Raw key of the status entry
        seat_id: String,
        /// Raw status value
        status: String,
    },

    /// A status key is not a valid seat id
    #[error("invalid seat id {seat_id:?} in status map: {reason}")]
    InvalidStatusKey {
        /// Raw key of the status entry
        seat_id: String,
        /// Why it was rejected
        reason: SeatIdError,
    },

    /// The same seat id occurs twice in the layout
    #[error("seat {0} appears more than once in the layout")]
    DuplicateSeat(SeatId),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
