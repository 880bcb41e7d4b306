//! Seat layout codec.
//!
//! A layout cell on the wire is either the spacer marker `&` or
//! `<id>:<price>`. Decoding fails fast on the first malformed cell so a broken
//! seat is never rendered.

use crate::error::{CellDefect, LoadError, MalformedSeatCell};
use crate::types::{
    MovieInfo, Price, SeatCell, SeatId, SeatLayout, SeatSpec, SeatStatus, SeatStatusMap,
    ShowDescriptor,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Cell text marking an aisle gap
pub const SPACER: &str = "&";

/// Separator between seat id and price
pub const SEPARATOR: char = ':';

/// Decode one layout cell
///
/// # Errors
///
/// Returns [`MalformedSeatCell`] if the cell is neither the spacer marker nor
/// a non-empty id, a colon, and a decimal price.
pub fn parse_cell(cell: &str) -> Result<SeatCell, MalformedSeatCell> {
    if cell == SPACER {
        return Ok(SeatCell::Spacer);
    }

    let malformed = |defect| MalformedSeatCell {
        cell: cell.to_string(),
        defect,
    };

    let (id, price) = cell
        .split_once(SEPARATOR)
        .ok_or_else(|| malformed(CellDefect::MissingSeparator))?;

    if id.is_empty() {
        return Err(malformed(CellDefect::EmptyId));
    }

    // `u64::from_str` accepts a leading '+', the wire format does not
    if price.is_empty() || !price.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(CellDefect::InvalidPrice));
    }
    let amount: u64 = price
        .parse()
        .map_err(|_| malformed(CellDefect::InvalidPrice))?;

    let id = SeatId::new(id).map_err(|_| malformed(CellDefect::EmptyId))?;

    Ok(SeatCell::Seat(SeatSpec {
        id,
        price: Price::new(amount),
    }))
}

/// Encode one layout cell
#[must_use]
pub fn encode_cell(cell: &SeatCell) -> String {
    match cell {
        SeatCell::Spacer => SPACER.to_string(),
        SeatCell::Seat(seat) => format!("{}{SEPARATOR}{}", seat.id, seat.price),
    }
}

/// Decode a whole row
///
/// # Errors
///
/// Returns the first [`MalformedSeatCell`] in the row.
pub fn parse_row<S: AsRef<str>>(cells: &[S]) -> Result<Vec<SeatCell>, MalformedSeatCell> {
    cells.iter().map(|cell| parse_cell(cell.as_ref())).collect()
}

/// The show descriptor exactly as it travels over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowDocument {
    /// Movie metadata
    pub movie: MovieInfo,
    /// Auditorium name
    pub auditorium: String,
    /// Rows of encoded cells
    pub seat_layout: Vec<Vec<String>>,
    /// Raw seat id → raw status value
    pub seat_status: BTreeMap<String, String>,
}

/// Turn a wire document into a validated [`ShowDescriptor`]
///
/// Status entries for seats that are not in the layout are kept but have no
/// visible effect.
///
/// # Errors
///
/// Returns [`LoadError`] for malformed cells, duplicate seat ids, invalid
/// status keys and unknown status values.
pub fn decode_document(document: ShowDocument) -> Result<ShowDescriptor, LoadError> {
    let rows = document
        .seat_layout
        .iter()
        .map(|row| parse_row(row.as_slice()))
        .collect::<Result<Vec<_>, _>>()?;
    let seat_layout = SeatLayout::new(rows);

    let mut seen = HashSet::new();
    for seat in seat_layout.seats() {
        if !seen.insert(&seat.id) {
            return Err(LoadError::DuplicateSeat(seat.id.clone()));
        }
    }

    let mut seat_status = SeatStatusMap::new();
    for (raw_id, raw_status) in document.seat_status {
        let status =
            SeatStatus::from_wire(&raw_status).ok_or_else(|| LoadError::UnknownStatus {
                seat_id: raw_id.clone(),
                status: raw_status.clone(),
            })?;
        let id = SeatId::new(raw_id.as_str()).map_err(|reason| LoadError::InvalidStatusKey {
            seat_id: raw_id.clone(),
            reason,
        })?;
        if !seen.contains(&id) {
            tracing::warn!(seat_id = %id, "Status entry for a seat that is not in the layout");
        }
        seat_status.set(id, Some(status));
    }

    Ok(ShowDescriptor {
        movie: document.movie,
        auditorium: document.auditorium,
        seat_layout,
        seat_status,
    })
}

/// Turn a [`ShowDescriptor`] back into its wire document
#[must_use]
pub fn encode_document(show: &ShowDescriptor) -> ShowDocument {
    ShowDocument {
        movie: show.movie.clone(),
        auditorium: show.auditorium.clone(),
        seat_layout: show
            .seat_layout
            .rows()
            .iter()
            .map(|row| row.iter().map(encode_cell).collect())
            .collect(),
        seat_status: show
            .seat_status
            .iter()
            .map(|(id, status)| (id.to_string(), status.as_wire().to_string()))
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seat(id: &str, price: u64) -> SeatCell {
        SeatCell::Seat(SeatSpec {
            id: SeatId::new(id).unwrap(),
            price: Price::new(price),
        })
    }

    fn defect(cell: &str) -> CellDefect {
        parse_cell(cell).unwrap_err().defect
    }

    const DOCUMENT: &str = r#"{
        "movie": {
            "title": "Interstellar",
            "image": "/posters/interstellar.jpg",
            "releaseDate": "2014-11-07",
            "showTime": "19:30"
        },
        "auditorium": "Audi 3",
        "seatLayout": [["A1:150", "A2:150", "&", "A3:200"], ["B1:120"]],
        "seatStatus": { "A2": "taken", "B1": "progress" }
    }"#;

    #[test]
    fn parses_spacer_and_seat() {
        assert_eq!(parse_cell("&").unwrap(), SeatCell::Spacer);
        assert_eq!(parse_cell("A1:150").unwrap(), seat("A1", 150));
    }

    #[test]
    fn rejects_malformed_cells() {
        assert_eq!(defect("A1"), CellDefect::MissingSeparator);
        assert_eq!(defect(""), CellDefect::MissingSeparator);
        assert_eq!(defect(":150"), CellDefect::EmptyId);
        assert_eq!(defect("A1:"), CellDefect::InvalidPrice);
        assert_eq!(defect("A1:abc"), CellDefect::InvalidPrice);
        assert_eq!(defect("A1:-5"), CellDefect::InvalidPrice);
        assert_eq!(defect("A1:+5"), CellDefect::InvalidPrice);
        // The id may not contain a colon, so everything after the first one is price
        assert_eq!(defect("A:1:150"), CellDefect::InvalidPrice);
    }

    #[test]
    fn row_stops_at_first_bad_cell() {
        let err = parse_row(&["A1:150", "oops", "A2:x"]).unwrap_err();
        assert_eq!(err.cell, "oops");
    }

    #[test]
    fn encodes_cells() {
        assert_eq!(encode_cell(&SeatCell::Spacer), "&");
        assert_eq!(encode_cell(&seat("C4", 90)), "C4:90");
    }

    #[test]
    fn decodes_full_document() {
        let show = ShowDescriptor::from_json(DOCUMENT).unwrap();

        assert_eq!(show.movie.title, "Interstellar");
        assert_eq!(show.movie.release_date, "2014-11-07");
        assert_eq!(show.auditorium, "Audi 3");
        assert_eq!(show.seat_layout.rows().len(), 2);
        assert_eq!(show.seat_layout.rows()[0][2], SeatCell::Spacer);
        assert_eq!(show.seat_layout.seat_count(), 4);
        assert_eq!(
            show.seat_status.get(&SeatId::new("A2").unwrap()),
            Some(SeatStatus::Taken)
        );
        assert_eq!(
            show.seat_status.get(&SeatId::new("B1").unwrap()),
            Some(SeatStatus::InProgress)
        );
        assert_eq!(show.seat_status.get(&SeatId::new("A1").unwrap()), None);
    }

    #[test]
    fn document_survives_reencoding() {
        let show = ShowDescriptor::from_json(DOCUMENT).unwrap();
        let again = ShowDescriptor::from_json(&show.to_json().unwrap()).unwrap();
        assert_eq!(show, again);
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = ShowDescriptor::from_json(r#"{"auditorium": "Audi 1"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn malformed_cell_fails_the_load() {
        let json = DOCUMENT.replace("\"A3:200\"", "\"A3-200\"");
        let err = ShowDescriptor::from_json(&json).unwrap_err();
        assert_eq!(
            err,
            LoadError::Cell(MalformedSeatCell {
                cell: "A3-200".to_string(),
                defect: CellDefect::MissingSeparator,
            })
        );
    }

    #[test]
    fn duplicate_seat_fails_the_load() {
        let json = DOCUMENT.replace("\"B1:120\"", "\"A1:120\"");
        let err = ShowDescriptor::from_json(&json).unwrap_err();
        assert_eq!(err, LoadError::DuplicateSeat(SeatId::new("A1").unwrap()));
    }

    #[test]
    fn unknown_status_fails_the_load() {
        let json = DOCUMENT.replace("\"progress\"", "\"held\"");
        let err = ShowDescriptor::from_json(&json).unwrap_err();
        assert_eq!(
            err,
            LoadError::UnknownStatus {
                seat_id: "B1".to_string(),
                status: "held".to_string(),
            }
        );
    }
}
