//! View models derived from a session.
//!
//! Built fresh after every dispatch; the HTML page and the JSON API both
//! render from these.

use crate::config::ShowConfig;
use seatmap_core::classify::DisplayState;
use seatmap_core::pricing::format_total;
use seatmap_core::session::ShowSession;
use seatmap_core::types::{MovieInfo, Price, SeatCell, SeatId, SeatSpec};
use serde::Serialize;

/// The whole seat grid, row by row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridView {
    /// Rows in layout order
    pub rows: Vec<RowView>,
}

/// One row of the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Cells in layout order
    pub cells: Vec<CellView>,
}

/// One position in a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellView {
    /// Inert gap
    Spacer,
    /// A seat
    Seat(SeatView),
}

/// A rendered seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    /// Seat id, also the button label
    pub id: SeatId,
    /// Price from the descriptor
    pub price: Price,
    /// Display state
    pub state: DisplayState,
    /// CSS class for `state`
    pub css_class: &'static str,
    /// Hover text, `Seat <id> - <symbol><price>`
    pub tooltip: String,
    /// Whether clicking toggles the seat
    pub clickable: bool,
}

impl SeatView {
    fn build(spec: &SeatSpec, session: &ShowSession, currency_symbol: &str) -> Self {
        let state = session.classify(&spec.id);
        Self {
            id: spec.id.clone(),
            price: spec.price,
            state,
            css_class: state.css_class(),
            tooltip: format!("Seat {} - {currency_symbol}{}", spec.id, spec.price),
            clickable: !state.is_locked(),
        }
    }
}

impl GridView {
    /// Classify every seat of the session's layout
    #[must_use]
    pub fn build(session: &ShowSession, currency_symbol: &str) -> Self {
        let rows = session
            .show()
            .seat_layout
            .rows()
            .iter()
            .map(|row| RowView {
                cells: row
                    .iter()
                    .map(|cell| match cell {
                        SeatCell::Spacer => CellView::Spacer,
                        SeatCell::Seat(spec) => {
                            CellView::Seat(SeatView::build(spec, session, currency_symbol))
                        },
                    })
                    .collect(),
            })
            .collect();
        Self { rows }
    }

    /// All seats, row-major
    pub fn seats(&self) -> impl Iterator<Item = &SeatView> {
        self.rows.iter().flat_map(|row| {
            row.cells.iter().filter_map(|cell| match cell {
                CellView::Spacer => None,
                CellView::Seat(seat) => Some(seat),
            })
        })
    }

    /// The seat with `id`, if rendered
    #[must_use]
    pub fn seat(&self, id: &str) -> Option<&SeatView> {
        self.seats().find(|seat| seat.id.as_str() == id)
    }
}

/// Everything the page and the API show about a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Movie metadata
    pub movie: MovieInfo,
    /// Auditorium name
    pub auditorium: String,
    /// The seat grid
    pub grid: GridView,
    /// Selected seats in selection order
    pub selected: Vec<SeatId>,
    /// Current cap
    pub max_seats: usize,
    /// Largest cap the selector offers
    pub max_selectable: usize,
    /// Sum of selected prices
    pub total: Price,
    /// `Total: <symbol><total>`
    pub formatted_total: String,
}

impl SessionView {
    /// Snapshot `session` for display
    #[must_use]
    pub fn build(session: &ShowSession, settings: &ShowConfig) -> Self {
        let show = session.show();
        let total = session.total();
        Self {
            movie: show.movie.clone(),
            auditorium: show.auditorium.clone(),
            grid: GridView::build(session, &settings.currency_symbol),
            selected: session.selection().selected().to_vec(),
            max_seats: session.selection().max_seats(),
            max_selectable: settings.max_selectable,
            total,
            formatted_total: format_total(total, &settings.currency_symbol),
        }
    }
}
