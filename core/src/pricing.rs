//! Price aggregation.
//!
//! Prices come from the show descriptor, keyed by seat id.

use crate::types::{Price, SeatId, SeatLayout};
use std::collections::HashMap;

/// Seat id → price for one show
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriceTable(HashMap<SeatId, Price>);

impl PriceTable {
    /// Build the table from every seat in a layout
    #[must_use]
    pub fn from_layout(layout: &SeatLayout) -> Self {
        Self(
            layout
                .seats()
                .map(|seat| (seat.id.clone(), seat.price))
                .collect(),
        )
    }

    /// Price of a seat, `None` for ids not in the layout
    #[must_use]
    pub fn price_of(&self, seat_id: &SeatId) -> Option<Price> {
        self.0.get(seat_id).copied()
    }

    /// Whether the seat exists in the layout
    #[must_use]
    pub fn contains(&self, seat_id: &SeatId) -> bool {
        self.0.contains_key(seat_id)
    }
}

/// Sum of the prices of the selected seats
///
/// Ids missing from the table contribute nothing; the session never lets
/// such ids into the selection.
#[must_use]
pub fn compute_total(selected: &[SeatId], prices: &PriceTable) -> Price {
    selected
        .iter()
        .filter_map(|seat_id| prices.price_of(seat_id))
        .sum()
}

/// Text of the total display, e.g. `Total: ₹350`
#[must_use]
pub fn format_total(total: Price, currency_symbol: &str) -> String {
    format!("Total: {currency_symbol}{total}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::parse_row;
    use crate::selection::SelectionState;

    fn id(s: &str) -> SeatId {
        SeatId::new(s).unwrap()
    }

    fn table() -> PriceTable {
        let row = parse_row(&["A1:150", "A2:150", "&", "A3:200"]).unwrap();
        PriceTable::from_layout(&SeatLayout::new(vec![row]))
    }

    #[test]
    fn table_covers_every_seat() {
        let prices = table();
        assert_eq!(prices.price_of(&id("A3")), Some(Price::new(200)));
        assert!(prices.contains(&id("A2")));
        assert!(!prices.contains(&id("B1")));
    }

    #[test]
    fn total_is_sum_of_selected() {
        let prices = table();
        assert_eq!(compute_total(&[], &prices), Price::ZERO);
        assert_eq!(compute_total(&[id("A1"), id("A3")], &prices), Price::new(350));
    }

    #[test]
    fn select_then_deselect_restores_total() {
        let prices = table();
        let mut selection = SelectionState::new(3);
        selection.toggle(&id("A1"));
        let before = compute_total(selection.selected(), &prices);

        selection.toggle(&id("A3"));
        assert_eq!(compute_total(selection.selected(), &prices), Price::new(350));
        selection.toggle(&id("A3"));
        assert_eq!(compute_total(selection.selected(), &prices), before);
    }

    #[test]
    fn formats_with_symbol() {
        assert_eq!(format_total(Price::new(350), "₹"), "Total: ₹350");
        assert_eq!(format_total(Price::ZERO, "$"), "Total: $0");
    }
}
