//! Rendering of the seat map.
//!
//! [`view`] turns a session into plain view models; [`html`] turns those into
//! the page. The JSON API serializes the view models directly.

pub mod html;
pub mod view;

pub use view::{CellView, GridView, RowView, SeatView, SessionView};
