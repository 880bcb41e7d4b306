//! HTML page rendering.
//!
//! Plain server-rendered markup: every interaction is a form POST followed by
//! a redirect back to `/`, so the page works without JavaScript. The only
//! script is the seat-count selector submitting itself on change.

use super::view::{CellView, SeatView, SessionView};
use seatmap_core::classify::DisplayState;
use seatmap_core::error::LoadError;
use std::borrow::Cow;
use std::fmt::{self, Write};

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#111827;color:#f9fafb}\
#movie-info{display:flex;gap:1.5rem;align-items:center;padding:1.5rem;background:#1f2937}\
#movie-info img{width:8rem;border-radius:.5rem}\
#movie-info p{margin:.25rem 0;color:#d1d5db}\
#seat-layout{display:flex;flex-direction:column;gap:.25rem;align-items:center;padding:2rem}\
.seat-row{display:flex;gap:.25rem}\
.seat-row form{margin:0}\
.seat,.seat-spacer{width:2.25rem;height:2.25rem;margin:.125rem}\
.seat{border:0;border-radius:.375rem;font-size:.7rem;color:#111827}\
.seat-available{background:#e5e7eb;cursor:pointer}\
.seat-selected{background:#22c55e;cursor:pointer}\
.seat-taken{background:#6b7280;cursor:not-allowed}\
.seat-progress{background:#f59e0b;cursor:not-allowed}\
#legend{display:flex;flex-wrap:wrap;justify-content:center;gap:1rem;font-size:.875rem}\
#legend div{display:flex;align-items:center;gap:.5rem}\
#total-price{text-align:center;font-size:1.25rem;font-weight:bold;padding:1.5rem}\
.load-error{max-width:40rem;margin:4rem auto;padding:1.5rem;border:1px solid #ef4444;border-radius:.5rem}";

/// Escape text for HTML element content and quoted attribute values
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// The seat map page for a loaded show
///
/// # Errors
///
/// Only fails if formatting into the buffer fails.
pub fn render_page(view: &SessionView) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(8 * 1024);
    open_document(&mut out, &view.movie.title)?;
    write_header(&mut out, view)?;
    write_grid(&mut out, view)?;
    write_legend(&mut out)?;
    write!(
        out,
        r#"<div id="total-price">{}</div>"#,
        escape(&view.formatted_total)
    )?;
    close_document(&mut out)?;
    Ok(out)
}

/// Page shown when the show could not be loaded
///
/// # Errors
///
/// Only fails if formatting into the buffer fails.
pub fn render_error_page(error: &LoadError) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(1024);
    open_document(&mut out, "Seats unavailable")?;
    write!(
        out,
        r#"<div class="load-error" role="alert"><h1>Seats unavailable</h1><p>The seat map could not be loaded.</p><pre>{}</pre></div>"#,
        escape(&error.to_string())
    )?;
    close_document(&mut out)?;
    Ok(out)
}

/// Page shown while the show is still being fetched
///
/// # Errors
///
/// Only fails if formatting into the buffer fails.
pub fn render_loading_page() -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(512);
    open_document(&mut out, "Loading seats")?;
    out.push_str(r#"<div class="load-error"><p>The seat map is loading, try again shortly.</p></div>"#);
    close_document(&mut out)?;
    Ok(out)
}

fn open_document(out: &mut String, title: &str) -> fmt::Result {
    write!(
        out,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{}</title><style>{STYLE}</style></head><body>"#,
        escape(title)
    )
}

fn close_document(out: &mut String) -> fmt::Result {
    out.write_str("</body></html>")
}

fn write_header(out: &mut String, view: &SessionView) -> fmt::Result {
    let movie = &view.movie;
    write!(
        out,
        r#"<header id="movie-info"><img src="{image}" alt="{title}"><div><h1>{title}</h1><p>Release Date: {release}</p><p>Show Time: {time}</p><p>Auditorium: {auditorium}</p>"#,
        image = escape(&movie.image),
        title = escape(&movie.title),
        release = escape(&movie.release_date),
        time = escape(&movie.show_time),
        auditorium = escape(&view.auditorium),
    )?;

    out.write_str(r#"<form method="post" action="/seat-count"><label for="seat-count">Select seats:</label> <select id="seat-count" name="count" onchange="this.form.submit()">"#)?;
    for count in 1..=view.max_selectable {
        let selected = if count == view.max_seats { " selected" } else { "" };
        write!(out, r#"<option value="{count}"{selected}>{count}</option>"#)?;
    }
    out.write_str(r#"</select><noscript><button type="submit">Apply</button></noscript></form></div></header>"#)
}

fn write_grid(out: &mut String, view: &SessionView) -> fmt::Result {
    out.write_str(r#"<main id="seat-layout">"#)?;
    for row in &view.grid.rows {
        out.write_str(r#"<div class="seat-row">"#)?;
        for cell in &row.cells {
            match cell {
                CellView::Spacer => out.write_str(r#"<div class="seat-spacer"></div>"#)?,
                CellView::Seat(seat) => write_seat(out, seat)?,
            }
        }
        out.write_str("</div>")?;
    }
    out.write_str("</main>")
}

fn write_seat(out: &mut String, seat: &SeatView) -> fmt::Result {
    let id = escape(seat.id.as_str());
    let tooltip = escape(&seat.tooltip);
    if seat.clickable {
        write!(
            out,
            r#"<form method="post" action="/seats/toggle"><input type="hidden" name="seat_id" value="{id}"><button type="submit" class="seat {class}" title="{tooltip}" data-seat-id="{id}" data-price="{price}">{id}</button></form>"#,
            class = seat.css_class,
            price = seat.price,
        )
    } else {
        write!(
            out,
            r#"<button type="button" class="seat {class}" title="{tooltip}" data-seat-id="{id}" data-price="{price}" disabled>{id}</button>"#,
            class = seat.css_class,
            price = seat.price,
        )
    }
}

fn write_legend(out: &mut String) -> fmt::Result {
    out.write_str(r#"<section id="legend">"#)?;
    for state in DisplayState::ALL {
        write!(
            out,
            r#"<div><span class="seat {}"></span><span>{}</span></div>"#,
            state.css_class(),
            state.label()
        )?;
    }
    out.write_str("</section>")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ShowConfig;
    use seatmap_core::session::ShowSession;
    use seatmap_core::types::{SeatId, ShowDescriptor};
    use std::sync::Arc;

    fn session(title: &str) -> ShowSession {
        let json = serde_json::json!({
            "movie": {"title": title, "image": "/p.jpg", "releaseDate": "2024-03-01", "showTime": "19:30"},
            "auditorium": "Audi 3",
            "seatLayout": [["A1:150", "A2:150", "&", "A3:200"]],
            "seatStatus": {"A2": "taken"}
        });
        ShowSession::new(Arc::new(ShowDescriptor::from_json(&json.to_string()).unwrap()))
    }

    fn page(session: &ShowSession) -> String {
        render_page(&SessionView::build(session, &ShowConfig::default())).unwrap()
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape(r#"<b a="1">&'"#), "&lt;b a=&quot;1&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn page_has_header_grid_legend_and_total() {
        let html = page(&session("Dune"));
        assert!(html.contains("<h1>Dune</h1>"));
        assert!(html.contains("Release Date: 2024-03-01"));
        assert!(html.contains("Show Time: 19:30"));
        assert!(html.contains("Auditorium: Audi 3"));
        assert!(html.contains(r#"<div class="seat-spacer"></div>"#));
        assert!(html.contains(r#"<div id="total-price">Total: ₹0</div>"#));
        for state in DisplayState::ALL {
            assert!(html.contains(state.label()));
        }
    }

    #[test]
    fn selector_offers_configured_counts_with_cap_selected() {
        let mut session = session("Dune");
        session.set_max_seats(3);
        let html = page(&session);
        assert!(html.contains(r#"<option value="1">1</option>"#));
        assert!(html.contains(r#"<option value="3" selected>3</option>"#));
        assert!(html.contains(r#"<option value="6">6</option>"#));
        assert!(!html.contains(r#"<option value="7">"#));
    }

    #[test]
    fn only_bookable_seats_post_toggles() {
        let html = page(&session("Dune"));
        assert!(html.contains(r#"<input type="hidden" name="seat_id" value="A1">"#));
        assert!(html.contains(r#"title="Seat A1 - ₹150""#));
        assert!(!html.contains(r#"name="seat_id" value="A2""#));
        assert!(html.contains(r#"class="seat seat-taken" title="Seat A2 - ₹150" data-seat-id="A2" data-price="150" disabled"#));
    }

    #[test]
    fn dotted_seat_ids_stay_out_of_the_form_path() {
        let json = serde_json::json!({
            "movie": {"title": "Dune", "image": "/p.jpg", "releaseDate": "2024-03-01", "showTime": "19:30"},
            "auditorium": "Audi 3",
            "seatLayout": [["..:120", "A&B:130"]],
            "seatStatus": {}
        });
        let session = ShowSession::new(Arc::new(ShowDescriptor::from_json(&json.to_string()).unwrap()));
        let html = page(&session);
        assert!(!html.contains("/seats/../toggle"));
        assert!(html.contains(r#"<input type="hidden" name="seat_id" value="..">"#));
        assert!(html.contains(r#"<input type="hidden" name="seat_id" value="A&amp;B">"#));
    }

    #[test]
    fn selected_seat_uses_selected_class() {
        let mut session = session("Dune");
        session.toggle_seat(&SeatId::new("A3").unwrap()).unwrap();
        let html = page(&session);
        assert!(html.contains(r#"class="seat seat-selected" title="Seat A3 - ₹200""#));
        assert!(html.contains("Total: ₹200"));
    }

    #[test]
    fn titles_are_escaped() {
        let html = page(&session("<script>alert(1)</script>"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn error_page_shows_reason() {
        let html = render_error_page(&LoadError::Malformed("expected value".to_string())).unwrap();
        assert!(html.contains("Seats unavailable"));
        assert!(html.contains("malformed show descriptor: expected value"));
    }
}
