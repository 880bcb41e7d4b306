//! # Seatmap Testing
//!
//! Testing utilities and helpers for the seat map crates.
//!
//! This crate provides:
//! - Mock [`ShowSource`](seatmap_core::environment::ShowSource) implementations
//! - Show fixtures and a builder for custom layouts
//! - Property-based testing strategies
//! - A given/when/then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use seatmap_testing::{fixtures, mocks::StaticShowSource};
//! use seatmap_runtime::Store;
//!
//! #[tokio::test]
//! async fn picks_a_seat() {
//!     let store = Store::new(
//!         SessionState::default(),
//!         SeatPickerReducer::new(),
//!         SeatPickerEnvironment::new(StaticShowSource::shared(fixtures::scenario_show())),
//!     );
//!     store.send(SeatPickerAction::LoadShow).await?;
//!     store.send(SeatPickerAction::ToggleSeat { seat_id: fixtures::seat("A1") }).await?;
//! }
//! ```


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use seatmap_core::environment::{ShowFuture, ShowSource};
    use seatmap_core::error::LoadError;
    use seatmap_core::types::ShowDescriptor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Show source returning a fixed result and counting fetches
    ///
    /// # Example
    ///
    /// ```
    /// use seatmap_core::environment::ShowSource;
    /// use seatmap_testing::{fixtures, mocks::StaticShowSource};
    ///
    /// let source = StaticShowSource::ok(fixtures::scenario_show());
    /// let show = tokio_test::block_on(source.fetch_show()).unwrap();
    /// assert_eq!(show.seat_layout.seat_count(), 3);
    /// assert_eq!(source.fetch_count(), 1);
    /// ```
    #[derive(Debug)]
    pub struct StaticShowSource {
        result: Result<ShowDescriptor, LoadError>,
        fetches: AtomicUsize,
    }

    impl StaticShowSource {
        /// Source that always yields `show`
        #[must_use]
        pub const fn ok(show: ShowDescriptor) -> Self {
            Self {
                result: Ok(show),
                fetches: AtomicUsize::new(0),
            }
        }

        /// Source that always fails with `error`
        #[must_use]
        pub const fn failing(error: LoadError) -> Self {
            Self {
                result: Err(error),
                fetches: AtomicUsize::new(0),
            }
        }

        /// `ok(show)` behind an `Arc`, ready for an environment
        #[must_use]
        pub fn shared(show: ShowDescriptor) -> Arc<Self> {
            Arc::new(Self::ok(show))
        }

        /// How many times `fetch_show` was called
        #[must_use]
        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl ShowSource for StaticShowSource {
        fn describe(&self) -> String {
            "static://fixture".to_string()
        }

        fn fetch_show(&self) -> ShowFuture<'_> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let result = self.result.clone();
            Box::pin(async move { result })
        }
    }
}

/// Show fixtures
pub mod fixtures {
    use seatmap_core::layout::parse_row;
    use seatmap_core::types::{
        MovieInfo, SeatId, SeatLayout, SeatStatus, SeatStatusMap, ShowDescriptor,
    };

    /// Seat id from a literal
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a valid seat id.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn seat(id: &str) -> SeatId {
        SeatId::new(id).expect("fixture seat id should be valid")
    }

    /// Builder for show descriptors with custom layouts
    ///
    /// # Example
    ///
    /// ```
    /// use seatmap_core::types::SeatStatus;
    /// use seatmap_testing::fixtures::ShowBuilder;
    ///
    /// let show = ShowBuilder::new()
    ///     .row(&["A1:100", "&", "A2:100"])
    ///     .status("A2", SeatStatus::Taken)
    ///     .build();
    /// assert_eq!(show.seat_layout.seat_count(), 2);
    /// ```
    #[derive(Debug, Clone)]
    pub struct ShowBuilder {
        movie: MovieInfo,
        auditorium: String,
        rows: Vec<Vec<String>>,
        statuses: Vec<(String, SeatStatus)>,
    }

    impl Default for ShowBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ShowBuilder {
        /// Start with fixed movie metadata and no rows
        #[must_use]
        pub fn new() -> Self {
            Self {
                movie: MovieInfo {
                    title: "The Grand Budapest Hotel".to_string(),
                    image: "/posters/grand-budapest.jpg".to_string(),
                    release_date: "2014-03-28".to_string(),
                    show_time: "18:45".to_string(),
                },
                auditorium: "Audi 2".to_string(),
                rows: Vec::new(),
                statuses: Vec::new(),
            }
        }

        /// Set the movie title
        #[must_use]
        pub fn title(mut self, title: &str) -> Self {
            self.movie.title = title.to_string();
            self
        }

        /// Set the auditorium name
        #[must_use]
        pub fn auditorium(mut self, auditorium: &str) -> Self {
            self.auditorium = auditorium.to_string();
            self
        }

        /// Append a row of encoded cells
        #[must_use]
        pub fn row(mut self, cells: &[&str]) -> Self {
            self.rows.push(cells.iter().map(ToString::to_string).collect());
            self
        }

        /// Give a seat a status
        #[must_use]
        pub fn status(mut self, seat_id: &str, status: SeatStatus) -> Self {
            self.statuses.push((seat_id.to_string(), status));
            self
        }

        /// Build the descriptor
        ///
        /// # Panics
        ///
        /// Panics if a row contains a malformed cell.
        #[must_use]
        #[allow(clippy::expect_used)]
        pub fn build(self) -> ShowDescriptor {
            let rows = self
                .rows
                .iter()
                .map(|row| parse_row(row.as_slice()).expect("fixture rows should parse"))
                .collect();
            let seat_status: SeatStatusMap = self
                .statuses
                .iter()
                .map(|(id, status)| (seat(id), *status))
                .collect();
            ShowDescriptor {
                movie: self.movie,
                auditorium: self.auditorium,
                seat_layout: SeatLayout::new(rows),
                seat_status,
            }
        }

        /// The wire document, cells as given (malformed cells included)
        #[must_use]
        pub fn to_json(&self) -> String {
            let statuses: serde_json::Map<String, serde_json::Value> = self
                .statuses
                .iter()
                .map(|(id, status)| (id.clone(), status.as_wire().into()))
                .collect();
            serde_json::json!({
                "movie": {
                    "title": self.movie.title,
                    "image": self.movie.image,
                    "releaseDate": self.movie.release_date,
                    "showTime": self.movie.show_time,
                },
                "auditorium": self.auditorium,
                "seatLayout": self.rows,
                "seatStatus": statuses,
            })
            .to_string()
        }
    }

    /// One row `A1:150 A2:150 & A3:200`, nothing taken
    #[must_use]
    pub fn scenario_show() -> ShowDescriptor {
        ShowBuilder::new()
            .row(&["A1:150", "A2:150", "&", "A3:200"])
            .build()
    }

    /// Three rows with spacers, a taken seat and an in-progress seat
    #[must_use]
    pub fn sample_builder() -> ShowBuilder {
        ShowBuilder::new()
            .row(&["A1:150", "A2:150", "&", "A3:200", "A4:200"])
            .row(&["B1:150", "B2:150", "&", "B3:200", "B4:200"])
            .row(&["&", "C1:250", "C2:250", "C3:250", "&"])
            .status("A2", SeatStatus::Taken)
            .status("B3", SeatStatus::InProgress)
    }

    /// [`sample_builder`] built
    #[must_use]
    pub fn sample_show() -> ShowDescriptor {
        sample_builder().build()
    }
}

/// Property-based testing strategies
pub mod properties {
    use proptest::prelude::*;
    use seatmap_core::types::SeatId;

    /// Seat ids drawn from a small fixed pool so toggles collide often
    pub fn seat_ids() -> impl Strategy<Value = SeatId> {
        prop::sample::select(vec!["A1", "A2", "A3", "A4", "B1", "B2", "B3", "B4"])
            .prop_map(super::fixtures::seat)
    }

    /// Well-formed encoded seat cells (`<id>:<price>`)
    pub fn seat_cells() -> impl Strategy<Value = String> {
        ("[A-Z][0-9]{1,2}", 0u64..100_000).prop_map(|(id, price)| format!("{id}:{price}"))
    }

    /// A cap as offered by the seat-count selector
    pub fn seat_counts() -> impl Strategy<Value = usize> {
        1usize..=6
    }
}

/// Install a test-friendly tracing subscriber once
///
/// Safe to call from every test; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}
