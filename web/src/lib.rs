//! Axum front end for the seat map.
//!
//! The functional core (`seatmap-core`) owns the rules; this crate is the
//! imperative shell that turns HTTP requests into actions and session state
//! into pages and JSON.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Validate** against the current session (unknown or unbookable seats
//!    are rejected here)
//! 3. **Dispatch** the action through the `Store`
//! 4. **Render** a fresh [`render::SessionView`] as HTML or JSON
//!
//! # Example
//!
//! ```ignore
//! use seatmap_web::{build_router, AppState, Config};
//!
//! let config = Config::from_env();
//! let state = AppState::new(store, config.show.clone());
//! let app = build_router(state);
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use routes::build_router;
pub use state::{AppState, SeatStore};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
