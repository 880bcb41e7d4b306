//! Application state for Axum handlers.

use crate::config::ShowConfig;
use crate::error::AppError;
use crate::render::SessionView;
use seatmap_core::session::{
    SeatPickerAction, SeatPickerEnvironment, SeatPickerReducer, SessionState, ShowSession,
};
use seatmap_runtime::Store;
use std::sync::Arc;

/// The Store holding the seat picker session
pub type SeatStore = Store<SessionState, SeatPickerAction, SeatPickerEnvironment, SeatPickerReducer>;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via `Arc`) for each request.
#[derive(Clone)]
pub struct AppState {
    /// The session store
    pub store: Arc<SeatStore>,

    /// Presentation settings
    pub show: Arc<ShowConfig>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<SeatStore>, show: ShowConfig) -> Self {
        Self {
            store,
            show: Arc::new(show),
        }
    }

    /// Dispatch an action and wait for it and its effects to be reduced
    ///
    /// # Errors
    ///
    /// Returns 503 when the store is shutting down.
    pub async fn dispatch(&self, action: SeatPickerAction) -> Result<(), AppError> {
        self.store.send(action).await.map_err(AppError::from)
    }

    /// View of the loaded session
    ///
    /// # Errors
    ///
    /// Returns 503 when no show is loaded.
    pub async fn snapshot(&self) -> Result<SessionView, AppError> {
        self.store
            .state(|s| s.ready().map(|session| SessionView::build(session, &self.show)))
            .await
            .ok_or_else(|| AppError::unavailable("No show is loaded"))
    }

    /// Run `f` against the loaded session
    ///
    /// # Errors
    ///
    /// Returns 503 when no show is loaded.
    pub async fn with_session<T>(
        &self,
        f: impl FnOnce(&ShowSession) -> T,
    ) -> Result<T, AppError> {
        self.store
            .state(|s| s.ready().map(f))
            .await
            .ok_or_else(|| AppError::unavailable("No show is loaded"))
    }
}
