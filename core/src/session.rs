//! The seat picker session: state, actions and reducer.
//!
//! ```text
//!   Idle ──LoadShow──▶ Loading ──ShowLoaded──▶ Ready ◀─┐ ToggleSeat
//!    ▲                    │                      │     │ SetMaxSeats
//!    │                    └──LoadFailed──▶ Failed└─────┘ SeatStatusChanged
//!    └──────── LoadShow (from Failed) ───────────┘
//! ```
//!
//! The descriptor is fetched exactly once per successful load; once `Ready`,
//! further `LoadShow` actions are ignored.

use crate::classify::{self, DisplayState};
use crate::effect::Effect;
use crate::environment::ShowSource;
use crate::error::LoadError;
use crate::pricing::{compute_total, PriceTable};
use crate::reducer::Reducer;
use crate::selection::{SelectionState, ToggleOutcome};
use crate::types::{Price, SeatId, SeatStatus, SeatStatusMap, ShowDescriptor};
use smallvec::{smallvec, SmallVec};
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// State
// ============================================================================

/// Why a seat cannot be toggled or locked
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatRejection {
    /// No seat with this id in the layout
    #[error("seat {0} does not exist")]
    Unknown(SeatId),

    /// The seat carries a status
    #[error("seat {seat_id} is not bookable ({status:?})")]
    Unbookable {
        /// The seat
        seat_id: SeatId,
        /// Its current status
        status: SeatStatus,
    },
}

/// A loaded show together with this session's selection
#[derive(Clone, Debug)]
pub struct ShowSession {
    show: Arc<ShowDescriptor>,
    prices: PriceTable,
    statuses: SeatStatusMap,
    selection: SelectionState,
}

impl ShowSession {
    /// Start a session on a freshly loaded show, selection cap 1
    #[must_use]
    pub fn new(show: Arc<ShowDescriptor>) -> Self {
        let prices = PriceTable::from_layout(&show.seat_layout);
        let statuses = show.seat_status.clone();
        Self {
            show,
            prices,
            statuses,
            selection: SelectionState::default(),
        }
    }

    /// The show as loaded
    #[must_use]
    pub fn show(&self) -> &ShowDescriptor {
        &self.show
    }

    /// Live statuses (load-time statuses plus later changes)
    #[must_use]
    pub const fn statuses(&self) -> &SeatStatusMap {
        &self.statuses
    }

    /// Current selection
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Price lookup for this show
    #[must_use]
    pub const fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Display state of a seat
    #[must_use]
    pub fn classify(&self, seat_id: &SeatId) -> DisplayState {
        classify::classify(seat_id, &self.statuses, &self.selection)
    }

    /// Whether a toggle for this seat would be accepted
    ///
    /// # Errors
    ///
    /// Returns [`SeatRejection`] for unknown or unbookable seats.
    pub fn check_toggle(&self, seat_id: &SeatId) -> Result<(), SeatRejection> {
        if !self.prices.contains(seat_id) {
            return Err(SeatRejection::Unknown(seat_id.clone()));
        }
        match self.statuses.get(seat_id) {
            Some(status) => Err(SeatRejection::Unbookable {
                seat_id: seat_id.clone(),
                status,
            }),
            None => Ok(()),
        }
    }

    /// Total price of the selection
    #[must_use]
    pub fn total(&self) -> Price {
        compute_total(self.selection.selected(), &self.prices)
    }

    /// Toggle a bookable seat
    ///
    /// # Errors
    ///
    /// Returns [`SeatRejection`] without touching the selection when the seat
    /// is unknown or unbookable.
    pub fn toggle_seat(&mut self, seat_id: &SeatId) -> Result<ToggleOutcome, SeatRejection> {
        self.check_toggle(seat_id)?;
        Ok(self.selection.toggle(seat_id))
    }

    /// Change the cap, clearing the selection
    pub fn set_max_seats(&mut self, count: usize) {
        self.selection.set_max_seats(count);
    }

    /// Lock a bookable seat; returns `true` if it was auto-deselected
    ///
    /// Taken and in-progress seats stay locked for the rest of the session.
    ///
    /// # Errors
    ///
    /// Returns [`SeatRejection`] without touching the session when the seat
    /// is unknown or already carries a status.
    pub fn apply_status(
        &mut self,
        seat_id: SeatId,
        status: SeatStatus,
    ) -> Result<bool, SeatRejection> {
        self.check_toggle(&seat_id)?;
        let deselected = self.selection.deselect(&seat_id);
        self.statuses.set(seat_id, Some(status));
        Ok(deselected)
    }
}

/// Where the session is in its lifecycle
#[derive(Clone, Debug, Default)]
pub enum SessionPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Show loaded, seats can be picked
    Ready(Box<ShowSession>),
    /// Fetch failed; nothing to render but the error
    Failed(LoadError),
}

/// Reducer state for one browser session
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Lifecycle phase
    pub phase: SessionPhase,
}

impl SessionState {
    /// The loaded session, if any
    #[must_use]
    pub fn ready(&self) -> Option<&ShowSession> {
        match &self.phase {
            SessionPhase::Ready(session) => Some(&**session),
            _ => None,
        }
    }

    /// The load error, if loading failed
    #[must_use]
    pub const fn load_error(&self) -> Option<&LoadError> {
        match &self.phase {
            SessionPhase::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Whether a fetch is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Loading)
    }

    fn ready_mut(&mut self) -> Option<&mut ShowSession> {
        match &mut self.phase {
            SessionPhase::Ready(session) => Some(&mut **session),
            _ => None,
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Everything that can happen to a session
#[derive(Clone, Debug)]
pub enum SeatPickerAction {
    // ========== Commands ==========
    /// Fetch the show descriptor
    LoadShow,
    /// User clicked a seat
    ToggleSeat {
        /// The clicked seat
        seat_id: SeatId,
    },
    /// User changed the seat-count selector
    SetMaxSeats {
        /// New cap
        count: usize,
    },

    // ========== Events ==========
    /// The fetch succeeded
    ShowLoaded(Arc<ShowDescriptor>),
    /// The fetch failed
    LoadFailed(LoadError),
    /// A seat's status changed outside this session
    SeatStatusChanged {
        /// The seat
        seat_id: SeatId,
        /// Status the seat is locked with
        status: SeatStatus,
    },
}

// ============================================================================
// Environment & Reducer
// ============================================================================

/// Injected dependencies of the session reducer
#[derive(Clone)]
pub struct SeatPickerEnvironment {
    /// Where the show descriptor is read from
    pub source: Arc<dyn ShowSource>,
}

impl SeatPickerEnvironment {
    /// Create an environment reading from `source`
    #[must_use]
    pub fn new(source: Arc<dyn ShowSource>) -> Self {
        Self { source }
    }
}

impl std::fmt::Debug for SeatPickerEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeatPickerEnvironment")
            .field("source", &self.source.describe())
            .finish()
    }
}

/// Session reducer
#[derive(Debug, Clone, Copy, Default)]
pub struct SeatPickerReducer;

impl SeatPickerReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn load_effect(env: &SeatPickerEnvironment) -> Effect<SeatPickerAction> {
        let source = Arc::clone(&env.source);
        Effect::Future(Box::pin(async move {
            let action = match source.fetch_show().await {
                Ok(show) => SeatPickerAction::ShowLoaded(Arc::new(show)),
                Err(error) => SeatPickerAction::LoadFailed(error),
            };
            Some(action)
        }))
    }
}

impl Reducer for SeatPickerReducer {
    type State = SessionState;
    type Action = SeatPickerAction;
    type Environment = SeatPickerEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SeatPickerAction::LoadShow => match state.phase {
                SessionPhase::Idle | SessionPhase::Failed(_) => {
                    tracing::debug!(source = %env.source.describe(), "Loading show");
                    state.phase = SessionPhase::Loading;
                    smallvec![Self::load_effect(env)]
                },
                SessionPhase::Loading | SessionPhase::Ready(_) => {
                    tracing::debug!("LoadShow ignored: show already loading or loaded");
                    SmallVec::new()
                },
            },

            SeatPickerAction::ShowLoaded(show) => {
                if state.is_loading() {
                    tracing::debug!(
                        title = %show.movie.title,
                        seats = show.seat_layout.seat_count(),
                        "Show loaded"
                    );
                    state.phase = SessionPhase::Ready(Box::new(ShowSession::new(show)));
                } else {
                    tracing::warn!("ShowLoaded arrived while not loading; ignored");
                }
                SmallVec::new()
            },

            SeatPickerAction::LoadFailed(error) => {
                if state.is_loading() {
                    tracing::error!(%error, "Show failed to load");
                    state.phase = SessionPhase::Failed(error);
                } else {
                    tracing::warn!(%error, "LoadFailed arrived while not loading; ignored");
                }
                SmallVec::new()
            },

            SeatPickerAction::ToggleSeat { seat_id } => {
                let Some(session) = state.ready_mut() else {
                    tracing::warn!(%seat_id, "ToggleSeat before the show is loaded; ignored");
                    return SmallVec::new();
                };
                match session.toggle_seat(&seat_id) {
                    Ok(outcome) => tracing::debug!(
                        %seat_id,
                        ?outcome,
                        selected = session.selection().len(),
                        "Seat toggled"
                    ),
                    Err(rejection) => tracing::warn!(%rejection, "ToggleSeat ignored"),
                }
                SmallVec::new()
            },

            SeatPickerAction::SetMaxSeats { count } => {
                if let Some(session) = state.ready_mut() {
                    session.set_max_seats(count);
                    tracing::debug!(count, "Seat count changed, selection cleared");
                } else {
                    tracing::warn!(count, "SetMaxSeats before the show is loaded; ignored");
                }
                SmallVec::new()
            },

            SeatPickerAction::SeatStatusChanged { seat_id, status } => {
                let Some(session) = state.ready_mut() else {
                    tracing::warn!(%seat_id, "SeatStatusChanged before the show is loaded; ignored");
                    return SmallVec::new();
                };
                match session.apply_status(seat_id.clone(), status) {
                    Ok(deselected) => {
                        tracing::debug!(%seat_id, ?status, deselected, "Seat status changed");
                    },
                    Err(rejection) => tracing::warn!(%rejection, "SeatStatusChanged ignored"),
                }
                SmallVec::new()
            },
        }
    }
}
