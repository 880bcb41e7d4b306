//! # Seatmap Core
//!
//! The functional core of the seat map: everything that decides what a seat
//! looks like, whether it can be picked, and what the picked seats cost.
//!
//! Nothing in this crate performs I/O. Loading a show is described as an
//! [`effect::Effect`] and executed by the runtime crate.
//!
//! ## Core Concepts
//!
//! - **ShowDescriptor**: the immutable show snapshot (movie, layout, statuses)
//! - **Classifier**: `(seat, statuses, selection) → DisplayState`
//! - **SelectionState**: ordered picks capped by `max_seats`
//! - **PriceTable**: seat prices keyed by seat id
//! - **Reducer**: `(SessionState, SeatPickerAction, Environment) → Effects`
//!
//! ## Example
//!
//! ```
//! use seatmap_core::layout::parse_row;
//! use seatmap_core::selection::{SelectionState, ToggleOutcome};
//! use seatmap_core::types::SeatId;
//!
//! let row = parse_row(&["A1:150", "A2:150", "&", "A3:200"]).unwrap();
//! assert_eq!(row.len(), 4);
//!
//! let mut selection = SelectionState::new(2);
//! let a1 = SeatId::new("A1").unwrap();
//! assert_eq!(selection.toggle(&a1), ToggleOutcome::Selected);
//! assert_eq!(selection.toggle(&a1), ToggleOutcome::Deselected);
//! ```

pub use smallvec::{smallvec, SmallVec};

pub mod classify;
pub mod error;
pub mod layout;
pub mod pricing;
pub mod selection;
pub mod session;
pub mod types;

/// Reducer module - the single entry point for state changes
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// The session reducer in [`crate::session`] is the only implementation in
/// this workspace, but the trait keeps the runtime independent of it.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for SeatPickerReducer {
    ///     type State = SessionState;
    ///     type Action = SeatPickerAction;
    ///     type Environment = SeatPickerEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut SessionState,
    ///         action: SeatPickerAction,
    ///         env: &SeatPickerEnvironment,
    ///     ) -> SmallVec<[Effect<SeatPickerAction>; 4]> {
    ///         match action {
    ///             SeatPickerAction::ToggleSeat { seat_id } => { /* ... */ }
    ///             _ => {}
    ///         }
    ///         SmallVec::new()
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns descriptions of the side
        /// effects the runtime should execute. Must not perform I/O itself.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values returned from reducers. The runtime executes them and
/// feeds any produced action back into the reducer.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently
        Parallel(Vec<Effect<Action>>),

        /// Run effects one after another
        Sequential(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run concurrently
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Whether executing this effect can never produce an action
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    effects.iter().all(Effect::is_none)
                },
                Effect::Future(_) => false,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// The reducer never reaches for a network client or the filesystem. It asks
/// the environment's [`environment::ShowSource`] for a future and hands that
/// future to the runtime as an effect.
pub mod environment {
    use crate::error::LoadError;
    use crate::types::ShowDescriptor;
    use std::future::Future;
    use std::pin::Pin;

    /// Boxed future returned by [`ShowSource::fetch_show`]
    pub type ShowFuture<'a> =
        Pin<Box<dyn Future<Output = Result<ShowDescriptor, LoadError>> + Send + 'a>>;

    /// Where the show descriptor comes from
    ///
    /// # Implementations
    ///
    /// - `HttpShowSource` (in `seatmap-runtime`): GET a JSON document
    /// - `FileShowSource` (in `seatmap-runtime`): read a JSON file
    /// - `StaticShowSource` (in `seatmap-testing`): canned result for tests
    ///
    /// # Example
    ///
    /// ```ignore
    /// struct Fixed(ShowDescriptor);
    ///
    /// impl ShowSource for Fixed {
    ///     fn describe(&self) -> String {
    ///         "fixed".to_string()
    ///     }
    ///
    ///     fn fetch_show(&self) -> ShowFuture<'_> {
    ///         let show = self.0.clone();
    ///         Box::pin(async move { Ok(show) })
    ///     }
    /// }
    /// ```
    pub trait ShowSource: Send + Sync {
        /// Human-readable location, used in logs
        fn describe(&self) -> String;

        /// Read and validate the show descriptor once
        ///
        /// # Errors
        ///
        /// Returns [`LoadError`] when the source cannot be read or the payload
        /// does not describe a valid show.
        fn fetch_show(&self) -> ShowFuture<'_>;
    }
}
