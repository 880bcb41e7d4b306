//! # Seatmap Runtime
//!
//! The imperative shell around the seat map's functional core.
//!
//! This crate provides the Store that owns the session state, runs the
//! reducer and executes the effects it returns, plus the loaders that read the
//! show descriptor from HTTP or the filesystem.
//!
//! ## Core Components
//!
//! - **Store**: owns state, serializes dispatches, feeds effect output back
//! - **Loader**: [`loader::HttpShowSource`] and [`loader::FileShowSource`]
//! - **Health**: readiness derived from the session phase
//!
//! ## Example
//!
//! ```ignore
//! use seatmap_runtime::{loader, Store};
//! use seatmap_core::session::*;
//!
//! let source = loader::source_for(&loader::ShowLocation::parse("seats.json"));
//! let store = Store::new(
//!     SessionState::default(),
//!     SeatPickerReducer::new(),
//!     SeatPickerEnvironment::new(source),
//! );
//!
//! // Resolves once the fetch has completed and its result was reduced
//! store.send(SeatPickerAction::LoadShow).await?;
//!
//! let total = store.state(|s| s.ready().map(|session| session.total())).await;
//! ```

use seatmap_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Show descriptor loaders
pub mod loader;

/// Health reporting
pub mod health;

pub use health::{session_health, HealthCheck, HealthStatus};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// Store module - the runtime coordinator
pub mod store {
    use super::{Arc, Effect, Reducer, RwLock, StoreError};
    use futures::future::BoxFuture;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::broadcast;

    /// Default capacity of the action broadcast channel
    const DEFAULT_BROADCAST_CAPACITY: usize = 16;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the reducer runs under the write lock)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution, awaited inline, with feedback
    ///
    /// Because effects are awaited inside [`Store::send`], a returned `send`
    /// means every action the dispatch caused has been reduced.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        /// Actions produced by effects, for observers
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(initial_state, reducer, environment, DEFAULT_BROADCAST_CAPACITY)
        }

        /// Create a store with a custom action broadcast capacity
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, executes the returned effects, and reduces every
        /// action they produce, in order, before returning.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            let mut queue = VecDeque::from([action]);

            while let Some(action) = queue.pop_front() {
                metrics::counter!("store.actions.total").increment(1);

                let effects = {
                    let mut state = self.state.write().await;
                    tracing::trace!("Acquired write lock on state");
                    self.reducer.reduce(&mut state, action, &self.environment)
                };

                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                for effect in effects {
                    for produced in execute_effect(effect).await {
                        // Nobody listening is fine
                        let _ = self.action_broadcast.send(produced.clone());
                        queue.push_back(produced);
                    }
                }
            }

            tracing::debug!("Action processing completed");
            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let selected = store.state(|s| s.ready().map(|r| r.selection().len())).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Subscribe to actions produced by effects
        ///
        /// Only feedback actions are broadcast, not the actions passed to
        /// [`Store::send`].
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Stop accepting new actions
        ///
        /// Dispatches already running complete normally.
        pub fn shutdown(&self) {
            if !self.shutdown.swap(true, Ordering::AcqRel) {
                tracing::info!("Store shutting down");
            }
        }

        /// Whether [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }

    /// Execute one effect, collecting the actions it produces in order
    fn execute_effect<A: Send + 'static>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
        Box::pin(async move {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                    Vec::new()
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    fut.await.into_iter().collect()
                },
                Effect::Sequential(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                    let mut produced = Vec::new();
                    for effect in effects {
                        produced.extend(execute_effect(effect).await);
                    }
                    produced
                },
                Effect::Parallel(effects) => {
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                    futures::future::join_all(effects.into_iter().map(execute_effect))
                        .await
                        .into_iter()
                        .flatten()
                        .collect()
                },
            }
        })
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
