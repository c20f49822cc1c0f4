//! # Composable Todo Runtime
//!
//! The Store runtime that owns feature state, runs the reducer, and
//! executes the effects it returns.
//!
//! The runtime is single-threaded and synchronous. [`Store::send`] runs an
//! action, and every action its effects dispatch, to completion before it
//! returns. Change listeners are then notified once with the final state.
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! store.subscribe(|state| render(state));
//! store.send(Action::DoSomething);
//!
//! let value = store.state(|s| s.some_field);
//! ```

use composable_todo_core::{action::Action, effect::Effect, reducer::Reducer};
use std::collections::VecDeque;

pub use config::StoreConfig;
pub use store::{DispatchReport, ListenerId, Store};

/// Configuration for Store instances
pub mod config {
    /// Default bound on follow-up actions per [`crate::Store::send`]
    pub const DEFAULT_MAX_DISPATCH_DEPTH: usize = 32;

    /// Configuration for Store instances
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_runtime::StoreConfig;
    ///
    /// let config = StoreConfig::default().with_max_dispatch_depth(8);
    /// assert_eq!(config.max_dispatch_depth, 8);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StoreConfig {
        /// Maximum number of actions dispatched by effects during a single
        /// `send`. Anything beyond is dropped and logged.
        pub max_dispatch_depth: usize,
    }

    impl StoreConfig {
        /// Create a new configuration with custom values
        #[must_use]
        pub const fn new(max_dispatch_depth: usize) -> Self {
            Self { max_dispatch_depth }
        }

        /// Set the maximum number of follow-up actions per `send`
        #[must_use]
        pub const fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
            self.max_dispatch_depth = depth;
            self
        }
    }

    impl Default for StoreConfig {
        fn default() -> Self {
            Self::new(DEFAULT_MAX_DISPATCH_DEPTH)
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Action, Effect, Reducer, StoreConfig, VecDeque};

    type Listener<S> = Box<dyn FnMut(&S)>;

    /// Handle returned by [`Store::subscribe`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ListenerId(u64);

    /// Outcome of a single [`Store::send`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DispatchReport {
        /// Actions reduced, including the one passed to `send`
        pub actions_processed: usize,
        /// Follow-up actions dropped because the dispatch bound was hit
        pub dropped: usize,
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, mutated only by the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. Change listeners (notified after each `send`)
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
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
        listeners: Vec<(ListenerId, Listener<S>)>,
        next_listener: u64,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Action,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
                listeners: Vec::new(),
                next_listener: 0,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Send an action through the reducer
        ///
        /// The action is reduced, then its effects are executed in order.
        /// Actions dispatched by effects are queued and reduced in FIFO
        /// order before this call returns, up to
        /// [`StoreConfig::max_dispatch_depth`] of them. Listeners are
        /// notified once, after the queue is drained.
        #[tracing::instrument(skip_all, name = "store_send", fields(action = action.name()))]
        pub fn send(&mut self, action: A) -> DispatchReport {
            let mut report = DispatchReport::default();
            let mut queue = VecDeque::from([action]);
            let mut dispatched = 0_usize;

            while let Some(action) = queue.pop_front() {
                let kind = action.kind();
                tracing::debug!(action = action.name(), kind = kind.as_str(), "reducing action");
                metrics::counter!("store.actions.total", "kind" => kind.as_str()).increment(1);

                let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
                report.actions_processed += 1;

                for follow_up in effects.into_iter().flat_map(Effect::into_actions) {
                    if dispatched >= self.config.max_dispatch_depth {
                        tracing::error!(
                            action = follow_up.name(),
                            max_dispatch_depth = self.config.max_dispatch_depth,
                            "dispatch bound reached, dropping follow-up action"
                        );
                        metrics::counter!("store.dispatch.dropped").increment(1);
                        report.dropped += 1;
                        continue;
                    }
                    dispatched += 1;
                    queue.push_back(follow_up);
                }
            }

            self.notify();
            report
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let item_count = store.state(|s| s.items.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Register a listener called with the latest state after every `send`
        pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
        where
            F: FnMut(&S) + 'static,
        {
            let id = ListenerId(self.next_listener);
            self.next_listener += 1;
            self.listeners.push((id, Box::new(listener)));
            id
        }

        /// Remove a listener. Returns false if it was not registered.
        pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
            let before = self.listeners.len();
            self.listeners.retain(|(existing, _)| *existing != id);
            self.listeners.len() != before
        }

        /// Number of registered listeners
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.listeners.len()
        }

        fn notify(&mut self) {
            for (_, listener) in &mut self.listeners {
                listener(&self.state);
            }
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &self.state)
                .field("config", &self.config)
                .field("listeners", &self.listeners.len())
                .finish_non_exhaustive()
        }
    }
}
