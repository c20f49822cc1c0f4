//! `TodoStore`: the single owner of a todo list.
//!
//! Wraps the runtime [`Store`] and turns the reducer's recorded outcome
//! into plain `Result`s for the presentation layer.

use crate::config::{Seed, TodoConfig};
use crate::error::{NotFoundError, TodoError, ValidationError};
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{Stats, TodoAction, TodoId, TodoItem, TodoState};
use composable_todo_runtime::{DispatchReport, ListenerId, Store, StoreConfig};

type Inner = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Owns the todo list and the draft input; every mutation goes through here
///
/// # Example
///
/// ```
/// use todo::TodoStore;
///
/// let mut store = TodoStore::new();
/// assert_eq!(store.stats().total, 6);
///
/// let item = store.add("Write tests")?;
/// store.toggle(item.id)?;
/// assert_eq!(store.stats().completed, 4);
///
/// store.delete(item.id)?;
/// assert_eq!(store.stats().total, 6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct TodoStore {
    inner: Inner,
}

impl TodoStore {
    /// Creates a store holding the sample list
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(TodoState::seeded())
    }

    /// Creates a store with no items
    #[must_use]
    pub fn empty() -> Self {
        Self::with_state(TodoState::new())
    }

    /// Creates a store seeded according to `config`
    ///
    /// The dispatch bound is raised to at least 1, since `submit` always
    /// dispatches one follow-up `AddTodo`.
    #[must_use]
    pub fn with_config(config: &TodoConfig) -> Self {
        let state = match config.seed {
            Seed::Sample => TodoState::seeded(),
            Seed::Empty => TodoState::new(),
        };
        Self {
            inner: Store::with_config(
                state,
                TodoReducer::new(),
                TodoEnvironment,
                StoreConfig::default().with_max_dispatch_depth(config.max_dispatch_depth.max(1)),
            ),
        }
    }

    /// Creates a store around an existing state
    #[must_use]
    pub fn with_state(state: TodoState) -> Self {
        Self {
            inner: Store::new(state, TodoReducer::new(), TodoEnvironment),
        }
    }

    /// Adds a new item with the trimmed `text`, appended at the end
    ///
    /// Clears the draft input on success.
    ///
    /// # Errors
    ///
    /// [`ValidationError::Empty`] if `text` is blank, or
    /// [`ValidationError::IdSpaceExhausted`] if no id is left; nothing
    /// changes.
    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, text: &str) -> Result<TodoItem, ValidationError> {
        let planned = self.inner.state(|s| TodoReducer::plan_add(s, text));
        let report = self.inner.send(TodoAction::AddTodo {
            text: text.to_string(),
        });
        self.confirm_added(planned, report)
    }

    /// Adds the current draft input as a new item
    ///
    /// # Errors
    ///
    /// Same as [`TodoStore::add`]; on error the draft is kept.
    #[tracing::instrument(skip(self))]
    pub fn submit(&mut self) -> Result<TodoItem, ValidationError> {
        let planned = self.inner.state(|s| TodoReducer::plan_add(s, s.pending_input()));
        let report = self.inner.send(TodoAction::SubmitInput);
        self.confirm_added(planned, report)
    }

    /// Flips the completion flag of one item
    ///
    /// # Errors
    ///
    /// [`NotFoundError`] if no item has `id`; nothing changes.
    #[tracing::instrument(skip(self))]
    pub fn toggle(&mut self, id: TodoId) -> Result<(), NotFoundError> {
        self.inner.send(TodoAction::ToggleTodo { id });
        self.not_found()
    }

    /// Removes one item, keeping the order of the rest
    ///
    /// # Errors
    ///
    /// [`NotFoundError`] if no item has `id`; nothing changes.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: TodoId) -> Result<(), NotFoundError> {
        self.inner.send(TodoAction::DeleteTodo { id });
        self.not_found()
    }

    /// Replaces the draft input
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.inner.send(TodoAction::SetInput { text: text.into() });
    }

    /// Current draft input
    #[must_use]
    pub fn pending_input(&self) -> String {
        self.inner.state(|s| s.pending_input().to_string())
    }

    /// Total, completed and remaining counts
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.inner.state(TodoState::stats)
    }

    /// Snapshot of the items in insertion order
    #[must_use]
    pub fn items(&self) -> Vec<TodoItem> {
        self.inner.state(|s| s.items().to_vec())
    }

    /// Snapshot of one item
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<TodoItem> {
        self.inner.state(|s| s.get(id).cloned())
    }

    /// Returns true when the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state(TodoState::is_empty)
    }

    /// Read the full state through a closure
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TodoState) -> T,
    {
        self.inner.state(f)
    }

    /// Calls `listener` with the latest state after every operation
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TodoState) + 'static,
    {
        self.inner.subscribe(listener)
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.inner.unsubscribe(id)
    }

    /// Checks that the reducer appended exactly the planned item.
    ///
    /// `plan_add` and the reducer share one validation path and the
    /// dispatch bound is at least 1, so a mismatch is a bug.
    fn confirm_added(
        &self,
        planned: Result<TodoItem, ValidationError>,
        report: DispatchReport,
    ) -> Result<TodoItem, ValidationError> {
        let item = planned?;
        if report.dropped > 0 {
            tracing::error!(dropped = report.dropped, "add was dropped by the dispatch bound");
        }
        debug_assert_eq!(
            self.inner.state(|s| s.items().last().cloned()).as_ref(),
            Some(&item),
            "reducer did not append the planned item"
        );
        Ok(item)
    }

    fn not_found(&self) -> Result<(), NotFoundError> {
        self.inner.state(|s| match s.last_error() {
            Some(TodoError::NotFound(error)) => Err(*error),
            _ => Ok(()),
        })
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ids(store: &TodoStore) -> Vec<u64> {
        store.items().iter().map(|item| item.id.get()).collect()
    }

    #[test]
    fn add_returns_created_item() {
        let mut store = TodoStore::new();
        let item = store.add("  Write tests ").unwrap();

        assert_eq!(item.id, TodoId::new(7));
        assert_eq!(item.text, "Write tests");
        assert!(!item.completed);
        assert_eq!(store.items().last(), Some(&item));
    }

    #[test]
    fn add_blank_is_rejected() {
        let mut store = TodoStore::new();

        assert_eq!(store.add(""), Err(ValidationError::Empty));
        assert_eq!(store.add(" \t\n "), Err(ValidationError::Empty));
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn add_clears_pending_input() {
        let mut store = TodoStore::empty();
        store.set_input("draft");
        store.add("something else").unwrap();

        assert_eq!(store.pending_input(), "");
    }

    #[test]
    fn submit_adds_pending_input() {
        let mut store = TodoStore::empty();
        store.set_input("Buy milk");

        let item = store.submit().unwrap();

        assert_eq!(item.text, "Buy milk");
        assert_eq!(store.pending_input(), "");
        assert_eq!(store.items(), vec![item]);
    }

    #[test]
    fn submit_blank_keeps_draft() {
        let mut store = TodoStore::empty();
        store.set_input("   ");

        assert_eq!(store.submit(), Err(ValidationError::Empty));
        assert_eq!(store.pending_input(), "   ");
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_and_delete_report_missing_ids() {
        let mut store = TodoStore::new();
        let missing = TodoId::new(100);

        assert_eq!(store.toggle(missing), Err(NotFoundError { id: missing }));
        assert_eq!(store.delete(missing), Err(NotFoundError { id: missing }));
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn error_does_not_leak_into_next_operation() {
        let mut store = TodoStore::new();
        assert!(store.toggle(TodoId::new(100)).is_err());

        assert_eq!(store.toggle(TodoId::new(4)), Ok(()));
        assert_eq!(store.get(TodoId::new(4)).map(|item| item.completed), Some(true));
    }

    #[test]
    fn config_selects_seed() {
        let store = TodoStore::with_config(&TodoConfig {
            seed: Seed::Empty,
            ..TodoConfig::default()
        });
        assert!(store.is_empty());

        let store = TodoStore::with_config(&TodoConfig::default());
        assert_eq!(store.stats().total, 6);
    }

    #[test]
    fn submit_works_with_zero_dispatch_depth() {
        let mut store = TodoStore::with_config(&TodoConfig {
            seed: Seed::Empty,
            max_dispatch_depth: 0,
            ..TodoConfig::default()
        });
        store.set_input("Buy milk");

        let item = store.submit().unwrap();

        assert_eq!(item.id, TodoId::new(1));
        assert_eq!(store.items(), vec![item]);
        assert_eq!(store.pending_input(), "");
    }

    #[test]
    fn submit_with_minimal_dispatch_depth_reports_blank_draft() {
        let mut store = TodoStore::with_config(&TodoConfig {
            max_dispatch_depth: 1,
            ..TodoConfig::default()
        });
        store.set_input(" ");

        assert_eq!(store.submit(), Err(ValidationError::Empty));
        assert_eq!(store.pending_input(), " ");
        assert_eq!(store.stats().total, 6);
    }

    #[test]
    fn add_after_loading_state_appends_once() {
        let json = r#"{
            "items": [
                {"id": 2, "text": "Kept", "completed": true},
                {"id": 9, "text": "Also kept", "completed": false}
            ],
            "next_id": 12
        }"#;
        let mut store = TodoStore::with_state(serde_json::from_str(json).unwrap());

        let item = store.add("Fresh").unwrap();

        assert_eq!(item.id, TodoId::new(12));
        assert_eq!(ids(&store), vec![2, 9, 12]);
        assert_eq!(store.add("Next").map(|item| item.id), Ok(TodoId::new(13)));
    }

    #[test]
    fn add_reports_exhausted_ids() {
        let json = format!(r#"{{"items": [], "next_id": {}}}"#, u64::MAX);
        let mut store = TodoStore::with_state(serde_json::from_str(&json).unwrap());

        assert_eq!(store.add("one"), Err(ValidationError::IdSpaceExhausted));
        assert!(store.is_empty());
    }

    #[test]
    fn listeners_follow_every_operation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = TodoStore::new();
        let sink = Rc::clone(&seen);
        let listener = store.subscribe(move |state| sink.borrow_mut().push(state.stats().total));

        let item = store.add("Write tests").unwrap();
        let _ = store.add("");
        store.delete(item.id).unwrap();
        assert!(store.unsubscribe(listener));
        let _ = store.add("unseen");

        assert_eq!(*seen.borrow(), vec![7, 7, 6]);
    }
}
