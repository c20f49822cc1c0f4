//! Domain types for the todo list.
//!
//! The list is an ordered `Vec` of items. Insertion order is the only
//! order; nothing sorts it. Ids come from a counter owned by the state, so
//! they are unique and never reused, even after a delete.

use crate::error::{InvalidStateError, TodoError};
use composable_todo_macros::Action;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::ParseIntError;
use std::str::FromStr;

/// Sample list a fresh store starts with: `(text, completed)` for ids 1..=6
pub const SAMPLE_TODOS: [(&str, bool); 6] = [
    ("Learn React Fundamentals", true),
    ("Master Component Architecture", true),
    ("Build a Todo App with Reusable Components", true),
    ("Implement Props Passing", false),
    ("Style Components with CSS", false),
    ("Deploy Application", false),
];

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from its raw value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Display text, never empty
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// Aggregate counts derived from the list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of items
    pub total: usize,
    /// Number of completed items
    pub completed: usize,
    /// `total - completed`
    pub remaining: usize,
}

/// State of the todo list
///
/// Fields are private: the reducer is the only writer, and everyone else
/// reads through accessors. Deserializing checks the id invariants, so a
/// state loaded from JSON is as trustworthy as one built by the reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoStateRepr")]
pub struct TodoState {
    items: Vec<TodoItem>,
    pending_input: String,
    next_id: u64,
    last_error: Option<TodoError>,
}

impl TodoState {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            pending_input: String::new(),
            next_id: 1,
            last_error: None,
        }
    }

    /// Creates the sample list: ids 1–6, the first three completed
    #[must_use]
    pub fn seeded() -> Self {
        let items: Vec<TodoItem> = (1_u64..)
            .zip(SAMPLE_TODOS)
            .map(|(id, (text, completed))| TodoItem {
                id: TodoId(id),
                text: text.to_string(),
                completed,
            })
            .collect();
        let next_id = items.len() as u64 + 1;

        Self {
            items,
            next_id,
            ..Self::new()
        }
    }

    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Derived counts; never stored
    #[must_use]
    pub fn stats(&self) -> Stats {
        let total = self.count();
        let completed = self.completed_count();
        Stats {
            total,
            completed,
            remaining: total - completed,
        }
    }

    /// Draft text for the next item
    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Id the next added item will receive
    #[must_use]
    pub const fn next_id(&self) -> TodoId {
        TodoId(self.next_id)
    }

    /// Rejection from the most recent command, cleared by the next success
    #[must_use]
    pub const fn last_error(&self) -> Option<&TodoError> {
        self.last_error.as_ref()
    }

    pub(crate) fn set_pending_input(&mut self, text: String) {
        self.pending_input = text;
    }

    pub(crate) fn set_last_error(&mut self, error: Option<TodoError>) {
        self.last_error = error;
    }

    /// Appends `item`, keeping `next_id` ahead of every id seen.
    ///
    /// State is untouched on error.
    pub(crate) fn push(&mut self, item: TodoItem) -> Result<(), InvalidStateError> {
        if self.exists(item.id) {
            return Err(InvalidStateError::DuplicateId(item.id));
        }
        if item.text.trim().is_empty() {
            return Err(InvalidStateError::EmptyText(item.id));
        }
        let successor = item
            .id
            .0
            .checked_add(1)
            .ok_or(InvalidStateError::IdOutOfRange {
                id: item.id,
                next_id: self.next_id(),
            })?;
        self.next_id = self.next_id.max(successor);
        self.items.push(item);
        Ok(())
    }

    pub(crate) fn get_mut(&mut self, id: TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub(crate) fn remove(&mut self, id: TodoId) -> Option<TodoItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new()
    }
}

/// Unchecked wire form of [`TodoState`]
#[derive(Deserialize)]
struct TodoStateRepr {
    items: Vec<TodoItem>,
    #[serde(default)]
    pending_input: String,
    next_id: u64,
    #[serde(default)]
    last_error: Option<TodoError>,
}

impl TryFrom<TodoStateRepr> for TodoState {
    type Error = InvalidStateError;

    fn try_from(repr: TodoStateRepr) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(repr.items.len());
        for item in &repr.items {
            if !seen.insert(item.id) {
                return Err(InvalidStateError::DuplicateId(item.id));
            }
            if item.id.0 >= repr.next_id {
                return Err(InvalidStateError::IdOutOfRange {
                    id: item.id,
                    next_id: TodoId(repr.next_id),
                });
            }
            if item.text.trim().is_empty() {
                return Err(InvalidStateError::EmptyText(item.id));
            }
        }

        Ok(Self {
            items: repr.items,
            pending_input: repr.pending_input,
            next_id: repr.next_id,
            last_error: repr.last_error,
        })
    }
}

/// Actions representing commands and events for todos
///
/// Commands may be rejected by the reducer. Events are already-validated
/// facts and are applied as-is, which also makes them replayable.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Replace the draft text
    #[command]
    SetInput {
        /// New draft text
        text: String,
    },

    /// Command: Add the draft text as a new item
    #[command]
    SubmitInput,

    /// Command: Add a new todo
    #[command]
    AddTodo {
        /// Text of the todo, trimmed before validation
        text: String,
    },

    /// Command: Flip the completion flag of a todo
    #[command]
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: Delete a todo
    #[command]
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: Draft text changed
    #[event]
    InputChanged {
        /// New draft text
        text: String,
    },

    /// Event: Todo was appended
    #[event]
    TodoAdded {
        /// The new item
        item: TodoItem,
    },

    /// Event: Todo completion flag changed
    #[event]
    TodoToggled {
        /// Todo identifier
        id: TodoId,
        /// New value of the flag
        completed: bool,
    },

    /// Event: Todo was deleted
    #[event]
    TodoDeleted {
        /// Todo identifier
        id: TodoId,
    },

    /// Event: A command was rejected
    #[event]
    CommandRejected {
        /// Why
        error: TodoError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use composable_todo_core::action::{Action as _, ActionKind};

    #[test]
    fn todo_id_display_and_parse() {
        let id = TodoId::new(12);
        assert_eq!(id.to_string(), "12");
        assert_eq!(" 12 ".parse::<TodoId>(), Ok(id));
        assert!("twelve".parse::<TodoId>().is_err());
    }

    #[test]
    fn todo_item_new() {
        let item = TodoItem::new(TodoId::new(1), "Test todo".to_string());

        assert_eq!(item.id, TodoId::new(1));
        assert_eq!(item.text, "Test todo");
        assert!(!item.completed);
    }

    #[test]
    fn seeded_state_matches_sample() {
        let state = TodoState::seeded();

        let ids: Vec<u64> = state.items().iter().map(|item| item.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(state.items()[0].text, "Learn React Fundamentals");
        assert_eq!(state.items()[5].text, "Deploy Application");
        assert_eq!(state.next_id(), TodoId::new(7));
        assert_eq!(
            state.stats(),
            Stats {
                total: 6,
                completed: 3,
                remaining: 3
            }
        );
    }

    #[test]
    fn empty_state() {
        let state = TodoState::new();
        assert!(state.is_empty());
        assert_eq!(state.stats(), Stats::default());
        assert_eq!(state.next_id(), TodoId::new(1));
        assert_eq!(state.pending_input(), "");
        assert!(state.last_error().is_none());
    }

    #[test]
    fn push_rejects_duplicate_ids_and_advances_counter() {
        let mut state = TodoState::new();
        assert_eq!(state.push(TodoItem::new(TodoId::new(10), "a".into())), Ok(()));
        assert_eq!(
            state.push(TodoItem::new(TodoId::new(10), "b".into())),
            Err(InvalidStateError::DuplicateId(TodoId::new(10)))
        );

        assert_eq!(state.count(), 1);
        assert_eq!(state.next_id(), TodoId::new(11));
    }

    #[test]
    fn push_rejects_last_id_without_overflow() {
        let mut state = TodoState::seeded();
        let before = state.clone();

        let result = state.push(TodoItem::new(TodoId::new(u64::MAX), "last".into()));

        assert_eq!(
            result,
            Err(InvalidStateError::IdOutOfRange {
                id: TodoId::new(u64::MAX),
                next_id: TodoId::new(7),
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn push_rejects_blank_text() {
        let mut state = TodoState::new();
        assert_eq!(
            state.push(TodoItem::new(TodoId::new(1), "   ".into())),
            Err(InvalidStateError::EmptyText(TodoId::new(1)))
        );
        assert!(state.is_empty());
    }

    #[test]
    fn state_json_roundtrip_keeps_counter() {
        let mut state = TodoState::seeded();
        state.remove(TodoId::new(6));

        let json = serde_json::to_string(&state).unwrap();
        let restored: TodoState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, state);
        assert_eq!(restored.next_id(), TodoId::new(7));
    }

    #[test]
    fn deserialize_rejects_duplicate_ids() {
        let json = r#"{
            "items": [
                {"id": 1, "text": "a", "completed": false},
                {"id": 1, "text": "b", "completed": true}
            ],
            "next_id": 2
        }"#;

        let error = serde_json::from_str::<TodoState>(json).unwrap_err();
        assert!(error.to_string().contains("duplicate todo id 1"), "{error}");
    }

    #[test]
    fn deserialize_rejects_stale_counter() {
        let json = r#"{
            "items": [{"id": 4, "text": "a", "completed": false}],
            "next_id": 4
        }"#;

        let error = serde_json::from_str::<TodoState>(json).unwrap_err();
        assert!(
            error.to_string().contains("todo id 4 is out of range for next id 4"),
            "{error}"
        );
    }

    #[test]
    fn deserialize_rejects_blank_text() {
        let json = r#"{"items": [{"id": 1, "text": " ", "completed": false}], "next_id": 2}"#;

        assert!(serde_json::from_str::<TodoState>(json).is_err());
    }

    #[test]
    fn deserialize_defaults_transient_fields() {
        let json = r#"{"items": [{"id": 3, "text": "a", "completed": true}], "next_id": 9}"#;

        let state: TodoState = serde_json::from_str(json).unwrap();
        assert_eq!(state.pending_input(), "");
        assert!(state.last_error().is_none());
        assert_eq!(state.next_id(), TodoId::new(9));
        assert_eq!(state.completed_count(), 1);
    }

    #[test]
    fn remove_preserves_order() {
        let mut state = TodoState::seeded();
        let removed = state.remove(TodoId::new(3));

        assert_eq!(removed.map(|item| item.id), Some(TodoId::new(3)));
        let ids: Vec<u64> = state.items().iter().map(|item| item.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 4, 5, 6]);
        assert!(state.remove(TodoId::new(3)).is_none());
    }

    #[test]
    fn action_kinds() {
        let command = TodoAction::AddTodo {
            text: "Test".to_string(),
        };
        assert!(command.is_command());
        assert_eq!(command.name(), "AddTodo");

        let event = TodoAction::TodoDeleted { id: TodoId::new(1) };
        assert_eq!(event.kind(), ActionKind::Event);
        assert_eq!(event.name(), "TodoDeleted");
    }
}
