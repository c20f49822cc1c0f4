//! Errors reported by the todo store.
//!
//! None of these errors is fatal. A rejected operation leaves the list exactly as
//! it was, and the caller decides how to surface it.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input rejected by `add`
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// The text was empty after trimming surrounding whitespace
    #[error("todo text cannot be empty")]
    Empty,

    /// Every id up to `u64::MAX` has been handed out
    #[error("no ids left to assign")]
    IdSpaceExhausted,
}

/// No item with the given id exists
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("todo {id} not found")]
pub struct NotFoundError {
    /// The id that was looked up
    pub id: TodoId,
}

/// Any rejection produced by the todo reducer
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoError {
    /// `AddTodo` failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `ToggleTodo` or `DeleteTodo` referenced a missing item
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// A `TodoState` or replayed item that would break the id invariants
///
/// Every id must be unique and strictly below the state's id counter, and
/// every text must be non-blank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidStateError {
    /// Two items share an id
    #[error("duplicate todo id {0}")]
    DuplicateId(TodoId),

    /// An id is not below the counter, or has no successor
    #[error("todo id {id} is out of range for next id {next_id}")]
    IdOutOfRange {
        /// Offending id
        id: TodoId,
        /// Counter value at the time
        next_id: TodoId,
    },

    /// An item's text is blank
    #[error("todo {0} has empty text")]
    EmptyText(TodoId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(ValidationError::Empty.to_string(), "todo text cannot be empty");
        assert_eq!(
            InvalidStateError::DuplicateId(TodoId::new(3)).to_string(),
            "duplicate todo id 3"
        );
        assert_eq!(
            NotFoundError { id: TodoId::new(42) }.to_string(),
            "todo 42 not found"
        );
    }

    #[test]
    fn todo_error_is_transparent() {
        let error = TodoError::from(NotFoundError { id: TodoId::new(7) });
        assert_eq!(error.to_string(), "todo 7 not found");

        let error = TodoError::from(ValidationError::Empty);
        assert_eq!(error, TodoError::Validation(ValidationError::Empty));
    }
}
