//! Reducer logic for the todo list.
//!
//! Commands are validated and turned into events; events are applied to
//! state. A rejected command becomes a `CommandRejected` event, which only
//! records the error and leaves the list untouched.

use crate::error::{NotFoundError, TodoError, ValidationError};
use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use composable_todo_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Environment dependencies for the todo reducer
///
/// The reducer is fully deterministic: ids come from the state's own
/// counter, so there is nothing to inject.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoEnvironment;

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates an `AddTodo` command against `state`, returning the item
    /// it would append
    ///
    /// The store facade calls this too, so `add` reports exactly what the
    /// reducer decides.
    pub(crate) fn plan_add(state: &TodoState, text: &str) -> Result<TodoItem, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty);
        }
        // The item after this one needs an id too
        if state.next_id().get().checked_add(1).is_none() {
            return Err(ValidationError::IdSpaceExhausted);
        }
        Ok(TodoItem::new(state.next_id(), text.to_string()))
    }

    /// Validates a command that targets an existing item
    fn validate_exists(state: &TodoState, id: TodoId) -> Result<&TodoItem, TodoError> {
        state.get(id).ok_or_else(|| NotFoundError { id }.into())
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: &TodoAction) {
        match action {
            TodoAction::InputChanged { text } => {
                state.set_pending_input(text.clone());
            },
            TodoAction::TodoAdded { item } => {
                match state.push(item.clone()) {
                    Ok(()) => {
                        state.set_pending_input(String::new());
                        state.set_last_error(None);
                    },
                    Err(error) => {
                        tracing::warn!(id = %item.id, %error, "ignoring TodoAdded");
                    },
                }
            },
            TodoAction::TodoToggled { id, completed } => {
                if let Some(item) = state.get_mut(*id) {
                    item.completed = *completed;
                }
                state.set_last_error(None);
            },
            TodoAction::TodoDeleted { id } => {
                state.remove(*id);
                state.set_last_error(None);
            },
            TodoAction::CommandRejected { error } => {
                state.set_last_error(Some(error.clone()));
            },
            // Commands are not applied to state
            TodoAction::SetInput { .. }
            | TodoAction::SubmitInput
            | TodoAction::AddTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. } => {},
        }
    }

    fn reject(state: &mut TodoState, command: &'static str, error: TodoError) {
        tracing::warn!(command, %error, "command rejected");
        Self::apply_event(state, &TodoAction::CommandRejected { error });
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::SetInput { text } => {
                Self::apply_event(state, &TodoAction::InputChanged { text });
                SmallVec::new()
            },

            TodoAction::SubmitInput => {
                let text = state.pending_input().to_string();
                smallvec![Effect::dispatch(TodoAction::AddTodo { text })]
            },

            TodoAction::AddTodo { text } => {
                let item = match Self::plan_add(state, &text) {
                    Ok(item) => item,
                    Err(error) => {
                        Self::reject(state, "AddTodo", error.into());
                        return SmallVec::new();
                    },
                };

                tracing::info!(id = %item.id, text = %item.text, "todo added");
                Self::apply_event(state, &TodoAction::TodoAdded { item });
                SmallVec::new()
            },

            TodoAction::ToggleTodo { id } => {
                let completed = match Self::validate_exists(state, id) {
                    Ok(item) => !item.completed,
                    Err(error) => {
                        Self::reject(state, "ToggleTodo", error);
                        return SmallVec::new();
                    },
                };

                tracing::debug!(%id, completed, "todo toggled");
                Self::apply_event(state, &TodoAction::TodoToggled { id, completed });
                SmallVec::new()
            },

            TodoAction::DeleteTodo { id } => {
                if let Err(error) = Self::validate_exists(state, id) {
                    Self::reject(state, "DeleteTodo", error);
                    return SmallVec::new();
                }

                tracing::info!(%id, "todo deleted");
                Self::apply_event(state, &TodoAction::TodoDeleted { id });
                SmallVec::new()
            },

            // ========== Events ==========
            TodoAction::InputChanged { .. }
            | TodoAction::TodoAdded { .. }
            | TodoAction::TodoToggled { .. }
            | TodoAction::TodoDeleted { .. }
            | TodoAction::CommandRejected { .. } => {
                // Replayed facts, applied as-is
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
