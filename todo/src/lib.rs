//! A todo list state store built on the Composable Todo reducer architecture.
//!
//! [`TodoStore`] owns an ordered list of [`TodoItem`]s and the draft input
//! text. It exposes `add`, `toggle`, `delete` and derived [`Stats`]; every
//! mutation runs through [`TodoReducer`], which keeps ids unique and the
//! insertion order stable.
//!
//! # Quick Start
//!
//! ```
//! use todo::{Stats, TodoStore, ValidationError};
//!
//! let mut store = TodoStore::new();
//! assert_eq!(store.stats(), Stats { total: 6, completed: 3, remaining: 3 });
//!
//! assert_eq!(store.add("   "), Err(ValidationError::Empty));
//!
//! let item = store.add("Write tests")?;
//! assert!(!item.completed);
//! assert_eq!(store.stats(), Stats { total: 7, completed: 3, remaining: 4 });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The `todo` binary is a thin terminal front end over the same store.

pub mod config;
pub mod error;
pub mod reducer;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{ConfigError, Seed, TodoConfig};
pub use error::{InvalidStateError, NotFoundError, TodoError, ValidationError};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::TodoStore;
pub use types::{Stats, TodoAction, TodoId, TodoItem, TodoState};
