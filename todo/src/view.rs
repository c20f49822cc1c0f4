//! Terminal rendering and input parsing for the `todo` binary.
//!
//! Everything here is a pure function of the store state plus a small
//! amount of view-local state, so it is tested without a terminal.

use crate::error::{NotFoundError, ValidationError};
use crate::types::{Stats, TodoId, TodoItem, TodoState};
use std::fmt::Write as _;

/// Shown instead of the list when there are no items
pub const EMPTY_MESSAGE: &str = "No todos yet. Add one to get started!";

/// Notice for a blank add
pub const EMPTY_INPUT_NOTICE: &str = "Please enter a todo item";

/// Usage text for the `help` command
pub const HELP: &str = "\
Commands:
  add <text>      add a todo (plain text works too)
  toggle <id>     mark a todo complete / incomplete (t <id>)
  delete <id>     remove a todo (d <id>)
  list            show the list again
  export          print the list as JSON
  help            show this help
  quit            exit";

/// Presentation-only state; the store never sees it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Item changed by the last toggle, highlighted on the next render
    pub highlight: Option<TodoId>,
}

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Add a todo with this text (may be blank; the store decides)
    Add(String),
    /// Toggle by id
    Toggle(TodoId),
    /// Delete by id
    Delete(TodoId),
    /// Re-render the list
    List,
    /// Print the list as JSON
    Export,
    /// Show usage
    Help,
    /// Exit
    Quit,
    /// Could not be understood; carries the message to show
    Invalid(String),
}

impl Input {
    /// Parse one line of input
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_lowercase().as_str() {
            "add" => Self::Add(rest.to_string()),
            "toggle" => Self::parse_id(rest).map_or_else(Self::Invalid, Self::Toggle),
            "delete" => Self::parse_id(rest).map_or_else(Self::Invalid, Self::Delete),
            // Short aliases only count with an id; "t shirts" is a todo
            "t" => rest.parse().map_or_else(|_| Self::Add(line.to_string()), Self::Toggle),
            "d" | "del" => rest
                .parse()
                .map_or_else(|_| Self::Add(line.to_string()), Self::Delete),
            "list" | "ls" if rest.is_empty() => Self::List,
            "export" if rest.is_empty() => Self::Export,
            "help" | "?" if rest.is_empty() => Self::Help,
            "quit" | "exit" | "q" if rest.is_empty() => Self::Quit,
            _ => Self::Add(line.to_string()),
        }
    }

    fn parse_id(raw: &str) -> Result<TodoId, String> {
        raw.parse()
            .map_err(|_| format!("Expected a numeric id, got {raw:?}"))
    }
}

/// Render the header, stats line, and list
#[must_use]
pub fn render(state: &TodoState, view: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "My Todo List");
    let _ = writeln!(out, "Stay organized and productive");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_stats(state.stats()));
    let _ = writeln!(out);
    out.push_str(&render_list(state.items(), view));
    out
}

/// `Total: N  Completed: N  Remaining: N`
#[must_use]
pub fn render_stats(stats: Stats) -> String {
    format!(
        "Total: {}  Completed: {}  Remaining: {}",
        stats.total, stats.completed, stats.remaining
    )
}

/// The items one per line, or [`EMPTY_MESSAGE`]
#[must_use]
pub fn render_list(items: &[TodoItem], view: &ViewState) -> String {
    if items.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    items.iter().fold(String::new(), |mut out, item| {
        let _ = writeln!(out, "{}", render_item(item, view.highlight == Some(item.id)));
        out
    })
}

/// `[x] 3. text`, with a trailing marker when highlighted
#[must_use]
pub fn render_item(item: &TodoItem, highlighted: bool) -> String {
    let check = if item.completed { 'x' } else { ' ' };
    let marker = if highlighted { "  <" } else { "" };
    format!("[{check}] {}. {}{marker}", item.id, item.text)
}

/// Blocking notice for a rejected add
#[must_use]
pub fn validation_notice(error: &ValidationError) -> String {
    match error {
        ValidationError::Empty => EMPTY_INPUT_NOTICE.to_string(),
        ValidationError::IdSpaceExhausted => "No more todos can be added".to_string(),
    }
}

/// Notice for a stale or mistyped id
#[must_use]
pub fn not_found_notice(error: &NotFoundError) -> String {
    format!("No todo with id {}", error.id)
}
