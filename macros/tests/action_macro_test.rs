//! Tests for #[derive(Action)] macro

use composable_todo_core::action::{Action as _, ActionKind};
use composable_todo_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum TodoAction {
    #[command]
    AddTodo {
        text: String,
    },

    #[command]
    ToggleTodo(u64),

    #[command]
    SubmitInput,

    #[event]
    TodoAdded {
        id: u64,
        text: String,
    },

    #[event]
    TodoToggled(u64, bool),

    #[event]
    InputCleared,
}

#[derive(Action, Clone, Debug)]
enum Wrapped<T: Clone> {
    #[command]
    Send(T),

    #[event]
    Sent,
}

#[test]
fn test_is_command() {
    let action = TodoAction::AddTodo {
        text: "Test".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
    assert_eq!(action.kind(), ActionKind::Command);
}

#[test]
fn test_is_event() {
    let action = TodoAction::TodoAdded {
        id: 1,
        text: "Test".to_string(),
    };
    assert!(!action.is_command());
    assert!(action.is_event());
    assert_eq!(action.kind(), ActionKind::Event);
}

#[test]
fn test_all_commands_identified() {
    let commands = vec![
        TodoAction::AddTodo {
            text: "Test".to_string(),
        },
        TodoAction::ToggleTodo(3),
        TodoAction::SubmitInput,
    ];

    for cmd in commands {
        assert!(cmd.is_command(), "Expected command: {cmd:?}");
        assert!(!cmd.is_event(), "Should not be event: {cmd:?}");
    }
}

#[test]
fn test_all_events_identified() {
    let events = vec![
        TodoAction::TodoAdded {
            id: 1,
            text: "Test".to_string(),
        },
        TodoAction::TodoToggled(1, true),
        TodoAction::InputCleared,
    ];

    for event in events {
        assert!(!event.is_command(), "Should not be command: {event:?}");
        assert!(event.is_event(), "Expected event: {event:?}");
    }
}

#[test]
fn test_names_match_variants() {
    let cases = vec![
        (TodoAction::AddTodo { text: String::new() }, "AddTodo"),
        (TodoAction::ToggleTodo(1), "ToggleTodo"),
        (TodoAction::SubmitInput, "SubmitInput"),
        (TodoAction::TodoToggled(1, false), "TodoToggled"),
        (TodoAction::InputCleared, "InputCleared"),
    ];

    for (action, expected) in cases {
        assert_eq!(action.name(), expected);
    }
}

#[test]
fn test_generic_enum() {
    let send = Wrapped::Send(5_u8);
    assert!(send.is_command());
    assert_eq!(send.name(), "Send");

    let sent: Wrapped<u8> = Wrapped::Sent;
    assert!(sent.is_event());
}
