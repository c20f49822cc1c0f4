//! Terminal front end for the todo store.
//!
//! Reads one command per line from stdin and re-renders the list after
//! every change. Logs go to stderr so they never interleave with the list.

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use todo::view::{self, Input, ViewState};
use todo::{TodoConfig, TodoStore};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = TodoConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_writer(io::stderr)
        .init();

    tracing::debug!(seed = %config.seed, "starting todo front end");

    let mut store = TodoStore::with_config(&config);
    let view_state = Rc::new(Cell::new(ViewState::default()));

    let render_state = Rc::clone(&view_state);
    store.subscribe(move |state| {
        println!("\n{}", view::render(state, &render_state.take()));
    });

    println!("{}", store.state(|s| view::render(s, &ViewState::default())));
    println!("Type `help` for commands.");

    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        match Input::parse(&line?) {
            Input::Add(text) => {
                if let Err(error) = store.add(&text) {
                    println!("{}", view::validation_notice(&error));
                }
            },
            Input::Toggle(id) => {
                view_state.set(ViewState { highlight: Some(id) });
                if let Err(error) = store.toggle(id) {
                    println!("{}", view::not_found_notice(&error));
                }
            },
            Input::Delete(id) => {
                if let Err(error) = store.delete(id) {
                    println!("{}", view::not_found_notice(&error));
                }
            },
            Input::List => println!("{}", store.state(|s| view::render(s, &ViewState::default()))),
            Input::Export => println!("{}", serde_json::to_string_pretty(&store.items())?),
            Input::Help => println!("{}", view::HELP),
            Input::Quit => break,
            Input::Invalid(message) => println!("{message}"),
        }
        prompt()?;
    }

    let stats = store.stats();
    tracing::info!(total = stats.total, completed = stats.completed, "exiting");
    Ok(())
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()
}
