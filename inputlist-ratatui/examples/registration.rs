//! Fill in the registration form in the terminal.
//!
//! Set `INPUTLIST_LOG` to a file path to capture logs, filtered by `RUST_LOG`.

use std::fs::File;
use std::sync::Mutex;

use example_forms::Registration;
use inputlist::{InputListView, Spacing};
use inputlist_ratatui::{TerminalError, TerminalGrid};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    if let Some(path) = std::env::var_os("INPUTLIST_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init();
    }

    let view = InputListView::new(TerminalGrid::new().with_title("Registration"));
    view.set_spacing(Some(Spacing::new(0.0, 0.5, 1.0)));
    view.set_inputs(Registration::tree());

    match inputlist_ratatui::run(&view) {
        Ok(bindings) => {
            println!("=== Registration ===");
            for (identifier, content) in bindings.contents() {
                println!("{identifier}: {content}");
            }
        }
        Err(TerminalError::Cancelled) => println!("Registration cancelled"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
