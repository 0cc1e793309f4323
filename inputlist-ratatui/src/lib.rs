//! # inputlist-ratatui
//!
//! Terminal renderer for inputlist.
//!
//! [`TerminalGrid`] lays every section header and input group out top to
//! bottom, one bordered text box per input. Users move between fields with
//! Tab/Shift+Tab or the arrow keys and submit with Enter; the form is only
//! accepted once every binding validates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use example_forms::Registration;
//! use inputlist::{InputListView, Spacing};
//! use inputlist_ratatui::TerminalGrid;
//!
//! fn main() -> anyhow::Result<()> {
//!     let view = InputListView::new(TerminalGrid::new().with_title("Registration"));
//!     view.set_spacing(Some(Spacing::new(0.0, 0.5, 1.0)));
//!     view.set_inputs(Registration::tree());
//!
//!     let bindings = inputlist_ratatui::run(&view)?;
//!     println!("{:#?}", bindings.contents());
//!     Ok(())
//! }
//! ```

mod app;
mod grid;
mod theme;
mod widgets;

pub use app::{TerminalError, handle_key, run};
pub use grid::TerminalGrid;
pub use theme::{Theme, terminal_color};
pub use widgets::{MASK_CHAR, TerminalCell, TerminalHeader, TextField};
