//! # inputlist
//!
//! Reactive input binding and layout sizing for sectioned form lists.
//! Renderer-agnostic.
//!
//! An input list shows inputs in sections. Inside a section, inputs are
//! grouped into cells that share a row. The list keeps one live binding per
//! input, recomputes its own content height, and wires the field widgets of
//! whatever renderer draws it to those bindings.
//!
//! ## Usage
//!
//! ```rust
//! use inputlist::{InputGroup, InputListView, InputSection, Scope, TestRenderer, TextInput};
//!
//! let account = InputSection::new("account", "Account information");
//! let password = TextInput::new("password")
//!     .required()
//!     .in_section(account.clone())
//!     .with_height(44.0)
//!     .with_validator(|content, _| {
//!         if content.chars().count() < 8 {
//!             Err("Password too short".to_string())
//!         } else {
//!             Ok(())
//!         }
//!     })
//!     .into_input();
//!
//! let view = InputListView::new(TestRenderer::new());
//! view.set_groups([InputGroup::single(password.clone())]);
//!
//! // Bindings push validation results on every change.
//! let scope = Scope::new();
//! view.binding_registry().on_validation(&scope.handle(), |report| {
//!     println!("has errors: {}", report.has_errors());
//! });
//!
//! view.enter_value(password.as_ref(), "hunter22").unwrap();
//! assert!(!view.binding_registry().validate().has_errors());
//! ```
//!
//! ## Pipeline
//!
//! Every call to [`InputListView::set_inputs`] tears down the previous
//! subscriptions, builds a new [`BindingRegistry`], writes the new content
//! height to the renderer and reloads it, in that order. Observe the steps
//! through [`InputListView::phases`].
//!
//! ## Renderers
//!
//! Renderers implement [`GridRenderer`], and their cells and widgets
//! implement [`GridCell`] and [`FieldWidget`]:
//! - [`TestRenderer`] - in-memory, for tests
//! - `inputlist-ratatui` - terminal grid

// Re-export all types from inputlist-types
pub use inputlist_types::*;

mod renderer;
pub use renderer::{FieldWidget, GridCell, GridDataSource, GridRenderer, IndexPath, ViewKind};

mod delegate;
pub use delegate::InputListDelegate;

mod error;
pub use error::FieldLookupError;

mod presenter;
pub use presenter::{InputListView, Phase, PhaseEvent, RESIZE_ANIMATION};

// Test renderer for exercising input lists without a user interface
mod test_renderer;
pub use test_renderer::{TestCell, TestField, TestHeader, TestRenderer};
