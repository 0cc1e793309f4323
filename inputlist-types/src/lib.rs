//! Core types for the inputlist crate.
//!
//! This crate provides the presentation-agnostic model behind an input list:
//! - `InputItem`, `InputGroup` and `InputSection` - fields, the cells that hold them, and their sections
//! - `SectionTree` and `Coordinate` - the full model and positions inside it
//! - `BindingRegistry` and `InputData` - live per-field content and validation
//! - `Spacing` and `fit_height` - content height computation
//! - `ChangeStream` and `Scope` - push-based change notification

mod stream;
pub use stream::{ChangeStream, Scope, ScopeRef};

mod item;
pub use item::{Input, InputItem, InputKind, TextInput};

mod group;
pub use group::{InputGroup, InputGroupBuilder};

mod header;
pub use header::{
    HeaderBuilder, HeaderConfig, HeaderDecorator, HeaderView, Rgba, StandardHeaderBuilder,
    StandardHeaderConfig,
};

mod section;
pub use section::InputSection;

mod coordinate;
pub use coordinate::Coordinate;

mod tree;
pub use tree::{SectionEntry, SectionTree};

pub mod layout;
pub use layout::{Size, Spacing, fit_height};

mod binding;
pub use binding::{BindingRegistry, InputData, WeakBindingRegistry, WeakInputData};

mod validation;
pub use validation::{REQUIRED_ERROR, ValidationReport};
