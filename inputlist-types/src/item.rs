use std::fmt;
use std::sync::Arc;

use crate::{BindingRegistry, InputSection};

/// Shared handle to an input item, as stored in groups and bindings.
pub type Input = Arc<dyn InputItem>;

type Validator = dyn Fn(&str, &BindingRegistry) -> Result<(), String> + Send + Sync;

/// Presentation hint for the widget that edits an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// Single-line text.
    #[default]
    Text,
    /// Single-line text with masked display.
    Password,
    /// Multi-line text.
    Multiline,
}

/// A single form field: its identity, constraints and validation rule.
///
/// Identifiers must be unique across an entire [`SectionTree`](crate::SectionTree).
/// Duplicates are a caller error and are only detected on a best-effort basis.
pub trait InputItem: Send + Sync {
    /// Stable identifier of this input.
    fn identifier(&self) -> &str;

    /// Whether an empty value fails validation.
    fn is_required(&self) -> bool;

    /// The section this input is displayed in.
    fn section(&self) -> Option<InputSection> {
        None
    }

    /// Intrinsic height of the widget; `None` counts as zero.
    fn input_height(&self) -> Option<f64> {
        None
    }

    /// Placeholder text shown while the field is empty.
    fn placeholder(&self) -> Option<&str> {
        None
    }

    /// What kind of widget should edit this input.
    fn kind(&self) -> InputKind {
        InputKind::Text
    }

    /// Whether widgets mark this input as required.
    fn shows_required_indicator(&self) -> bool {
        self.is_required()
    }

    /// Validates a non-empty candidate value.
    ///
    /// # Arguments
    /// * `content` - The value to validate
    /// * `inputs` - Every binding in the current list (for inter-field validation)
    ///
    /// # Returns
    /// * `Ok(())` if validation passes
    /// * `Err(message)` with an error message if validation fails
    fn validate(&self, _content: &str, _inputs: &BindingRegistry) -> Result<(), String> {
        Ok(())
    }
}

impl fmt::Debug for dyn InputItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputItem")
            .field("identifier", &self.identifier())
            .field("required", &self.is_required())
            .finish()
    }
}

/// A ready-made [`InputItem`] for hosts without their own input types.
///
/// ```
/// use inputlist_types::{InputSection, TextInput};
///
/// let email = TextInput::new("email")
///     .required()
///     .in_section(InputSection::new("contact", "Contact information"))
///     .with_height(44.0)
///     .with_validator(|content, _| {
///         if content.contains('@') {
///             Ok(())
///         } else {
///             Err("Not an email".to_string())
///         }
///     })
///     .into_input();
///
/// assert_eq!(email.identifier(), "email");
/// ```
#[derive(Clone)]
pub struct TextInput {
    identifier: String,
    required: bool,
    section: Option<InputSection>,
    height: Option<f64>,
    placeholder: Option<String>,
    kind: InputKind,
    validator: Option<Arc<Validator>>,
}

impl TextInput {
    /// Create an optional text input with no section.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            required: false,
            section: None,
            height: None,
            placeholder: None,
            kind: InputKind::Text,
            validator: None,
        }
    }

    /// Mark the input as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Place the input in a section.
    pub fn in_section(mut self, section: InputSection) -> Self {
        self.section = Some(section);
        self
    }

    /// Set the intrinsic height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the widget kind.
    pub fn with_kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the validation rule applied to non-empty values.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str, &BindingRegistry) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Wrap into a shared [`Input`] handle.
    pub fn into_input(self) -> Input {
        Arc::new(self)
    }
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInput")
            .field("identifier", &self.identifier)
            .field("required", &self.required)
            .field("section", &self.section.as_ref().map(InputSection::identifier))
            .field("height", &self.height)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl InputItem for TextInput {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn section(&self) -> Option<InputSection> {
        self.section.clone()
    }

    fn input_height(&self) -> Option<f64> {
        self.height
    }

    fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    fn kind(&self) -> InputKind {
        self.kind
    }

    fn validate(&self, content: &str, inputs: &BindingRegistry) -> Result<(), String> {
        match &self.validator {
            Some(validator) => validator(content, inputs),
            None => Ok(()),
        }
    }
}
