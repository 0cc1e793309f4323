use indexmap::IndexMap;

/// Message recorded for a required input left empty.
pub const REQUIRED_ERROR: &str = "This field is required";

/// Outcome of validating a [`BindingRegistry`](crate::BindingRegistry).
///
/// Maps each failing input's identifier to its error message, in tree order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: IndexMap<String, String>,
}

impl ValidationReport {
    /// A report without errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error, replacing any earlier one for the same input.
    pub fn insert(&mut self, identifier: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(identifier.into(), message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_for(&self, identifier: &str) -> Option<&str> {
        self.errors.get(identifier).map(String::as_str)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(identifier, message)| (identifier.as_str(), message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> IndexMap<String, String> {
        self.errors
    }
}
