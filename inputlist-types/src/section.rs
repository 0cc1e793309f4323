use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{
    HeaderBuilder, HeaderConfig, HeaderDecorator, StandardHeaderBuilder, StandardHeaderConfig,
};

/// A named grouping of input groups, with an optional header.
///
/// Sections are identified purely by `identifier`: two sections with the same
/// identifier compare equal even when their header or decoration differ.
/// Callers must keep metadata consistent for a given identifier.
#[derive(Clone)]
pub struct InputSection {
    identifier: String,
    header: String,
    header_builder: Option<Arc<dyn HeaderBuilder>>,
    header_config: Option<Arc<dyn HeaderConfig>>,
    decorator: HeaderDecorator,
}

impl InputSection {
    /// Create a section using the standard header builder and config.
    pub fn new(identifier: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            header: header.into(),
            header_builder: None,
            header_config: None,
            decorator: HeaderDecorator::default(),
        }
    }

    pub fn with_header_builder(mut self, builder: impl HeaderBuilder + 'static) -> Self {
        self.header_builder = Some(Arc::new(builder));
        self
    }

    pub fn with_header_config(mut self, config: impl HeaderConfig + 'static) -> Self {
        self.header_config = Some(Arc::new(config));
        self
    }

    pub fn with_decorator(mut self, decorator: HeaderDecorator) -> Self {
        self.decorator = decorator;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Display string for the header.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn decorator(&self) -> &HeaderDecorator {
        &self.decorator
    }

    /// The supplied header builder, or [`StandardHeaderBuilder`].
    pub fn header_builder(&self) -> &dyn HeaderBuilder {
        match &self.header_builder {
            Some(builder) => builder.as_ref(),
            None => &StandardHeaderBuilder,
        }
    }

    /// The supplied header config, or [`StandardHeaderConfig`].
    pub fn header_config(&self) -> &dyn HeaderConfig {
        match &self.header_config {
            Some(config) => config.as_ref(),
            None => &StandardHeaderConfig,
        }
    }

    /// Check whether the header string and decoration match.
    ///
    /// Builder and config capabilities cannot be compared and are ignored.
    pub fn has_same_metadata(&self, other: &Self) -> bool {
        self.header == other.header && self.decorator == other.decorator
    }
}

impl PartialEq for InputSection {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for InputSection {}

impl Hash for InputSection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl fmt::Debug for InputSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSection")
            .field("identifier", &self.identifier)
            .field("header", &self.header)
            .field("decorator", &self.decorator)
            .field("custom_builder", &self.header_builder.is_some())
            .field("custom_config", &self.header_config.is_some())
            .finish()
    }
}
