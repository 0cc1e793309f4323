use std::fmt;

use crate::{Input, InputSection};

/// An ordered set of inputs rendered together inside one grid cell.
///
/// Groups are frozen once built. Empty groups are allowed and have height 0.
#[derive(Clone, Default)]
pub struct InputGroup {
    items: Vec<Input>,
}

impl InputGroup {
    /// Start building a group.
    pub fn builder() -> InputGroupBuilder {
        InputGroupBuilder::default()
    }

    /// A group holding a single input.
    pub fn single(item: Input) -> Self {
        Self { items: vec![item] }
    }

    /// The inputs, in display order.
    pub fn items(&self) -> &[Input] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The tallest intrinsic height among the inputs, 0 when none is set.
    pub fn largest_height(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.input_height().unwrap_or(0.0))
            .fold(0.0, f64::max)
    }

    /// The section of the first input.
    pub fn section(&self) -> Option<InputSection> {
        self.items.first().and_then(|item| item.section())
    }

    /// Position of the input with the given identifier.
    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.identifier() == identifier)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.identifier())
    }
}

impl fmt::Debug for InputGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.identifiers()).finish()
    }
}

impl FromIterator<Input> for InputGroup {
    fn from_iter<I: IntoIterator<Item = Input>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Accumulates inputs, then freezes them into an [`InputGroup`].
#[derive(Default)]
pub struct InputGroupBuilder {
    items: Vec<Input>,
}

impl InputGroupBuilder {
    pub fn with_item(mut self, item: Input) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Input>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn build(self) -> InputGroup {
        InputGroup { items: self.items }
    }
}
