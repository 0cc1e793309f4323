//! Contracts between an input list and the grid that renders it.
//!
//! A [`GridRenderer`] owns retained, recyclable cells and headers. On every
//! reload it asks a [`GridDataSource`] how many sections and cells exist,
//! hands each reused or fresh view to the source to be configured, and asks
//! for each view's size. Cells hold one [`FieldWidget`] per input of the
//! group they show.

use std::fmt;
use std::time::Duration;

use inputlist_types::{Coordinate, HeaderView, InputGroup, ScopeRef, Size};

/// Position of a cell in the grid: a section and a group within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl From<Coordinate> for IndexPath {
    fn from(coordinate: Coordinate) -> Self {
        let (section, item) = coordinate.index_path();
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

/// A reusable view kind a grid must know before it can dequeue it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Cell(&'static str),
    Header(&'static str),
}

impl ViewKind {
    pub const INPUT_CELL: Self = ViewKind::Cell("InputCell");
    pub const INPUT_HEADER: Self = ViewKind::Header("InputHeader");
}

/// The editable control for one input.
pub trait FieldWidget {
    /// Current text.
    fn text(&self) -> &str;

    /// Replace the text and notify every text listener.
    fn set_text(&mut self, text: &str);

    /// Listen to text changes for as long as `scope` lives.
    fn subscribe_text(&self, scope: &ScopeRef, listener: Box<dyn FnMut(&str)>);
}

/// A recyclable grid cell displaying one input group.
pub trait GridCell {
    /// Remove every child widget and its layout constraints.
    fn clear(&mut self);

    /// Create one field widget per input of `group`, filling the cell.
    fn mount(&mut self, group: &InputGroup);

    fn field_count(&self) -> usize;

    fn field(&self, index: usize) -> Option<&dyn FieldWidget>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn FieldWidget>;
}

/// What a grid asks of its owner while reloading.
pub trait GridDataSource {
    fn section_count(&self) -> usize;

    /// Number of cells in `section`.
    fn item_count(&self, section: usize) -> usize;

    /// Populate a dequeued cell. The cell may still hold widgets from its
    /// previous position.
    fn configure_cell(&self, path: IndexPath, cell: &mut dyn GridCell);

    /// Populate a dequeued section header.
    fn configure_header(&self, section: usize, header: &mut dyn HeaderView);

    fn cell_size(&self, path: IndexPath, available_width: f64) -> Size;

    fn header_size(&self, section: usize, available_width: f64) -> Size;

    /// Gap between consecutive cells, starting with the cells of `section`.
    fn item_spacing(&self, section: usize) -> f64 {
        let _ = section;
        0.0
    }

    /// Gap above and below `section`.
    fn section_spacing(&self, section: usize) -> f64 {
        let _ = section;
        0.0
    }
}

/// A virtualised grid of cells grouped into sections.
///
/// Implementations may instantiate only some of the cells a source
/// describes; [`cell_mut`](Self::cell_mut) returns `None` for the others.
pub trait GridRenderer {
    /// Make a view kind available for dequeueing.
    fn register(&mut self, kind: ViewKind);

    fn set_scroll_enabled(&mut self, enabled: bool);

    /// Discard the current layout and rebuild it from `source`.
    fn reload(&mut self, source: &dyn GridDataSource);

    /// The instantiated cell at `path`, if any.
    fn cell_mut(&mut self, path: IndexPath) -> Option<&mut dyn GridCell>;

    /// Every instantiated cell, in display order.
    fn cells(&self) -> Vec<&dyn GridCell>;

    fn cells_mut(&mut self) -> Vec<&mut dyn GridCell>;

    /// The height constraint the grid is laid out with.
    fn height_constraint(&self) -> f64;

    fn set_height_constraint(&mut self, height: f64);

    /// Apply pending layout changes, animated over `duration`.
    fn layout_if_needed(&mut self, duration: Duration);
}
