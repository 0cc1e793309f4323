//! In-memory renderer for testing input lists without a user interface.
//!
//! `TestRenderer` implements every renderer contract with plain values and
//! records what the list asks of it: reloads, height writes, re-layout
//! requests, registered view kinds and the sizes it was handed. Cells and
//! headers are recycled through pools like a real virtualised grid, and the
//! number of instantiated cells can be capped to simulate off-screen cells.
//!
//! # Example
//!
//! ```rust
//! use inputlist::{IndexPath, InputGroup, InputListView, InputSection, SectionTree, TestRenderer, TextInput};
//!
//! let section = InputSection::new("main", "Main");
//! let name = TextInput::new("name").in_section(section).into_input();
//!
//! let view = InputListView::new(TestRenderer::new());
//! view.set_inputs(SectionTree::from_groups([InputGroup::single(name)]));
//!
//! view.with_renderer_mut(|renderer| {
//!     let cell = renderer.cell_at_mut(IndexPath::new(0, 0)).unwrap();
//!     cell.field_at_mut(0).unwrap().type_text("Ada");
//! })
//! .unwrap();
//!
//! assert_eq!(view.binding_registry().content_of("name").as_deref(), Some("Ada"));
//! ```

use std::time::Duration;

use inputlist_types::{ChangeStream, HeaderView, InputGroup, Rgba, ScopeRef, Size};

use crate::{FieldWidget, GridCell, GridDataSource, GridRenderer, IndexPath, ViewKind};

/// A field widget holding its text in memory.
#[derive(Debug, Default)]
pub struct TestField {
    identifier: Option<String>,
    placeholder: Option<String>,
    text: String,
    changes: ChangeStream<str>,
}

impl TestField {
    /// A widget built for the input with `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            ..Self::default()
        }
    }

    /// A widget without an input.
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: Option<&str>) -> Self {
        self.placeholder = placeholder.map(str::to_string);
        self
    }

    /// Identifier of the input the widget was built for.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Append `text` as if typed, notifying listeners once.
    pub fn type_text(&mut self, text: &str) {
        self.text.push_str(text);
        self.changes.emit(&self.text);
    }

    pub fn listener_count(&self) -> usize {
        self.changes.listener_count()
    }
}

impl FieldWidget for TestField {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.changes.emit(text);
    }

    fn subscribe_text(&self, scope: &ScopeRef, listener: Box<dyn FnMut(&str)>) {
        self.changes.subscribe(scope, listener);
    }
}

/// A grid cell holding [`TestField`]s.
#[derive(Debug, Default)]
pub struct TestCell {
    fields: Vec<TestField>,
    constraints: usize,
    mounts: usize,
    extra_fields: usize,
}

impl TestCell {
    /// A cell that mounts `extra_fields` unbound widgets after the group's.
    pub fn with_extra_fields(extra_fields: usize) -> Self {
        Self {
            extra_fields,
            ..Self::default()
        }
    }

    pub fn fields(&self) -> &[TestField] {
        &self.fields
    }

    pub fn field_at(&self, index: usize) -> Option<&TestField> {
        self.fields.get(index)
    }

    pub fn field_at_mut(&mut self, index: usize) -> Option<&mut TestField> {
        self.fields.get_mut(index)
    }

    /// Identifiers of the mounted widgets.
    pub fn identifiers(&self) -> Vec<Option<&str>> {
        self.fields.iter().map(TestField::identifier).collect()
    }

    /// Layout constraints currently installed, one per widget.
    pub fn constraint_count(&self) -> usize {
        self.constraints
    }

    /// How many times the cell was mounted, across reuses.
    pub fn mount_count(&self) -> usize {
        self.mounts
    }
}

impl GridCell for TestCell {
    fn clear(&mut self) {
        self.fields.clear();
        self.constraints = 0;
    }

    fn mount(&mut self, group: &InputGroup) {
        for input in group.items() {
            self.fields
                .push(TestField::new(input.identifier()).with_placeholder(input.placeholder()));
        }
        self.fields
            .extend(std::iter::repeat_with(TestField::unbound).take(self.extra_fields));
        self.constraints += self.fields.len();
        self.mounts += 1;
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field(&self, index: usize) -> Option<&dyn FieldWidget> {
        self.fields.get(index).map(|field| field as &dyn FieldWidget)
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn FieldWidget> {
        self.fields
            .get_mut(index)
            .map(|field| field as &mut dyn FieldWidget)
    }
}

/// A section header recording what it was configured with.
#[derive(Debug, Clone, Default)]
pub struct TestHeader {
    title: Option<String>,
    title_color: Option<Rgba>,
    background_color: Option<Rgba>,
    subviews: usize,
    clears: usize,
}

impl TestHeader {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn title_color(&self) -> Option<Rgba> {
        self.title_color
    }

    pub fn background_color(&self) -> Option<Rgba> {
        self.background_color
    }

    pub fn subview_count(&self) -> usize {
        self.subviews
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl HeaderView for TestHeader {
    fn clear(&mut self) {
        self.title = None;
        self.title_color = None;
        self.background_color = None;
        self.subviews = 0;
        self.clears += 1;
    }

    fn set_title(&mut self, title: &str) {
        if self.title.is_none() {
            self.subviews += 1;
        }
        self.title = Some(title.to_string());
    }

    fn set_title_color(&mut self, color: Rgba) {
        self.title_color = Some(color);
    }

    fn set_background_color(&mut self, color: Rgba) {
        self.background_color = Some(color);
    }
}

/// A renderer that keeps everything in memory.
#[derive(Debug)]
pub struct TestRenderer {
    width: f64,
    cell_limit: Option<usize>,
    extra_fields: usize,
    registered: Vec<ViewKind>,
    scroll_enabled: bool,
    height: f64,
    height_writes: Vec<f64>,
    layout_requests: Vec<Duration>,
    reloads: usize,
    allocated_cells: usize,
    cells: Vec<(IndexPath, TestCell)>,
    cell_pool: Vec<TestCell>,
    headers: Vec<TestHeader>,
    header_pool: Vec<TestHeader>,
    cell_sizes: Vec<(IndexPath, Size)>,
    header_sizes: Vec<Size>,
}

impl Default for TestRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRenderer {
    /// A renderer 320 points wide with scrolling enabled and no cell limit.
    pub fn new() -> Self {
        Self {
            width: 320.0,
            cell_limit: None,
            extra_fields: 0,
            registered: Vec::new(),
            scroll_enabled: true,
            height: 0.0,
            height_writes: Vec::new(),
            layout_requests: Vec::new(),
            reloads: 0,
            allocated_cells: 0,
            cells: Vec::new(),
            cell_pool: Vec::new(),
            headers: Vec::new(),
            header_pool: Vec::new(),
            cell_sizes: Vec::new(),
            header_sizes: Vec::new(),
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Instantiate at most `limit` cells per reload, in display order.
    pub fn with_cell_limit(mut self, limit: usize) -> Self {
        self.cell_limit = Some(limit);
        self
    }

    /// Make every fresh cell mount `count` unbound widgets after the group's.
    pub fn with_extra_fields(mut self, count: usize) -> Self {
        self.extra_fields = count;
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn registered(&self) -> &[ViewKind] {
        &self.registered
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    pub fn reload_count(&self) -> usize {
        self.reloads
    }

    /// Every height constraint written, oldest first.
    pub fn height_writes(&self) -> &[f64] {
        &self.height_writes
    }

    /// Animation duration of every re-layout requested, oldest first.
    pub fn layout_requests(&self) -> &[Duration] {
        &self.layout_requests
    }

    /// Cells created because the pool was empty.
    pub fn allocated_cells(&self) -> usize {
        self.allocated_cells
    }

    pub fn cell_at(&self, path: IndexPath) -> Option<&TestCell> {
        self.cells
            .iter()
            .find(|(at, _)| *at == path)
            .map(|(_, cell)| cell)
    }

    pub fn cell_at_mut(&mut self, path: IndexPath) -> Option<&mut TestCell> {
        self.cells
            .iter_mut()
            .find(|(at, _)| *at == path)
            .map(|(_, cell)| cell)
    }

    /// Instantiated cells with their positions, in display order.
    pub fn test_cells(&self) -> impl Iterator<Item = (IndexPath, &TestCell)> {
        self.cells.iter().map(|(path, cell)| (*path, cell))
    }

    /// Headers of the last reload, one per section.
    pub fn headers(&self) -> &[TestHeader] {
        &self.headers
    }

    /// Cell sizes handed out during the last reload.
    pub fn cell_sizes(&self) -> &[(IndexPath, Size)] {
        &self.cell_sizes
    }

    /// Header sizes handed out during the last reload.
    pub fn header_sizes(&self) -> &[Size] {
        &self.header_sizes
    }

    fn dequeue_cell(&mut self) -> TestCell {
        self.cell_pool.pop().unwrap_or_else(|| {
            self.allocated_cells += 1;
            TestCell::with_extra_fields(self.extra_fields)
        })
    }
}

impl GridRenderer for TestRenderer {
    fn register(&mut self, kind: ViewKind) {
        if !self.registered.contains(&kind) {
            self.registered.push(kind);
        }
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn reload(&mut self, source: &dyn GridDataSource) {
        self.reloads += 1;
        let recycled: Vec<TestCell> = self.cells.drain(..).map(|(_, cell)| cell).collect();
        self.cell_pool.extend(recycled.into_iter().rev());
        self.header_pool.extend(self.headers.drain(..).rev());
        self.cell_sizes.clear();
        self.header_sizes.clear();

        for section in 0..source.section_count() {
            let mut header = self.header_pool.pop().unwrap_or_default();
            source.configure_header(section, &mut header);
            self.headers.push(header);
            self.header_sizes.push(source.header_size(section, self.width));

            for item in 0..source.item_count(section) {
                let path = IndexPath::new(section, item);
                self.cell_sizes.push((path, source.cell_size(path, self.width)));
                if self
                    .cell_limit
                    .is_some_and(|limit| self.cells.len() >= limit)
                {
                    continue;
                }
                let mut cell = self.dequeue_cell();
                source.configure_cell(path, &mut cell);
                self.cells.push((path, cell));
            }
        }
    }

    fn cell_mut(&mut self, path: IndexPath) -> Option<&mut dyn GridCell> {
        self.cell_at_mut(path).map(|cell| cell as &mut dyn GridCell)
    }

    fn cells(&self) -> Vec<&dyn GridCell> {
        self.cells
            .iter()
            .map(|(_, cell)| cell as &dyn GridCell)
            .collect()
    }

    fn cells_mut(&mut self) -> Vec<&mut dyn GridCell> {
        self.cells
            .iter_mut()
            .map(|(_, cell)| cell as &mut dyn GridCell)
            .collect()
    }

    fn height_constraint(&self) -> f64 {
        self.height
    }

    fn set_height_constraint(&mut self, height: f64) {
        self.height = height;
        self.height_writes.push(height);
    }

    fn layout_if_needed(&mut self, duration: Duration) {
        self.layout_requests.push(duration);
    }
}
