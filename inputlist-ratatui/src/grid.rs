//! Terminal grid renderer.
//!
//! Lays cells and headers out top to bottom in whole terminal rows, using
//! the sizes and spacing handed out by the data source on the last reload.

use std::collections::HashMap;
use std::time::Duration;

use inputlist::{GridCell, GridDataSource, GridRenderer, IndexPath, ValidationReport, ViewKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use tracing::{debug, trace};

use crate::theme::terminal_color;
use crate::{TerminalCell, TerminalHeader, TextField, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Gap(u16),
    Header { index: usize, height: u16 },
    Cell { index: usize, height: u16 },
}

impl Row {
    fn height(&self) -> u16 {
        match *self {
            Row::Gap(height) | Row::Header { height, .. } | Row::Cell { height, .. } => height,
        }
    }
}

/// Rounds a layout length to whole terminal rows.
fn rows(length: f64) -> u16 {
    length.max(0.0).round().min(f64::from(u16::MAX)) as u16
}

/// A [`GridRenderer`] drawing into a terminal buffer.
///
/// All heights are in terminal rows. Cells lying entirely below the visible
/// rows, and cells less than half a row tall, are not instantiated.
#[derive(Debug)]
pub struct TerminalGrid {
    title: String,
    theme: Theme,
    width: u16,
    visible_rows: Option<u16>,
    registered: Vec<ViewKind>,
    scroll_enabled: bool,
    height: f64,
    last_animation: Option<Duration>,
    rows: Vec<Row>,
    cells: Vec<(IndexPath, TerminalCell)>,
    cell_pool: Vec<TerminalCell>,
    headers: Vec<TerminalHeader>,
    header_pool: Vec<TerminalHeader>,
    focus: usize,
    errors: HashMap<String, String>,
}

impl Default for TerminalGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalGrid {
    /// Create a grid 80 columns wide with no row limit.
    pub fn new() -> Self {
        Self {
            title: "Form".to_string(),
            theme: Theme::default(),
            width: 80,
            visible_rows: None,
            registered: Vec::new(),
            scroll_enabled: true,
            height: 0.0,
            last_animation: None,
            rows: Vec::new(),
            cells: Vec::new(),
            cell_pool: Vec::new(),
            headers: Vec::new(),
            header_pool: Vec::new(),
            focus: 0,
            errors: HashMap::new(),
        }
    }

    /// Set the title shown at the top of the form.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the width reported to the data source.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Only instantiate cells starting within the first `rows` rows.
    pub fn with_visible_rows(mut self, rows: u16) -> Self {
        self.visible_rows = Some(rows);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn registered(&self) -> &[ViewKind] {
        &self.registered
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    /// Duration of the last re-layout request.
    pub fn last_animation(&self) -> Option<Duration> {
        self.last_animation
    }

    /// Rows drawn: the height constraint in whole rows.
    pub fn content_rows(&self) -> u16 {
        rows(self.height)
    }

    pub fn headers(&self) -> &[TerminalHeader] {
        &self.headers
    }

    /// Instantiated cells with their positions, in display order.
    pub fn terminal_cells(&self) -> impl Iterator<Item = (IndexPath, &TerminalCell)> {
        self.cells.iter().map(|(path, cell)| (*path, cell))
    }

    fn fields(&self) -> impl Iterator<Item = &TextField> {
        self.cells.iter().flat_map(|(_, cell)| cell.fields().iter())
    }

    /// Number of instantiated text fields.
    pub fn field_total(&self) -> usize {
        self.fields().count()
    }

    /// Index of the focused field among all instantiated fields.
    pub fn focused_index(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&TextField> {
        self.fields().nth(self.focus)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        self.cells
            .iter_mut()
            .flat_map(|(_, cell)| cell.fields_mut().iter_mut())
            .nth(self.focus)
    }

    /// Move focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        let total = self.field_total();
        if total > 0 {
            self.focus = (self.focus + 1) % total;
        }
    }

    /// Move focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        let total = self.field_total();
        if total > 0 {
            self.focus = (self.focus + total - 1) % total;
        }
    }

    /// Type a character into the focused field.
    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            field.insert_char(c);
        }
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.backspace();
        }
    }

    /// Show every error of `report`, replacing the errors shown so far.
    pub fn set_errors(&mut self, report: &ValidationReport) {
        self.errors = report
            .errors()
            .map(|(identifier, message)| (identifier.to_string(), message.to_string()))
            .collect();
    }

    /// Show or hide the error of a single input.
    pub fn set_error(&mut self, identifier: &str, message: Option<&str>) {
        match message {
            Some(message) => {
                self.errors
                    .insert(identifier.to_string(), message.to_string());
            }
            None => {
                self.errors.remove(identifier);
            }
        }
    }

    pub fn error_for(&self, identifier: &str) -> Option<&str> {
        self.errors.get(identifier).map(String::as_str)
    }

    fn is_clipped(&self, offset: u16) -> bool {
        self.visible_rows.is_some_and(|limit| offset >= limit)
    }

    fn push_row(&mut self, row: Row, offset: &mut u16) {
        if row.height() > 0 && !self.is_clipped(*offset) {
            self.rows.push(row);
        }
        *offset = offset.saturating_add(row.height());
    }

    fn draw_header(&self, header: &TerminalHeader, area: Rect, buf: &mut Buffer) {
        let mut style = Style::default()
            .fg(header
                .title_color()
                .and_then(terminal_color)
                .unwrap_or(self.theme.text))
            .add_modifier(Modifier::BOLD);
        if let Some(background) = header.background_color().and_then(terminal_color) {
            style = style.bg(background);
        }
        Paragraph::new(header.title())
            .style(style)
            .render(area, buf);
    }

    fn draw_cell(&self, cell: &TerminalCell, first_field: usize, area: Rect, buf: &mut Buffer) {
        let count = cell.field_count();
        if count == 0 {
            return;
        }
        let chunks = Layout::horizontal(vec![Constraint::Ratio(1, count as u32); count]).split(area);
        for (offset, (field, chunk)) in cell.fields().iter().zip(chunks.iter()).enumerate() {
            self.draw_field(field, *chunk, first_field + offset == self.focus, buf);
        }
    }

    fn draw_field(&self, field: &TextField, area: Rect, is_focused: bool, buf: &mut Buffer) {
        let theme = &self.theme;
        let error = self.error_for(field.identifier());
        let border_color = if error.is_some() {
            theme.error
        } else if is_focused {
            theme.primary
        } else {
            theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", field.label()))
            .title_style(Style::default().fg(if is_focused {
                theme.highlight
            } else {
                theme.text
            }));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut text = Paragraph::new(field.display_text()).style(Style::default().fg(theme.text));
        if field.is_multiline() {
            text = text.wrap(Wrap { trim: false });
        }
        text.render(inner, buf);

        if let Some(error) = error
            && area.height >= 2
        {
            let error_area = Rect {
                x: area.x + 1,
                y: area.bottom() - 1,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            Paragraph::new(format!("⚠ {error}"))
                .style(Style::default().fg(theme.error))
                .render(error_area, buf);
        }
    }
}

impl Widget for &TerminalGrid {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bottom = area.y.saturating_add(self.content_rows().min(area.height));
        let mut y = area.y;
        let mut first_field = 0;
        for row in &self.rows {
            if y >= bottom {
                break;
            }
            let height = row.height().min(bottom - y);
            let row_area = Rect::new(area.x, y, area.width, height);
            match *row {
                Row::Gap(_) => {}
                Row::Header { index, .. } => {
                    if let Some(header) = self.headers.get(index) {
                        self.draw_header(header, row_area, buf);
                    }
                }
                Row::Cell { index, .. } => {
                    if let Some((_, cell)) = self.cells.get(index) {
                        self.draw_cell(cell, first_field, row_area, buf);
                        first_field += cell.field_count();
                    }
                }
            }
            y += height;
        }
    }
}

impl GridRenderer for TerminalGrid {
    fn register(&mut self, kind: ViewKind) {
        if !self.registered.contains(&kind) {
            self.registered.push(kind);
        }
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn reload(&mut self, source: &dyn GridDataSource) {
        let recycled: Vec<TerminalCell> = self.cells.drain(..).map(|(_, cell)| cell).collect();
        self.cell_pool.extend(recycled);
        self.header_pool.extend(self.headers.drain(..));
        self.rows.clear();

        let width = f64::from(self.width);
        let mut offset = 0u16;
        let mut first_cell = true;
        for section in 0..source.section_count() {
            if section > 0 {
                let gap = rows(2.0 * source.section_spacing(section));
                self.push_row(Row::Gap(gap), &mut offset);
            }

            let mut header = self.header_pool.pop().unwrap_or_default();
            source.configure_header(section, &mut header);
            let height = rows(source.header_size(section, width).height);
            self.push_row(
                Row::Header {
                    index: self.headers.len(),
                    height,
                },
                &mut offset,
            );
            self.headers.push(header);

            for item in 0..source.item_count(section) {
                if !first_cell {
                    let gap = rows(source.item_spacing(section));
                    self.push_row(Row::Gap(gap), &mut offset);
                }
                first_cell = false;

                let path = IndexPath::new(section, item);
                let height = rows(source.cell_size(path, width).height);
                if height == 0 {
                    trace!(%path, "cell has no rows");
                    continue;
                }
                if self.is_clipped(offset) {
                    trace!(%path, "cell is below the visible rows");
                    offset = offset.saturating_add(height);
                    continue;
                }
                let mut cell = self.cell_pool.pop().unwrap_or_default();
                source.configure_cell(path, &mut cell);
                self.push_row(
                    Row::Cell {
                        index: self.cells.len(),
                        height,
                    },
                    &mut offset,
                );
                self.cells.push((path, cell));
            }
        }

        if self.focus >= self.field_total() {
            self.focus = 0;
        }
        debug!(
            cells = self.cells.len(),
            headers = self.headers.len(),
            rows = offset,
            "reloaded terminal grid"
        );
    }

    fn cell_mut(&mut self, path: IndexPath) -> Option<&mut dyn GridCell> {
        self.cells
            .iter_mut()
            .find(|(at, _)| *at == path)
            .map(|(_, cell)| cell as &mut dyn GridCell)
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
    }

    fn layout_if_needed(&mut self, duration: Duration) {
        trace!(?duration, rows = self.content_rows(), "layout");
        self.last_animation = Some(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use example_forms::Registration;
    use inputlist::{
        FieldLookupError, InputListView, InputSection, REQUIRED_ERROR, SectionTree, Spacing,
        TextInput,
    };
    use ratatui::style::Color;

    fn terminal_spacing() -> Spacing {
        Spacing::new(0.0, 0.5, 1.0)
    }

    fn view_with(grid: TerminalGrid) -> InputListView<TerminalGrid> {
        let view = InputListView::new(grid.with_width(60));
        view.set_spacing(Some(terminal_spacing()));
        view.set_inputs(Registration::tree());
        view
    }

    fn draw(view: &InputListView<TerminalGrid>) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 30));
        let area = buf.area;
        view.with_renderer(|grid| grid.render(area, &mut buf))
            .unwrap();
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn headers_and_cells_are_stacked_in_rows() {
        let view = view_with(TerminalGrid::new());
        let buf = draw(&view);

        assert_eq!(view.with_renderer(TerminalGrid::content_rows).unwrap(), 25);
        assert!(row_text(&buf, 0).starts_with("Personal information"));
        assert!(row_text(&buf, 1).contains(" Title "));
        assert!(row_text(&buf, 1).contains(" First name* "));
        assert!(row_text(&buf, 4).contains(" About yourself* "));
        assert!(row_text(&buf, 10).starts_with("Account information"));
        assert!(row_text(&buf, 18).starts_with("Contact information"));
        assert!(row_text(&buf, 22).contains(" Ext "));
        assert_eq!(row_text(&buf, 25).trim(), "");
    }

    #[test]
    fn header_colours_come_from_the_section() {
        let view = view_with(TerminalGrid::new());
        let buf = draw(&view);

        assert_eq!(buf[(0, 10)].fg, Color::Rgb(200, 60, 60));
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(85, 85, 85));
    }

    #[test]
    fn typed_text_reaches_bindings_and_screen() {
        let view = view_with(TerminalGrid::new());
        view.with_renderer_mut(|grid| {
            grid.focus_next();
            for c in "Ada".chars() {
                grid.type_char(c);
            }
        })
        .unwrap();

        assert_eq!(
            view.binding_registry().content_of("firstName").as_deref(),
            Some("Ada")
        );
        assert!(row_text(&draw(&view), 2).contains("Ada"));
    }

    #[test]
    fn passwords_are_masked_on_screen() {
        let view = view_with(TerminalGrid::new());
        view.enter_value(&Registration::Password, "secret")
            .unwrap();

        let row = row_text(&draw(&view), 12);
        assert!(row.contains("••••••"));
        assert!(!row.contains("secret"));
    }

    #[test]
    fn errors_are_drawn_on_the_field() {
        let view = view_with(TerminalGrid::new());
        let report = view.binding_registry().validate();
        view.with_renderer_mut(|grid| grid.set_errors(&report))
            .unwrap();

        let buf = draw(&view);
        assert_eq!(buf[(0, 19)].fg, Color::Red);
        assert!(row_text(&buf, 21).contains(REQUIRED_ERROR));

        view.with_renderer_mut(|grid| grid.set_error("email", None))
            .unwrap();
        assert_ne!(draw(&view)[(0, 19)].fg, Color::Red);
    }

    #[test]
    fn focus_wraps_around() {
        let view = view_with(TerminalGrid::new());
        view.with_renderer_mut(|grid| {
            assert_eq!(grid.field_total(), Registration::ALL.len());
            grid.focus_prev();
            assert_eq!(grid.focused_field().map(TextField::identifier), Some("phoneNumber"));
            grid.focus_next();
            assert_eq!(grid.focused_field().map(TextField::identifier), Some("title"));
        })
        .unwrap();
    }

    #[test]
    fn cells_below_visible_rows_are_not_instantiated() {
        let view = view_with(TerminalGrid::new().with_visible_rows(10));

        assert_eq!(view.with_renderer(|grid| grid.terminal_cells().count()).unwrap(), 2);
        assert_eq!(
            view.enter_value(&Registration::Password, "secret"),
            Err(FieldLookupError::CellNotInstantiated {
                section: 1,
                item: 0
            })
        );
        assert!(view.enter_value(&Registration::Description, "Hi").is_ok());
    }

    #[test]
    fn recycled_cells_are_remounted() {
        let view = view_with(TerminalGrid::new());
        view.set_inputs(Registration::tree());

        view.with_renderer(|grid| {
            assert!(!grid.is_scroll_enabled());
            assert_eq!(grid.registered().len(), 2);
            for (path, cell) in grid.terminal_cells() {
                let tree = Registration::tree();
                let group = tree.group(path.section, path.item).unwrap();
                assert_eq!(cell.fields().len(), group.len());
            }
        })
        .unwrap();
    }

    #[test]
    fn cells_without_rows_are_not_focusable() {
        let section = InputSection::new("main", "Main");
        let flat = TextInput::new("flat").in_section(section.clone()).into_input();
        let name = TextInput::new("name")
            .in_section(section)
            .with_height(3.0)
            .into_input();
        let view = InputListView::new(TerminalGrid::new().with_width(60));
        view.set_spacing(Some(Spacing::none()));
        view.set_inputs(SectionTree::from_items([flat.clone(), name]));

        view.with_renderer_mut(|grid| {
            assert_eq!(grid.field_total(), 1);
            assert_eq!(grid.focused_field().map(TextField::identifier), Some("name"));
            grid.type_char('x');
        })
        .unwrap();

        let buf = draw(&view);
        assert_eq!(buf[(0, 0)].fg, Theme::default().primary);
        assert!(row_text(&buf, 1).contains('x'));
        assert_eq!(
            view.binding_registry().content_of("name").as_deref(),
            Some("x")
        );
        assert_eq!(
            view.enter_value(flat.as_ref(), "hidden"),
            Err(FieldLookupError::CellNotInstantiated {
                section: 0,
                item: 0
            })
        );
    }

    #[test]
    fn rows_round_to_whole_lines() {
        assert_eq!(rows(0.4), 0);
        assert_eq!(rows(0.5), 1);
        assert_eq!(rows(-3.0), 0);
        assert_eq!(rows(f64::NAN), 0);
    }
}
