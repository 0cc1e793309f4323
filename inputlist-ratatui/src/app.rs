use std::io::{self, Stdout};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use inputlist::{BindingRegistry, FieldLookupError, InputListView};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::TerminalGrid;

const HELP_TEXT: &str = "Tab/↑/↓: Navigate  Enter: Submit  Alt+Enter: New line  Esc: Cancel";

/// Error type for the terminal form.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// User cancelled the form (e.g., pressed Esc).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Lookup(#[from] FieldLookupError),
}

/// Run `view` interactively until the form is submitted or cancelled.
///
/// Enter submits once every input validates, returning the bindings.
/// Otherwise every error is shown and editing resumes.
pub fn run(view: &InputListView<TerminalGrid>) -> Result<BindingRegistry, TerminalError> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, view);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TerminalError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), TerminalError> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    view: &InputListView<TerminalGrid>,
) -> Result<BindingRegistry, TerminalError> {
    loop {
        view.with_renderer(|grid| terminal.draw(|frame| draw_form(frame, grid)).map(|_| ()))??;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(registry) = handle_key(view, key)? {
                return Ok(registry);
            }
        }
    }
}

/// Apply one key press. Returns the bindings once the form is submitted.
pub fn handle_key(
    view: &InputListView<TerminalGrid>,
    key: KeyEvent,
) -> Result<Option<BindingRegistry>, TerminalError> {
    match key.code {
        KeyCode::Esc => return Err(TerminalError::Cancelled),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            edit(view, |grid| grid.type_char('\n'))?;
        }
        KeyCode::Enter => {
            let registry = view.binding_registry();
            let report = registry.validate();
            if !report.has_errors() {
                info!(inputs = registry.len(), "form submitted");
                return Ok(Some(registry));
            }
            debug!(errors = report.len(), "form has errors");
            view.with_renderer_mut(|grid| grid.set_errors(&report))?;
        }
        KeyCode::Tab | KeyCode::Down => view.with_renderer_mut(TerminalGrid::focus_next)?,
        KeyCode::BackTab | KeyCode::Up => view.with_renderer_mut(TerminalGrid::focus_prev)?,
        KeyCode::Backspace => edit(view, TerminalGrid::backspace)?,
        KeyCode::Char(c) => edit(view, |grid| grid.type_char(c))?,
        _ => {}
    }
    Ok(None)
}

/// Edit the focused field, then revalidate it.
fn edit(
    view: &InputListView<TerminalGrid>,
    change: impl FnOnce(&mut TerminalGrid),
) -> Result<(), TerminalError> {
    let registry = view.binding_registry();
    view.with_renderer_mut(|grid| {
        change(grid);
        let Some(identifier) = grid.focused_field().map(|field| field.identifier().to_string())
        else {
            return;
        };
        let report = registry.validate();
        grid.set_error(&identifier, report.error_for(&identifier));
    })?;
    Ok(())
}

fn draw_form(frame: &mut Frame, grid: &TerminalGrid) {
    let theme = grid.theme();
    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Min(1),    // Form content
        Constraint::Length(1), // Help bar
    ])
    .split(frame.area());

    let title = Paragraph::new(grid.title())
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    frame.render_widget(grid, chunks[1]);

    let help = Paragraph::new(HELP_TEXT).style(Style::default().fg(theme.muted));
    frame.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use example_forms::Registration;
    use inputlist::{REQUIRED_ERROR, Spacing};

    fn press(view: &InputListView<TerminalGrid>, code: KeyCode) -> Option<BindingRegistry> {
        handle_key(view, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_str(view: &InputListView<TerminalGrid>, text: &str) {
        for c in text.chars() {
            assert!(press(view, KeyCode::Char(c)).is_none());
        }
    }

    fn registration_view() -> InputListView<TerminalGrid> {
        let view = InputListView::new(TerminalGrid::new());
        view.set_spacing(Some(Spacing::new(0.0, 0.5, 1.0)));
        view.set_inputs(Registration::tree());
        view
    }

    #[test]
    fn escape_cancels() {
        let view = registration_view();
        let result = handle_key(&view, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(result, Err(TerminalError::Cancelled)));
    }

    #[test]
    fn submitting_an_incomplete_form_shows_errors() {
        let view = registration_view();
        assert!(press(&view, KeyCode::Enter).is_none());

        let grid_error = view
            .with_renderer(|grid| grid.error_for("email").map(str::to_string))
            .unwrap();
        assert_eq!(grid_error.as_deref(), Some(REQUIRED_ERROR));
    }

    #[test]
    fn editing_revalidates_the_focused_field() {
        let view = registration_view();
        assert!(press(&view, KeyCode::Enter).is_none());
        type_str(&view, "Mr");
        assert!(view.with_renderer(|grid| grid.error_for("title").is_none()).unwrap());

        press(&view, KeyCode::Backspace);
        let error = view
            .with_renderer(|grid| grid.error_for("title").map(str::to_string))
            .unwrap();
        assert_eq!(error.as_deref(), Some("Invalid title"));
    }

    #[test]
    fn filling_every_field_submits() {
        let view = registration_view();
        let values = [
            "Ms",
            "Ada",
            "Lovelace",
            "Analyst",
            "engines1843",
            "engines1843",
            "ada@example.com",
            "44",
            "5550100",
        ];
        for value in values {
            type_str(&view, value);
            press(&view, KeyCode::Tab);
        }

        let registry = press(&view, KeyCode::Enter).expect("form should submit");
        assert_eq!(registry.content_of("email").as_deref(), Some("ada@example.com"));
        assert_eq!(registry.content_of("description").as_deref(), Some("Analyst"));
    }

    #[test]
    fn alt_enter_inserts_new_lines_in_multiline_fields() {
        let view = registration_view();
        for _ in 0..3 {
            press(&view, KeyCode::Tab);
        }
        type_str(&view, "a");
        handle_key(&view, KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)).unwrap();
        type_str(&view, "b");

        assert_eq!(
            view.binding_registry().content_of("description").as_deref(),
            Some("a\nb")
        );
    }

    #[test]
    fn back_tab_moves_focus_backwards() {
        let view = registration_view();
        press(&view, KeyCode::BackTab);
        let focused = view
            .with_renderer(|grid| grid.focused_field().map(|field| field.identifier().to_string()))
            .unwrap();
        assert_eq!(focused.as_deref(), Some("phoneNumber"));
    }
}
