//! Terminal UI implementation using ratatui
//!
//! Draws a `TableView` snapshot: the filter toolbar, the dive table with its header and
//! selected row, the status line, and the column picker or help overlay on top.

use crate::columns::ColumnId;
use crate::error::{DdError, Result};
use crate::render::ui::renderer::UIRenderer;
use crate::render::ui::state::{Chip, TableView, ViewState, EMPTY_RESULT_MESSAGE};
use crate::render::ui::theme::ColorTheme;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const HELP_LINES: &[(&str, &str)] = &[
    ("j/k, arrows", "move selection"),
    ("PgUp/PgDn, b/space", "page"),
    ("g / G", "first / last row"),
    ("s / p / e", "Springboard / Platform / all events"),
    ("1-5", "toggle available board"),
    ("a", "all boards"),
    ("F1-F6, !@#$%^", "toggle group"),
    ("n / l / m", "edit dive number / DD max / DD min"),
    ("h", "head-first only"),
    ("i", "hide impossible dives"),
    ("f / A", "more filters / ignore A dives"),
    ("c", "column picker"),
    ("r", "reset filters"),
    ("q, Ctrl-C", "quit"),
];

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// Draw a whole frame. Split out so it can run against any backend.
    pub fn draw_frame(frame: &mut Frame, table: &TableView<'_>, theme: &ColorTheme) {
        let toolbar_height = ViewState::toolbar_height(table.filters.advanced_open());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(toolbar_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.size());

        Self::render_toolbar(frame, chunks[0], table, theme);
        Self::render_table(frame, chunks[1], table, theme);

        let status = Paragraph::new(table.format_status_line()).style(theme.status());
        frame.render_widget(status, chunks[2]);

        if table.columns.picker_open() {
            Self::render_column_picker(frame, table, theme);
        } else if table.view.show_help {
            Self::render_help(frame, theme);
        }
    }

    fn render_toolbar(frame: &mut Frame, area: Rect, table: &TableView<'_>, theme: &ColorTheme) {
        let lines: Vec<Line> = table
            .toolbar()
            .into_iter()
            .map(|chips| {
                let mut spans = Vec::with_capacity(chips.len() * 2);
                for chip in chips {
                    spans.push(Self::chip_span(chip, theme));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn chip_span(chip: Chip, theme: &ColorTheme) -> Span<'static> {
        let style = if chip.editing {
            theme.editing
        } else {
            theme.chip(chip.on)
        };
        Span::styled(format!("[{}]", chip.text), style)
    }

    fn render_table(frame: &mut Frame, area: Rect, table: &TableView<'_>, theme: &ColorTheme) {
        let columns = table.columns.visible_columns();
        let header = Row::new(columns.iter().map(|c| Cell::from(c.label))).style(theme.header);

        if table.rows.is_empty() {
            let empty = Paragraph::new(EMPTY_RESULT_MESSAGE).alignment(Alignment::Center);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(area);
            let widths: Vec<Constraint> = columns.iter().map(Self::width_of).collect();
            frame.render_widget(Table::new(Vec::<Row>::new(), widths).header(header), chunks[0]);
            frame.render_widget(empty, chunks[1]);
            return;
        }

        let rows: Vec<Row> = table
            .page()
            .iter()
            .map(|record| {
                Row::new(columns.iter().map(|column| {
                    let text = column.cell(record);
                    match column.id.position() {
                        Some(position) => {
                            Cell::from(text).style(theme.dd_cell(record.dd(position)))
                        }
                        None => Cell::from(text),
                    }
                }))
            })
            .collect();

        let widths: Vec<Constraint> = columns.iter().map(Self::width_of).collect();
        let widget = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .highlight_style(theme.selection);

        let mut state = TableState::default().with_selected(table.page_selection());
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn width_of(column: &crate::columns::ColumnDescriptor) -> Constraint {
        if column.resizable {
            Constraint::Min(column.width)
        } else {
            Constraint::Length(column.width)
        }
    }

    fn render_column_picker(frame: &mut Frame, table: &TableView<'_>, theme: &ColorTheme) {
        let lines: Vec<Line> = ColumnId::ALL
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let shown = table.columns.is_visible(*id);
                let mark = if shown { "x" } else { " " };
                Line::from(Span::styled(
                    format!("{} [{}] {}", index + 1, mark, id.label()),
                    theme.chip(shown),
                ))
            })
            .collect();

        let area = centered_rect(30, lines.len() as u16 + 2, frame.size());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.popup_border)
            .title(" Columns (Esc closes) ");
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_help(frame: &mut Frame, theme: &ColorTheme) {
        let lines: Vec<Line> = HELP_LINES
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(format!("{keys:>20}"), theme.header),
                    Span::raw("  "),
                    Span::raw(*what),
                ])
            })
            .collect();

        let area = centered_rect(64, lines.len() as u16 + 2, frame.size());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.popup_border)
            .title(" Keys (any key closes) ")
            .style(Style::default());
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, table: &TableView<'_>) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;
            terminal
                .draw(|frame| Self::draw_frame(frame, table, theme))
                .map_err(|e| DdError::ui(format!("Failed to draw frame: {e}")))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnVisibility;
    use crate::dataset::{Event, RecordStore, BUNDLED_DATA};
    use crate::filter::{visible_records, FilterState};
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(
        store: &RecordStore,
        filters: &FilterState,
        columns: &ColumnVisibility,
        view: &ViewState,
    ) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let table = TableView {
            rows: visible_records(store, filters),
            total_records: store.len(),
            filters,
            columns,
            view,
        };
        terminal
            .draw(|frame| TerminalUI::draw_frame(frame, &table, &ColorTheme::default()))
            .unwrap();
        screen(&terminal)
    }

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new().unwrap();
        assert!(ui.terminal.is_none());
        assert_eq!(ui.theme.status_bg, Color::Blue);

        let ui = TerminalUI::with_theme(ColorTheme::monochrome()).unwrap();
        assert_eq!(ui.theme.status_bg, Color::Black);
    }

    #[test]
    fn test_frame_shows_header_and_rows() {
        let store = RecordStore::from_json(BUNDLED_DATA).unwrap();
        let filters = FilterState::default();
        let columns = ColumnVisibility::for_viewport(120, 100);
        let mut view = ViewState::new("bundled", 120, 30);
        view.select_row(0, store.len(), view.body_rows(false));

        let text = draw(&store, &filters, &columns, &view);
        assert!(text.contains("Dive Number"));
        assert!(text.contains("Dive Description"));
        assert!(text.contains("Forward Dive"));
        assert!(text.contains("[Springboard]"));
        assert!(text.contains("dives"));
    }

    #[test]
    fn test_empty_result_message() {
        let store = RecordStore::from_json(BUNDLED_DATA).unwrap();
        let mut filters = FilterState::default();
        filters.set_groups(Vec::<u8>::new());
        let columns = ColumnVisibility::for_viewport(120, 100);
        let view = ViewState::new("bundled", 120, 30);

        let text = draw(&store, &filters, &columns, &view);
        assert!(text.contains(EMPTY_RESULT_MESSAGE));
    }

    #[test]
    fn test_column_picker_overlay() {
        let store = RecordStore::from_json(BUNDLED_DATA).unwrap();
        let mut filters = FilterState::default();
        filters.select_event(Event::Platform);
        let mut columns = ColumnVisibility::for_viewport(120, 100);
        columns.toggle_picker();
        let view = ViewState::new("bundled", 120, 30);

        let text = draw(&store, &filters, &columns, &view);
        assert!(text.contains("Columns (Esc closes)"));
        assert!(text.contains("1 [ ] Event"));
        assert!(text.contains("2 [x] Board"));
    }

    #[test]
    fn test_help_overlay() {
        let store = RecordStore::from_json(BUNDLED_DATA).unwrap();
        let filters = FilterState::default();
        let columns = ColumnVisibility::for_viewport(120, 100);
        let mut view = ViewState::new("bundled", 120, 30);
        view.show_help = true;

        let text = draw(&store, &filters, &columns, &view);
        assert!(text.contains("column picker"));
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(64, 16, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));
        let rect = centered_rect(10, 3, area);
        assert_eq!(rect, Rect::new(5, 1, 10, 3));
    }
}
