use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::warn;

use crate::db::Catalog;
use crate::error::LibraryError;
use crate::models::LibraryStats;

use super::forms::{BookForm, RemoveForm, SearchForm};
use super::helpers::{format_percentage, placeholder, render_book_table, stat_card};
use super::screens::BookListScreen;

/// Height of the title banner.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 4;
/// Width of the navigation sidebar.
const SIDEBAR_WIDTH: u16 = 22;
/// Rows moved by PageUp/PageDown in result tables.
const PAGE_STEP: isize = 5;

/// The five views listed in the sidebar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum View {
    AddBook,
    RemoveBook,
    SearchBooks,
    ViewLibrary,
    Statistics,
}

impl View {
    pub(crate) const ALL: [View; 5] = [
        View::AddBook,
        View::RemoveBook,
        View::SearchBooks,
        View::ViewLibrary,
        View::Statistics,
    ];

    pub(crate) fn title(self) -> &'static str {
        match self {
            View::AddBook => "Add Book",
            View::RemoveBook => "Remove Book",
            View::SearchBooks => "Search Books",
            View::ViewLibrary => "View Library",
            View::Statistics => "Statistics",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            View::AddBook => "Add a New Book",
            View::RemoveBook => "Remove a Book",
            View::SearchBooks => "Search Books",
            View::ViewLibrary => "Your Library",
            View::Statistics => "Library Statistics",
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|view| *view == self)
            .unwrap_or_default()
    }
}

/// Whether keys go to the sidebar or to the active view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
    Menu,
    Content,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Success => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    catalog: Box<dyn Catalog>,
    view: View,
    focus: Focus,
    add_form: BookForm,
    remove_form: RemoveForm,
    search_form: SearchForm,
    search_results: Option<BookListScreen>,
    library: Option<BookListScreen>,
    stats: Option<LibraryStats>,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(catalog: Box<dyn Catalog>) -> Self {
        Self {
            catalog,
            view: View::AddBook,
            focus: Focus::Menu,
            add_form: BookForm::default(),
            remove_form: RemoveForm::default(),
            search_form: SearchForm::default(),
            search_results: None,
            library: None,
            stats: None,
            status: None,
        }
    }

    /// Show an error that happened outside a user action, such as schema
    /// setup during startup.
    pub fn report_error(&mut self, context: &str, err: &LibraryError) {
        self.set_status(format!("{context}: {err}"), StatusKind::Error);
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.focus {
            Focus::Menu => self.handle_menu_key(code),
            Focus::Content => {
                self.handle_content_key(code);
                false
            }
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_view(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_view(1),
            KeyCode::Char(ch @ '1'..='5') => {
                let idx = ch as usize - '1' as usize;
                self.open_view(View::ALL[idx]);
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Tab => self.focus = Focus::Content,
            _ => {}
        }
        false
    }

    fn move_view(&mut self, offset: isize) {
        let last = View::ALL.len() as isize - 1;
        let idx = (self.view.index() as isize + offset).clamp(0, last) as usize;
        if View::ALL[idx] != self.view {
            self.open_view(View::ALL[idx]);
        }
    }

    /// Switch views. The library and statistics views query the store every
    /// time they are opened so they never show stale numbers.
    fn open_view(&mut self, view: View) {
        self.view = view;
        match view {
            View::ViewLibrary => self.reload_library(),
            View::Statistics => self.reload_statistics(),
            View::AddBook | View::RemoveBook | View::SearchBooks => {}
        }
    }

    fn handle_content_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.focus = Focus::Menu;
            return;
        }
        match self.view {
            View::AddBook => self.handle_add_key(code),
            View::RemoveBook => self.handle_remove_key(code),
            View::SearchBooks => self.handle_search_key(code),
            View::ViewLibrary => self.handle_library_key(code),
            View::Statistics => {
                if code == KeyCode::Char('r') {
                    self.reload_statistics();
                }
            }
        }
    }

    fn handle_add_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab | KeyCode::Down => self.add_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.add_form.previous_field(),
            KeyCode::Backspace => self.add_form.backspace(),
            KeyCode::Enter => self.submit_add(),
            KeyCode::Char(ch) => {
                if self.add_form.push_char(ch) {
                    self.add_form.error = None;
                }
            }
            _ => {}
        }
    }

    fn handle_remove_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Backspace => self.remove_form.backspace(),
            KeyCode::Enter => self.submit_remove(),
            KeyCode::Char(ch) => {
                if self.remove_form.push_char(ch) {
                    self.remove_form.error = None;
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab | KeyCode::BackTab => self.search_form.toggle_field(),
            KeyCode::Backspace => self.search_form.backspace(),
            KeyCode::Enter => self.run_search(),
            KeyCode::Char(ch) => {
                self.search_form.push_char(ch);
            }
            _ => {
                if let Some(results) = &mut self.search_results {
                    navigate(results, code);
                }
            }
        }
    }

    fn handle_library_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('r') => self.reload_library(),
            KeyCode::Char('d') | KeyCode::Delete => self.prepare_remove_selected(),
            _ => {
                if let Some(library) = &mut self.library {
                    navigate(library, code);
                }
            }
        }
    }

    fn submit_add(&mut self) {
        let book = match self.add_form.parse_inputs() {
            Ok(book) => book,
            Err(err) => {
                let message = err.to_string();
                self.add_form.error = Some(message.clone());
                self.set_status(message, StatusKind::Warning);
                return;
            }
        };

        match self.catalog.create(&book) {
            Ok(_) => {
                self.add_form = BookForm::default();
                self.set_status("Book added successfully!", StatusKind::Success);
            }
            Err(err) => {
                warn!(error = %err, "failed to add book");
                self.add_form.error = Some(err.to_string());
                self.set_status(format!("Error adding book: {err}"), StatusKind::Error);
            }
        }
    }

    fn submit_remove(&mut self) {
        let title = match self.remove_form.parse_title() {
            Ok(title) => title,
            Err(err) => {
                let message = err.to_string();
                self.remove_form.error = Some(message.clone());
                self.set_status(message, StatusKind::Warning);
                return;
            }
        };

        match self.catalog.delete_by_title(&title) {
            Ok(_) => {
                self.remove_form = RemoveForm::default();
                self.set_status("Book removed successfully!", StatusKind::Success);
            }
            Err(err) => {
                warn!(error = %err, "failed to remove book");
                self.remove_form.error = Some(err.to_string());
                self.set_status(format!("Error removing book: {err}"), StatusKind::Error);
            }
        }
    }

    fn run_search(&mut self) {
        match self
            .catalog
            .search(self.search_form.field, &self.search_form.query)
        {
            Ok(books) => {
                if books.is_empty() {
                    self.set_status("No matching books found", StatusKind::Info);
                } else {
                    self.set_status(
                        format!("Found {} matching book(s).", books.len()),
                        StatusKind::Info,
                    );
                }
                self.search_results = Some(BookListScreen::new(books));
            }
            Err(err) => {
                warn!(error = %err, "search failed");
                self.search_results = None;
                self.set_status(format!("Search failed: {err}"), StatusKind::Error);
            }
        }
    }

    fn reload_library(&mut self) {
        match self.catalog.list_all() {
            Ok(books) => match &mut self.library {
                Some(library) => library.set_books(books),
                None => self.library = Some(BookListScreen::new(books)),
            },
            Err(err) => {
                warn!(error = %err, "failed to load library");
                self.library = None;
                self.set_status(format!("Could not load library: {err}"), StatusKind::Error);
            }
        }
    }

    fn reload_statistics(&mut self) {
        match self.catalog.statistics() {
            Ok(stats) => self.stats = Some(stats),
            Err(err) => {
                warn!(error = %err, "failed to load statistics");
                self.stats = None;
                self.set_status(
                    format!("Could not load statistics: {err}"),
                    StatusKind::Error,
                );
            }
        }
    }

    /// Jump from the library table to the remove form with the selected
    /// title filled in. Nothing is deleted until the user confirms with Enter.
    fn prepare_remove_selected(&mut self) {
        let Some(book) = self.library.as_ref().and_then(|l| l.current_book()) else {
            self.set_status("No book selected.", StatusKind::Warning);
            return;
        };
        let title = book.title.clone();
        self.remove_form = RemoveForm::with_title(&title);
        self.view = View::RemoveBook;
        self.focus = Focus::Content;
        self.set_status(
            format!("Press Enter to remove every book titled \"{title}\"."),
            StatusKind::Info,
        );
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(chunks[1]);

        self.draw_menu(frame, body[0]);
        self.draw_content(frame, body[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            "Personal Library Manager",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, area);
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = View::ALL
            .iter()
            .enumerate()
            .map(|(idx, view)| ListItem::new(format!("{} {}", idx + 1, view.title())))
            .collect();

        let border_style = if self.focus == Focus::Menu {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Navigation")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.view.index()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_content(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Content;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title(self.view.heading())
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.view {
            View::AddBook => self.draw_add_form(frame, inner, focused),
            View::RemoveBook => self.draw_remove_form(frame, inner, focused),
            View::SearchBooks => self.draw_search(frame, inner, focused),
            View::ViewLibrary => self.draw_library(frame, inner, focused),
            View::Statistics => self.draw_statistics(frame, inner),
        }
    }

    fn draw_add_form(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let form = &self.add_form;
        let mut lines = form.lines(focused);
        lines.push(Line::from(""));
        lines.push(form_hint(
            form.error.as_deref(),
            "Enter to add • Tab/↑↓ to switch field • Space toggles read • Esc to menu",
        ));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);

        if focused {
            if let Some(offset) = form.cursor_offset() {
                frame.set_cursor_position((
                    area.x.saturating_add(offset),
                    area.y.saturating_add(form.active.row()),
                ));
            }
        }
    }

    fn draw_remove_form(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let form = &self.remove_form;
        let lines = vec![
            form.build_line(focused),
            Line::from(""),
            form_hint(
                form.error.as_deref(),
                "Enter to remove every book with this exact title • Esc to menu",
            ),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);

        if focused {
            frame.set_cursor_position((area.x.saturating_add(form.cursor_offset()), area.y));
        }
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let form = &self.search_form;
        let lines = vec![
            form.selector_line(),
            form.build_line(focused),
            Line::from(""),
            form_hint(None, "Enter to search • Tab switches Title/Author • ↑↓ scroll results"),
        ];
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        match &self.search_results {
            Some(results) if results.is_empty() => {
                frame.render_widget(placeholder("No matching books found"), chunks[1]);
            }
            Some(results) => render_book_table(frame, chunks[1], results, focused),
            None => {}
        }

        if focused {
            frame.set_cursor_position((
                chunks[0].x.saturating_add(form.cursor_offset()),
                chunks[0].y + 1,
            ));
        }
    }

    fn draw_library(&self, frame: &mut Frame, area: Rect, focused: bool) {
        match &self.library {
            Some(library) if library.is_empty() => {
                frame.render_widget(placeholder("Your library is empty"), area);
            }
            Some(library) => render_book_table(frame, area, library, focused),
            None => frame.render_widget(
                placeholder("The library could not be loaded. Press r to retry."),
                area,
            ),
        }
    }

    fn draw_statistics(&self, frame: &mut Frame, area: Rect) {
        let Some(stats) = self.stats else {
            frame.render_widget(
                placeholder("Statistics are unavailable. Press r to retry."),
                area,
            );
            return;
        };

        let Some(percentage) = stats.percentage_read() else {
            frame.render_widget(placeholder("No books in library yet"), area);
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Min(0),
            ])
            .split(area);
        let halves = |row: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(row)
        };
        let top = halves(rows[0]);
        let bottom = halves(rows[1]);

        frame.render_widget(
            stat_card("Total Books", stats.total.to_string(), "Total books in library"),
            top[0],
        );
        frame.render_widget(
            stat_card("Books Read", stats.read.to_string(), "Books you've read"),
            top[1],
        );
        frame.render_widget(
            stat_card("Books Unread", stats.unread().to_string(), "Still on the shelf"),
            bottom[0],
        );
        frame.render_widget(
            stat_card(
                "Percentage Read",
                format_percentage(percentage),
                "Reading completion rate",
            ),
            bottom[1],
        );
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hint = |key: &'static str, text: &'static str| {
            [Span::styled(key, key_style), Span::raw(text)]
        };

        let spans: Vec<Span<'static>> = match (self.focus, self.view) {
            (Focus::Menu, _) => [
                hint("[↑↓]", " Navigate   "),
                hint("[1-5]", " Jump   "),
                hint("[Enter]", " Open   "),
                hint("[q]", " Quit"),
            ]
            .concat(),
            (Focus::Content, View::ViewLibrary) => [
                hint("[↑↓]", " Select   "),
                hint("[r]", " Refresh   "),
                hint("[d]", " Remove Selected   "),
                hint("[Esc]", " Menu   "),
                hint("[Ctrl+C]", " Quit"),
            ]
            .concat(),
            (Focus::Content, View::Statistics) => [
                hint("[r]", " Refresh   "),
                hint("[Esc]", " Menu   "),
                hint("[Ctrl+C]", " Quit"),
            ]
            .concat(),
            (Focus::Content, _) => [
                hint("[Enter]", " Submit   "),
                hint("[Tab]", " Switch   "),
                hint("[Esc]", " Menu   "),
                hint("[Ctrl+C]", " Quit"),
            ]
            .concat(),
        };
        Line::from(spans)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }
}

/// Arrow/page navigation shared by the two result tables.
fn navigate(list: &mut BookListScreen, code: KeyCode) {
    match code {
        KeyCode::Up => list.move_selection(-1),
        KeyCode::Down => list.move_selection(1),
        KeyCode::PageUp => list.move_selection(-PAGE_STEP),
        KeyCode::PageDown => list.move_selection(PAGE_STEP),
        KeyCode::Home => list.select_first(),
        KeyCode::End => list.select_last(),
        _ => {}
    }
}

/// Show the form's validation error in red, or the usage hint in gray.
fn form_hint(error: Option<&str>, hint: &'static str) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
    }
}
