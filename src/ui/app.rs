use std::cmp::min;
use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{create_book, delete_book, fetch_books, search_books, sqlite_version};
use crate::export::{default_export_path, write_csv};
use crate::models::Book;

use super::forms::{BookField, BookForm, ConfirmBookRemove};
use super::helpers::{centered_rect, surface_error, truncate_line};
use super::screens::{ExportScreen, RemoveScreen, SearchScreen, ViewScreen};

/// Width reserved for the action menu on the left.
const SIDEBAR_WIDTH: u16 = 26;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation per book card in list-style views.
const BOOK_CARD_HEIGHT: u16 = 6;

/// The five catalog actions offered in the sidebar.
#[derive(Copy, Clone, PartialEq, Eq)]
enum MenuItem {
    AddBook,
    RemoveBook,
    SearchBook,
    ViewAll,
    ExportLibrary,
}

impl MenuItem {
    /// Menu entries in display order.
    const ALL: [MenuItem; 5] = [
        MenuItem::AddBook,
        MenuItem::RemoveBook,
        MenuItem::SearchBook,
        MenuItem::ViewAll,
        MenuItem::ExportLibrary,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuItem::AddBook => "Add Book",
            MenuItem::RemoveBook => "Remove Book",
            MenuItem::SearchBook => "Search Book",
            MenuItem::ViewAll => "View All Books",
            MenuItem::ExportLibrary => "Export Library",
        }
    }
}

/// One state per menu action. Keeping this explicit makes it easy to reason
/// about which rendering path runs and what keyboard shortcuts should do; each
/// state is rebuilt fresh when its menu entry is activated.
enum Screen {
    AddBook(BookForm),
    RemoveBook(RemoveScreen),
    SearchBook(SearchScreen),
    ViewAll(ViewScreen),
    ExportLibrary(ExportScreen),
}

/// Whether keystrokes go to the sidebar or the active screen.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Focus {
    Menu,
    Content,
}

/// Modal overlays scoped to the current screen.
enum Mode {
    Normal,
    ConfirmRemove(ConfirmBookRemove),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the database
/// connection for the whole session.
pub struct App {
    conn: Connection,
    menu_index: usize,
    focus: Focus,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            menu_index: 0,
            focus: Focus::Menu,
            screen: Screen::AddBook(BookForm::default()),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.focus {
            Focus::Menu => Ok(self.handle_menu_key(code, exit)),
            Focus::Content => self.handle_screen_key(code),
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => {
                if self.menu_index > 0 {
                    self.menu_index -= 1;
                    self.activate_menu_choice();
                }
            }
            KeyCode::Down => {
                if self.menu_index + 1 < MenuItem::ALL.len() {
                    self.menu_index += 1;
                    self.activate_menu_choice();
                }
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right => {
                self.activate_menu_choice();
                self.focus = Focus::Content;
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_screen_key(&mut self, code: KeyCode) -> Result<Mode> {
        if code == KeyCode::Esc {
            self.focus = Focus::Menu;
            self.clear_status();
            return Ok(Mode::Normal);
        }

        match &mut self.screen {
            Screen::AddBook(form) => {
                let mut submit = false;
                match code {
                    KeyCode::Tab | KeyCode::Down => form.next_field(),
                    KeyCode::BackTab | KeyCode::Up => form.previous_field(),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Left => {
                        form.adjust_rating(-1);
                    }
                    KeyCode::Right => {
                        form.adjust_rating(1);
                    }
                    KeyCode::Enter => submit = true,
                    KeyCode::Char(ch) => {
                        if form.push_char(ch) {
                            form.error = None;
                        }
                    }
                    _ => {}
                }
                if submit {
                    self.submit_add_form();
                }
                Ok(Mode::Normal)
            }
            Screen::RemoveBook(remove) => {
                let mut confirm_title: Option<String> = None;
                let mut nothing_selected = false;
                match code {
                    KeyCode::Up => remove.move_selection(-1),
                    KeyCode::Down => remove.move_selection(1),
                    KeyCode::PageUp => remove.move_selection(-5),
                    KeyCode::PageDown => remove.move_selection(5),
                    KeyCode::Home => remove.select_first(),
                    KeyCode::End => remove.select_last(),
                    KeyCode::Enter => {
                        if let Some(title) = remove.current_title().cloned() {
                            confirm_title = Some(title);
                        } else {
                            nothing_selected = true;
                        }
                    }
                    _ => {}
                }
                if let Some(title) = confirm_title {
                    self.clear_status();
                    return Ok(Mode::ConfirmRemove(ConfirmBookRemove { title }));
                }
                if nothing_selected {
                    self.set_status("No books available to remove.", StatusKind::Error);
                }
                Ok(Mode::Normal)
            }
            Screen::SearchBook(search) => {
                let mut run = false;
                match code {
                    KeyCode::Up => search.move_selection(-1),
                    KeyCode::Down => search.move_selection(1),
                    KeyCode::PageUp => search.move_selection(-5),
                    KeyCode::PageDown => search.move_selection(5),
                    KeyCode::Backspace => {
                        search.query.pop();
                    }
                    KeyCode::Enter => run = true,
                    KeyCode::Char(ch) => {
                        if !ch.is_control() {
                            search.query.push(ch);
                        }
                    }
                    _ => {}
                }
                if run {
                    self.run_search();
                }
                Ok(Mode::Normal)
            }
            Screen::ViewAll(view) => {
                match code {
                    KeyCode::Up => view.move_selection(-1),
                    KeyCode::Down => view.move_selection(1),
                    KeyCode::PageUp => view.move_selection(-5),
                    KeyCode::PageDown => view.move_selection(5),
                    KeyCode::Home => view.select_first(),
                    KeyCode::End => view.select_last(),
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::ExportLibrary(_) => {
                if code == KeyCode::Enter {
                    self.run_export();
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmBookRemove) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.perform_remove(&confirm.title) {
                    Ok(removed) => {
                        if removed {
                            self.set_status(
                                format!("'{}' removed from the catalog.", confirm.title),
                                StatusKind::Info,
                            );
                        } else {
                            self.set_status(
                                format!("'{}' was no longer in the catalog.", confirm.title),
                                StatusKind::Info,
                            );
                        }
                        Ok(Mode::Normal)
                    }
                    Err(err) => {
                        let message = surface_error(&err);
                        self.set_status(message, StatusKind::Error);
                        Ok(Mode::ConfirmRemove(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmRemove(confirm)),
        }
    }

    /// Rebuild the screen for the selected menu entry. Store failures land in
    /// the footer instead of tearing the session down.
    fn activate_menu_choice(&mut self) {
        self.clear_status();
        if let Err(err) = self.load_menu_screen() {
            let message = surface_error(&err);
            self.set_status(message, StatusKind::Error);
        }
    }

    fn load_menu_screen(&mut self) -> Result<()> {
        self.screen = match MenuItem::ALL[self.menu_index] {
            MenuItem::AddBook => Screen::AddBook(BookForm::default()),
            MenuItem::RemoveBook => {
                let titles = fetch_books(&self.conn)?
                    .into_iter()
                    .map(|book| book.title)
                    .collect();
                Screen::RemoveBook(RemoveScreen::new(titles))
            }
            MenuItem::SearchBook => Screen::SearchBook(SearchScreen::new()),
            MenuItem::ViewAll => Screen::ViewAll(ViewScreen::new(fetch_books(&self.conn)?)),
            MenuItem::ExportLibrary => {
                let count = fetch_books(&self.conn)?.len();
                Screen::ExportLibrary(ExportScreen::new(count, default_export_path()?))
            }
        };
        Ok(())
    }

    fn submit_add_form(&mut self) {
        let parsed = match &self.screen {
            Screen::AddBook(form) => form.parse_inputs(),
            _ => return,
        };

        let saved = parsed.and_then(|book| {
            create_book(&self.conn, &book)?;
            Ok(book)
        });

        match saved {
            Ok(book) => {
                self.screen = Screen::AddBook(BookForm::default());
                self.set_status(
                    format!("'{}' added to the catalog.", book.title),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                let message = surface_error(&err);
                if let Screen::AddBook(form) = &mut self.screen {
                    form.error = Some(message.clone());
                }
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    /// Run the substring search for the current query. An empty term performs
    /// no query at all.
    fn run_search(&mut self) {
        let term = match &self.screen {
            Screen::SearchBook(search) => search.query.trim().to_string(),
            _ => return,
        };

        if term.is_empty() {
            self.set_status("Enter a title or author name to search.", StatusKind::Info);
            return;
        }

        match search_books(&self.conn, &term) {
            Ok(results) => {
                self.clear_status();
                if let Screen::SearchBook(search) = &mut self.screen {
                    search.set_results(results);
                }
            }
            Err(err) => {
                let message = surface_error(&err);
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    fn run_export(&mut self) {
        let (count, path) = match &self.screen {
            Screen::ExportLibrary(export) => (export.count, export.path.clone()),
            _ => return,
        };

        if count == 0 {
            self.set_status("No books available to export.", StatusKind::Error);
            return;
        }

        match write_csv(&path, &self.conn) {
            Ok(()) => {
                let plural = if count == 1 { "" } else { "s" };
                self.set_status(
                    format!("Exported {count} book{plural} to {}.", path.display()),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                let message = surface_error(&err);
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    fn perform_remove(&mut self, title: &str) -> Result<bool> {
        let removed = delete_book(&self.conn, title)?;
        let titles = fetch_books(&self.conn)?
            .into_iter()
            .map(|book| book.title)
            .collect();
        if let Screen::RemoveBook(remove) = &mut self.screen {
            remove.set_titles(titles);
        }
        Ok(removed)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (body_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(body_area);

        self.draw_sidebar(frame, columns[0]);

        match &self.screen {
            Screen::AddBook(form) => self.draw_add_book(frame, columns[1], form),
            Screen::RemoveBook(remove) => self.draw_remove_book(frame, columns[1], remove),
            Screen::SearchBook(search) => self.draw_search_book(frame, columns[1], search),
            Screen::ViewAll(view) => self.draw_view_all(frame, columns[1], view),
            Screen::ExportLibrary(export) => self.draw_export_library(frame, columns[1], export),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::ConfirmRemove(confirm) = &self.mode {
            self.draw_confirm_remove(frame, area, confirm);
        }
    }

    fn draw_sidebar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Library Manager");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| ListItem::new(item.label()))
            .collect();

        let highlight_style = if self.focus == Focus::Menu {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let list = List::new(items)
            .highlight_style(highlight_style)
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.menu_index));
        frame.render_stateful_widget(list, chunks[0], &mut list_state);

        let version = Paragraph::new(Span::styled(
            format!("SQLite {}", sqlite_version()),
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(version, chunks[1]);
    }

    fn draw_add_book(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Add a New Book");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch fields • Space toggles read • ←/→ set rating",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if self.focus == Focus::Content && form.active_takes_text() {
            let prefix = form.active.label().len() as u16 + 2;
            let cursor_x = inner.x + prefix + form.value_len(form.active) as u16;
            let cursor_y = inner.y + form.active.index() as u16;
            if cursor_y < inner.y + inner.height {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }

    fn draw_remove_book(&self, frame: &mut Frame, area: Rect, remove: &RemoveScreen) {
        let block = Block::default().borders(Borders::ALL).title("Remove a Book");

        if remove.titles.is_empty() {
            let message = Paragraph::new("No books available to remove.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = remove
            .titles
            .iter()
            .map(|title| ListItem::new(title.clone()))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(remove.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_search_book(&self, frame: &mut Frame, area: Rect, search: &SearchScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let input_block = Block::default().borders(Borders::ALL).title("Search");
        let input = Paragraph::new(Span::raw(format!("Search: {}", search.query)))
            .block(input_block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(input, chunks[0]);

        if self.focus == Focus::Content {
            let input_inner = input_block.inner(chunks[0]);
            let cursor_x =
                input_inner.x + "Search: ".len() as u16 + search.query.chars().count() as u16;
            frame.set_cursor_position((cursor_x, input_inner.y));
        }

        if !search.searched {
            let message = Paragraph::new("Enter a book title or author name to search.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Results"));
            frame.render_widget(message, chunks[1]);
            return;
        }

        if search.results.is_empty() {
            let message = Paragraph::new("No books found with that title or author.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Results"));
            frame.render_widget(message, chunks[1]);
            return;
        }

        self.render_book_cards(frame, chunks[1], &search.results, search.selected);
    }

    fn draw_view_all(&self, frame: &mut Frame, area: Rect, view: &ViewScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let plural = if view.books.len() == 1 { "" } else { "s" };
        let header = Paragraph::new(Line::from(vec![
            Span::styled("Your Library", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  •  {} book{plural}", view.books.len())),
        ]))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        if view.books.is_empty() {
            let message = Paragraph::new("Your library is empty. Add some books!")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
            return;
        }

        self.render_book_cards(frame, chunks[1], &view.books, view.selected);
    }

    fn draw_export_library(&self, frame: &mut Frame, area: Rect, export: &ExportScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Export Library");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if export.count == 0 {
            let message = Paragraph::new("No books available to export.")
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, inner);
            return;
        }

        let plural = if export.count == 1 { "" } else { "s" };
        let lines = vec![
            Line::from(format!("{} book{plural} ready to export.", export.count)),
            Line::from(format!("Destination: {}", export.path.display())),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to write the CSV file.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        if matches!(self.mode, Mode::ConfirmRemove(_)) {
            return Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Cancel"),
            ]);
        }

        if self.focus == Focus::Menu {
            return Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Choose Action   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Select   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]);
        }

        match &self.screen {
            Screen::AddBook(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Space]", key_style),
                Span::raw(" Toggle Read   "),
                Span::styled("[←→]", key_style),
                Span::raw(" Rating   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu"),
            ]),
            Screen::RemoveBook(_) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Remove   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu"),
            ]),
            Screen::SearchBook(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Search   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll Results   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu"),
            ]),
            Screen::ViewAll(_) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[PgUp/PgDn]", key_style),
                Span::raw(" Page   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu"),
            ]),
            Screen::ExportLibrary(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Export   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu"),
            ]),
        }
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmBookRemove) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Remove '{}' from the catalog?", confirm.title)),
            Line::from("This cannot be undone."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn render_book_cards(&self, frame: &mut Frame, area: Rect, books: &[Book], selected: usize) {
        if books.is_empty() || area.height == 0 {
            return;
        }

        let card_height = BOOK_CARD_HEIGHT as usize;
        let capacity = ((area.height as usize) / card_height).max(1);
        let len = books.len();
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }
        let end = min(start + capacity, len);
        let visible_len = end.saturating_sub(start);
        if visible_len == 0 {
            return;
        }

        let constraints: Vec<Constraint> = (0..visible_len)
            .map(|_| Constraint::Length(BOOK_CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, chunk) in rows.iter().enumerate() {
            if chunk.height == 0 {
                continue;
            }

            let book_index = start + idx;
            if book_index >= len {
                break;
            }

            let book = &books[book_index];
            let mut block = Block::default().borders(Borders::ALL);
            let mut paragraph_style = Style::default();
            if book_index == selected {
                block = block.style(Style::default().fg(Color::Yellow));
                paragraph_style = Style::default().fg(Color::Yellow);
            }

            let mut lines = Vec::new();
            let title = if book_index == selected {
                format!("▶ {}", book.title)
            } else {
                book.title.clone()
            };
            lines.push(Line::from(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            )));

            lines.push(Line::from(Span::styled(
                book.byline(),
                Style::default().fg(Color::Gray),
            )));

            let mut meta = Vec::new();
            if !book.genre.trim().is_empty() {
                meta.push(book.genre.trim().to_string());
            }
            meta.push(book.read_label().to_string());
            meta.push(format!("{} {}/5", book.rating_stars(), book.rating));
            lines.push(Line::from(Span::styled(
                meta.join(" • "),
                Style::default().fg(Color::Cyan),
            )));

            if !book.summary.trim().is_empty() {
                let width = chunk.width.saturating_sub(2) as usize;
                lines.push(Line::from(Span::styled(
                    truncate_line(book.summary.trim(), width),
                    Style::default().fg(Color::DarkGray),
                )));
            }

            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Left)
                .style(paragraph_style);

            frame.render_widget(paragraph, *chunk);
        }
    }
}
