//! Main application logic for the terminal user interface.
//!
//! One screen: the three buckets side by side, a status bar, and two popup
//! states (add form, delete confirmation). Every mutation goes through the
//! injected store and is followed by a full reload and rebuild of the board,
//! so the rows on screen always match the store file.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};

use crate::board::{format_row, Board, EMPTY_BUCKET};
use crate::fields::{format_bucket, format_priority, Action, Bucket};
use crate::store::{next_id, TaskStore};
use crate::task::Task;
use crate::tui::colors::{priority_color, DIM_GREY};
use crate::tui::form::{AddForm, PRIORITY_FIELD};
use crate::tui::input::InputField;

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq)]
enum AppState {
    Board,
    AddTask,
    Confirm,
}

const BUCKETS: [Bucket; 3] = [Bucket::Today, Bucket::Upcoming, Bucket::Completed];

/// Main application state for the terminal user interface.
///
/// Holds the current screen, the freshly built board, pane focus and row
/// selection, the add form, and the pending delete confirmation.
pub struct App<'a> {
    state: AppState,
    store: &'a dyn TaskStore,
    board: Board,
    focus: Bucket,
    list_state: ListState,
    form: AddForm,
    status_message: String,
    confirm_delete: Option<u64>,
}

impl<'a> App<'a> {
    /// Create a new App over the given store and build the initial board.
    pub fn new(store: &'a dyn TaskStore) -> Self {
        let mut app = App {
            state: AppState::Board,
            store,
            board: Board::default(),
            focus: Bucket::Today,
            list_state: ListState::default(),
            form: AddForm::new(),
            status_message: String::new(),
            confirm_delete: None,
        };
        app.refresh();
        app
    }

    /// Reload the store and rebuild the board, clamping the row selection.
    fn refresh(&mut self) {
        let tasks = self.store.load();
        self.board = Board::build(&tasks, Local::now().date_naive());
        let len = self.focused_rows().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) if i < len => Some(i),
            _ => Some(len - 1),
        };
        self.list_state.select(selected);
    }

    fn focused_rows(&self) -> &[Task] {
        self.board.bucket(self.focus)
    }

    fn selected_task(&self) -> Option<&Task> {
        self.list_state
            .selected()
            .and_then(|i| self.focused_rows().get(i))
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Apply a row action to the task with the given id, then reload.
    fn dispatch(&mut self, action: Action, id: u64) -> io::Result<()> {
        match action {
            Action::Toggle => {
                self.store.toggle(id)?;
                self.set_status_message(format!("Toggled #{id}"));
            }
            Action::Delete => {
                self.store.remove(id)?;
                self.set_status_message(format!("Deleted #{id}"));
            }
        }
        self.refresh();
        Ok(())
    }

    /// Move pane focus left or right, resetting the row selection.
    fn shift_focus(&mut self, right: bool) {
        let pos = BUCKETS.iter().position(|&b| b == self.focus).unwrap_or(0);
        let next = if right {
            (pos + 1) % BUCKETS.len()
        } else {
            (pos + BUCKETS.len() - 1) % BUCKETS.len()
        };
        self.focus = BUCKETS[next];
        let len = self.focused_rows().len();
        self.list_state
            .select(if len == 0 { None } else { Some(0) });
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.focused_rows().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let next = match self.list_state.selected() {
            None => 0,
            Some(i) if down => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
        };
        self.list_state.select(Some(next));
    }

    /// Handle keyboard input when the board is in the foreground.
    ///
    /// Returns true if the application should quit.
    fn handle_board_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Tab | KeyCode::Right => self.shift_focus(true),
            KeyCode::BackTab | KeyCode::Left => self.shift_focus(false),
            KeyCode::Up => self.move_selection(false),
            KeyCode::Down => self.move_selection(true),
            KeyCode::Char('a') => {
                self.form = AddForm::new();
                self.state = AppState::AddTask;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(task) = self.selected_task() {
                    let id = task.id;
                    self.dispatch(Action::Toggle, id)?;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(task) = self.selected_task() {
                    self.confirm_delete = Some(task.id);
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('r') => {
                self.refresh();
                self.set_status_message("Reloaded".to_string());
            }
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input in the add-task form.
    fn handle_form_input(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                self.state = AppState::Board;
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Enter => match self.form.validate() {
                Ok((name, date, priority)) => {
                    let id = next_id(&self.store.load());
                    self.store.append(Task::new(id, name, date, priority))?;
                    self.form.clear();
                    self.state = AppState::Board;
                    self.refresh();
                    self.set_status_message(format!("Added #{id}"));
                }
                Err(msg) => self.set_status_message(msg),
            },
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input in the delete confirmation dialog.
    fn handle_confirm_input(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(id) = self.confirm_delete.take() {
                    self.dispatch(Action::Delete, id)?;
                }
                self.state = AppState::Board;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_delete = None;
                self.state = AppState::Board;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(false);
                }
                self.status_message.clear();

                let should_quit = match self.state {
                    AppState::Board => self.handle_board_input(key.code, key.modifiers)?,
                    AppState::AddTask => self.handle_form_input(key.code)?,
                    AppState::Confirm => self.handle_confirm_input(key.code)?,
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Render one bucket pane.
    fn render_bucket(&mut self, f: &mut Frame, area: Rect, bucket: Bucket) {
        let rows = self.board.bucket(bucket);
        let focused = bucket == self.focus;

        let items: Vec<ListItem> = if rows.is_empty() {
            vec![ListItem::new(Span::styled(
                EMPTY_BUCKET,
                Style::default().fg(DIM_GREY).add_modifier(Modifier::ITALIC),
            ))]
        } else {
            rows.iter()
                .map(|t| {
                    let mut style = Style::default().fg(priority_color(t.priority));
                    if t.completed {
                        style = Style::default()
                            .fg(DIM_GREY)
                            .add_modifier(Modifier::CROSSED_OUT);
                    }
                    ListItem::new(Span::styled(format_row(t), style))
                })
                .collect()
        };

        let title = format!(" {} ({}) ", format_bucket(bucket), rows.len());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            });

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

        if focused && !rows.is_empty() {
            f.render_stateful_widget(list, area, &mut self.list_state);
        } else {
            f.render_widget(list, area);
        }
    }

    /// Render the three bucket panes side by side.
    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(area);

        for (i, bucket) in BUCKETS.iter().enumerate() {
            self.render_bucket(f, chunks[i], *bucket);
        }
    }

    /// Render the add-task form as a centered popup.
    fn render_form(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 40, area);
        f.render_widget(Clear, popup);

        let field_line = |label: &str, field: &InputField| {
            let marker = if field.active { "> " } else { "  " };
            Line::from(vec![
                Span::raw(marker.to_string()),
                Span::styled(format!("{label:<10}"), Style::default().fg(Color::Cyan)),
                Span::raw(field.value.clone()),
                if field.active {
                    Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK))
                } else {
                    Span::raw("")
                },
            ])
        };

        let priority_marker = if self.form.current_field == PRIORITY_FIELD {
            "> "
        } else {
            "  "
        };
        let priority_line = Line::from(vec![
            Span::raw(priority_marker.to_string()),
            Span::styled(format!("{:<10}", "Priority"), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("< {} >", format_priority(self.form.selected_priority())),
                Style::default().fg(priority_color(self.form.selected_priority())),
            ),
        ]);

        let mut lines = vec![
            Line::raw(""),
            field_line("Name", &self.form.name),
            field_line("Due date", &self.form.date),
            priority_line,
            Line::raw(""),
            Line::from(Span::styled(
                "Enter save | Tab next field | Esc cancel",
                Style::default().fg(DIM_GREY),
            )),
        ];
        // Keep the hint visible even on short popups.
        if popup.height < lines.len() as u16 + 2 {
            lines.truncate(popup.height.saturating_sub(2) as usize);
        }

        let form = Paragraph::new(lines).block(
            Block::default()
                .title(" Add Task ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(form, popup);
    }

    /// Render the delete confirmation popup over the board.
    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(40, 20, area);
        f.render_widget(Clear, popup);

        let id = self.confirm_delete.unwrap_or_default();
        let text = vec![
            Line::raw(""),
            Line::from(format!("Delete task #{id}?")),
            Line::raw(""),
            Line::from(Span::styled(
                "y delete | n cancel",
                Style::default().fg(DIM_GREY),
            )),
        ];
        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(" Confirm ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        f.render_widget(dialog, popup);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Board => {
                    let toggle_hint = if self.focus == Bucket::Completed {
                        "Space reopen"
                    } else {
                        "Space complete"
                    };
                    format!("a add | {toggle_hint} | d delete | Tab pane | q quit")
                }
                AppState::AddTask => "Add New Task".to_string(),
                AppState::Confirm => "Confirm Delete".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::DarkGray).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        self.render_board(f, chunks[0]);
        match self.state {
            AppState::Board => {}
            AppState::AddTask => self.render_form(f, chunks[0]),
            AppState::Confirm => self.render_confirm(f, chunks[0]),
        }
        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop: draw, then process input, until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Centered sub-rectangle taking the given percentages of the area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;
    use crate::store::MemStore;
    use chrono::NaiveDate;

    fn store_with(dates: &[(&str, bool)]) -> MemStore {
        let tasks = dates
            .iter()
            .enumerate()
            .map(|(i, (d, done))| Task {
                id: i as u64 + 1,
                name: format!("t{}", i + 1),
                date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
                priority: Priority::Low,
                completed: *done,
            })
            .collect();
        MemStore::with_tasks(tasks)
    }

    #[test]
    fn dispatch_toggle_reloads_the_board() {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let store = store_with(&[(today.as_str(), false)]);
        let mut app = App::new(&store);
        assert_eq!(app.board.today.len(), 1);
        let id = app.board.today[0].id;
        app.dispatch(Action::Toggle, id).unwrap();
        assert!(app.board.today.is_empty());
        assert_eq!(app.board.completed.len(), 1);
    }

    #[test]
    fn dispatch_with_unknown_id_is_a_no_op() {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let store = store_with(&[(today.as_str(), false)]);
        let mut app = App::new(&store);
        app.dispatch(Action::Delete, 42).unwrap();
        assert_eq!(store.load().len(), 1);
        assert_eq!(app.board.today.len(), 1);
    }

    #[test]
    fn delete_clamps_the_selection() {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let store = store_with(&[(today.as_str(), false), (today.as_str(), false)]);
        let mut app = App::new(&store);
        app.list_state.select(Some(1));
        let id = app.selected_task().unwrap().id;
        app.dispatch(Action::Delete, id).unwrap();
        assert_eq!(app.list_state.selected(), Some(0));
        let id = app.selected_task().unwrap().id;
        app.dispatch(Action::Delete, id).unwrap();
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn focus_cycles_through_all_buckets() {
        let store = store_with(&[]);
        let mut app = App::new(&store);
        assert_eq!(app.focus, Bucket::Today);
        app.shift_focus(true);
        assert_eq!(app.focus, Bucket::Upcoming);
        app.shift_focus(true);
        assert_eq!(app.focus, Bucket::Completed);
        app.shift_focus(true);
        assert_eq!(app.focus, Bucket::Today);
        app.shift_focus(false);
        assert_eq!(app.focus, Bucket::Completed);
    }
}
