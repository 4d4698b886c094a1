use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use uuid::Uuid;

use crate::app::{App, Dialog, Screen};
use crate::config;
use crate::stats;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self { pending_gg: false }
    }
}

/// Main terminal event loop: draws the UI and applies key events to the app.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Local::now();
        let display = app.display_indices();
        let frame_area = terminal
            .draw(|f| ui::draw(f, app, &display, &settings.ui, &settings.controls, now))?
            .area;
        let viewport_rows = ui::calendar_rows_that_fit(frame_area.height);

        // The poll timeout doubles as a redraw tick, keeping relative times
        // and the calendar fresh while idle.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state, now, viewport_rows) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Dispatch one key press. Returns `true` when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
    now: DateTime<Local>,
    viewport_rows: usize,
) -> bool {
    if app.dialog.is_some() {
        state.pending_gg = false;
        handle_dialog_key(key, settings, app);
        return false;
    }

    match app.screen {
        Screen::List => handle_list_key(key, app, state),
        Screen::Detail(id) => {
            handle_detail_key(key, settings, app, state, id, now, viewport_rows);
            false
        }
    }
}

fn handle_dialog_key(key: KeyEvent, settings: &config::Settings, app: &mut App) {
    // Clamp before the cast: Duration::hours and Duration::days panic when
    // out of bounds.
    let nudge_hours =
        chrono::Duration::hours(settings.controls.nudge_hours.min(i32::MAX as u64) as i64);
    let nudge_days =
        chrono::Duration::days(settings.controls.nudge_days.min(i32::MAX as u64) as i64);

    match &app.dialog {
        Some(Dialog::NewTracker { .. }) => match key.code {
            KeyCode::Esc => app.cancel_dialog(),
            KeyCode::Backspace => app.pop_name_char(),
            KeyCode::Enter => app.submit_new_tracker(),
            KeyCode::Char(c) => {
                // Keep it simple: edit on printable characters.
                if !c.is_control() {
                    app.push_name_char(c);
                }
            }
            _ => {}
        },
        Some(Dialog::LogEvent { .. }) => match key.code {
            KeyCode::Esc => app.cancel_dialog(),
            KeyCode::Enter => app.submit_pending_event(),
            KeyCode::Char('h') => app.nudge_pending(-nudge_hours),
            KeyCode::Char('l') => app.nudge_pending(nudge_hours),
            KeyCode::Char('H') => app.nudge_pending(-nudge_days),
            KeyCode::Char('L') => app.nudge_pending(nudge_days),
            _ => {}
        },
        Some(Dialog::ConfirmDelete { .. }) => match key.code {
            KeyCode::Char('y') => app.confirm_pending_delete(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_dialog(),
            _ => {}
        },
        None => {}
    }
}

fn handle_list_key(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('n') => {
            state.pending_gg = false;
            app.open_new_tracker();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                let display = app.display_indices();
                if let Some(&first) = display.first() {
                    app.set_selected(first);
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            let display = app.display_indices();
            if let Some(&last) = display.last() {
                app.set_selected(last);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            if let Some(tracker) = app.selected_tracker() {
                let id = tracker.id;
                app.open_detail(id);
            }
        }
        KeyCode::Char('t') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            if let Some(tracker) = app.selected_tracker() {
                let id = tracker.id;
                app.open_log_event(id, Utc::now());
            }
        }
        KeyCode::Char('d') => {
            state.pending_gg = false;
            if let Some(tracker) = app.selected_tracker() {
                let id = tracker.id;
                app.open_confirm_delete(id);
            }
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

fn handle_detail_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
    id: Uuid,
    now: DateTime<Local>,
    viewport_rows: usize,
) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.pending_gg = false;
            app.close_detail();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            let max = max_calendar_scroll(app, id, &settings.ui, now, viewport_rows);
            app.calendar_scroll = (app.calendar_scroll + 1).min(max);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.calendar_scroll = app.calendar_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.calendar_scroll = 0;
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.calendar_scroll = max_calendar_scroll(app, id, &settings.ui, now, viewport_rows);
        }
        KeyCode::Char('t') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            app.open_log_event(id, Utc::now());
        }
        KeyCode::Char('d') => {
            state.pending_gg = false;
            app.open_confirm_delete(id);
        }
        KeyCode::Char(_) => {
            state.pending_gg = false;
        }
        _ => {}
    }
}

/// Number of calendar rows the detail view currently has.
fn calendar_row_count(app: &App, id: Uuid, ui: &config::UiSettings, now: DateTime<Local>) -> usize {
    let Some(tracker) = app.tracker(id) else {
        return 0;
    };
    let events = stats::to_local_naive(&tracker.events);
    let days = stats::calendar_days(&events, now.naive_local(), ui.calendar_min_days);
    days.len().div_ceil(ui::CALENDAR_COLUMNS)
}

/// Highest useful scroll position: the first row of the last full page.
/// Zero when every row already fits the viewport.
fn max_calendar_scroll(
    app: &App,
    id: Uuid,
    ui: &config::UiSettings,
    now: DateTime<Local>,
    viewport_rows: usize,
) -> usize {
    calendar_row_count(app, id, ui, now).saturating_sub(viewport_rows.max(1))
}
