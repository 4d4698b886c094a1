//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use chrono::{DateTime, Datelike, Local, Utc};
use uuid::Uuid;

use crate::app::{App, Dialog, Screen};
use crate::config::{ControlsSettings, UiSettings, WeekdaySetting};
use crate::stats::{self, CalendarDay};
use crate::store::Tracker;

/// Calendar cells per row in the detail view.
pub const CALENDAR_COLUMNS: usize = 7;

const CALENDAR_CELL_HEIGHT: u16 = 4;
const HEADER_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 5;
const FOOTER_HEIGHT: u16 = 4;
const SUMMARY_HEIGHT: u16 = 4;

/// Calendar rows visible in the detail view on a terminal `height` rows
/// tall. The event loop bounds scrolling with this so the last page still
/// fills the box.
pub fn calendar_rows_that_fit(height: u16) -> usize {
    // Everything around the cells: the fixed boxes plus the calendar border.
    let chrome = HEADER_HEIGHT + STATUS_HEIGHT + FOOTER_HEIGHT + SUMMARY_HEIGHT + 2;
    (height.saturating_sub(chrome) / CALENDAR_CELL_HEIGHT) as usize
}

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    // j/k is filled per screen below.
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "open tracker".to_string());
    map.insert("t/space".to_string(), "log event".to_string());
    map.insert("n".to_string(), "new tracker".to_string());
    map.insert("d".to_string(), "delete tracker".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map.insert("esc/q".to_string(), "back".to_string());
    map
});

/// Render the controls help text for the current screen.
fn controls_text(screen: Screen) -> String {
    // Keep the rendered order stable and human-friendly.
    let (order, jk): (&[&str], &str) = match screen {
        Screen::List => (
            &["j/k", "gg/G", "enter", "t/space", "n", "d", "q"],
            "up/down",
        ),
        Screen::Detail(_) => (&["j/k", "gg/G", "t/space", "d", "esc/q"], "scroll"),
    };

    order
        .iter()
        .filter_map(|k| {
            if *k == "j/k" {
                Some(format!("[j/k] {jk}"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// One list row: event count, name and the latest event phrased relatively.
fn tracker_row_text(tracker: &Tracker, now: DateTime<Utc>) -> String {
    let when = match tracker.latest_event() {
        Some(last) => stats::relative_from(last, now),
        None => "no events yet".to_string(),
    };
    format!("{:>3}  {}  ({})", tracker.event_count(), tracker.name, when)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    display: &[usize],
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    now: DateTime<Local>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tally ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!(" TRACKERS: {}", app.store.state.trackers.len()));

        let events: usize = app
            .store
            .state
            .trackers
            .iter()
            .map(|t| t.event_count())
            .sum();
        parts.push(format!("EVENTS: {}", events));

        parts.push(format!("File: {}", app.store.path().display()));

        if let Some(msg) = &app.status {
            parts.push(msg.clone());
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .slow_blink()
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Body: list or calendar view.
    match app.screen {
        Screen::List => draw_tracker_list(frame, app, display, chunks[2], now),
        Screen::Detail(id) => draw_detail(frame, app, id, chunks[2], ui_settings, now),
    }

    // Overlay dialog popup (keeps the body visible under it).
    if let Some(dialog) = &app.dialog {
        draw_dialog(frame, app, dialog, chunks[2], controls_settings);
    }

    let footer = Paragraph::new(controls_text(app.screen))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_tracker_list(
    frame: &mut Frame,
    app: &App,
    display: &[usize],
    area: Rect,
    now: DateTime<Local>,
) {
    let total = display.len();
    if total == 0 {
        let empty = Paragraph::new("No trackers yet. Press n to create one.")
            .block(Block::default().borders(Borders::ALL).title(" trackers "));
        frame.render_widget(empty, area);
        return;
    }

    let now_utc = now.with_timezone(&Utc);

    // Center the selected item when possible by creating a visible window.
    // Important: only build ListItems for the visible window (avoid allocating the entire list).
    let list_height = area.height as usize;
    let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = if sel_pos > half { sel_pos - half } else { 0 };
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let visible_items: Vec<ListItem> = display[start..end]
        .iter()
        .map(|&i| ListItem::new(tracker_row_text(&app.store.state.trackers[i], now_utc)))
        .collect();

    let list = List::new(visible_items)
        .block(Block::default().borders(Borders::ALL).title(" trackers "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    state.select(Some(selected_pos_in_visible));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_detail(
    frame: &mut Frame,
    app: &App,
    id: Uuid,
    area: Rect,
    ui_settings: &UiSettings,
    now: DateTime<Local>,
) {
    let Some(tracker) = app.tracker(id) else {
        let gone = Paragraph::new("This tracker no longer exists.")
            .block(Block::default().borders(Borders::ALL).title(" tracker "));
        frame.render_widget(gone, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(SUMMARY_HEIGHT), Constraint::Min(1)])
        .split(area);

    let when = match tracker.latest_event() {
        Some(last) => stats::relative_from(last, now.with_timezone(&Utc)),
        None => "no events yet".to_string(),
    };
    let summary = format!("Events: {}\nLast: {}", tracker.event_count(), when);
    let summary_par = Paragraph::new(summary).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", tracker.name))
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(summary_par, sections[0]);

    let events = stats::to_local_naive(&tracker.events);
    let days = stats::calendar_days(&events, now.naive_local(), ui_settings.calendar_min_days);
    draw_calendar(
        frame,
        &days,
        sections[1],
        app.calendar_scroll,
        ui_settings.highlight_weekday,
    );
}

fn draw_calendar(
    frame: &mut Frame,
    days: &[CalendarDay],
    area: Rect,
    scroll: usize,
    highlight: WeekdaySetting,
) {
    let outer = Block::default().borders(Borders::ALL).title(" calendar ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if inner.height < CALENDAR_CELL_HEIGHT || inner.width == 0 {
        return;
    }

    let rows_that_fit = (inner.height / CALENDAR_CELL_HEIGHT) as usize;
    let total_rows = days.len().div_ceil(CALENDAR_COLUMNS);
    // Stop scrolling once the last row is on screen, never past it.
    let first_row = scroll.min(total_rows.saturating_sub(rows_that_fit));

    for (row_idx, row_days) in days
        .chunks(CALENDAR_COLUMNS)
        .skip(first_row)
        .take(rows_that_fit)
        .enumerate()
    {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + (row_idx as u16) * CALENDAR_CELL_HEIGHT,
            width: inner.width,
            height: CALENDAR_CELL_HEIGHT,
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, CALENDAR_COLUMNS as u32); CALENDAR_COLUMNS])
            .split(row_area);

        for (cell_area, day) in cells.iter().zip(row_days) {
            let style = if day.date.weekday() == highlight.weekday() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let text = format!("{}\n{}", day.count, stats::day_label(day.date));
            let cell = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(cell, *cell_area);
        }
    }
}

fn draw_dialog(
    frame: &mut Frame,
    app: &App,
    dialog: &Dialog,
    area: Rect,
    controls_settings: &ControlsSettings,
) {
    match dialog {
        Dialog::NewTracker { name } => {
            let popup = centered_rect_sized(44, 5, area);
            frame.render_widget(Clear, popup);

            let body = format!("Name: {name}█\n\n[enter] create | [esc] cancel");
            let par = Paragraph::new(body)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" new tracker ")
                        .padding(Padding {
                            left: 1,
                            right: 0,
                            top: 0,
                            bottom: 0,
                        }),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(par, popup);
        }
        Dialog::LogEvent { id, time } => {
            let popup = centered_rect_sized(58, 5, area);
            frame.render_widget(Clear, popup);

            let name = app.tracker(*id).map(|t| t.name.as_str()).unwrap_or("?");
            let local = time.with_timezone(&Local);
            let body = format!(
                "Logging: {}\nAt: {}\n[h/l] -/+{}h | [H/L] -/+{}d | [enter] save | [esc] cancel",
                name,
                stats::time_label(local.naive_local()),
                controls_settings.nudge_hours,
                controls_settings.nudge_days,
            );
            let par = Paragraph::new(body)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" log event ")
                        .padding(Padding {
                            left: 1,
                            right: 0,
                            top: 0,
                            bottom: 0,
                        }),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(par, popup);
        }
        Dialog::ConfirmDelete { id } => {
            let popup = centered_rect_sized(48, 5, area);
            frame.render_widget(Clear, popup);

            let (name, events) = app
                .tracker(*id)
                .map(|t| (t.name.as_str(), t.event_count()))
                .unwrap_or(("?", 0));
            let body = format!(
                "Delete \"{}\"?\n{} logged event(s) will be lost.\n[y] delete | [n/esc] keep",
                name, events
            );
            let par = Paragraph::new(body)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" delete tracker ")
                        .padding(Padding {
                            left: 1,
                            right: 0,
                            top: 0,
                            bottom: 0,
                        }),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(par, popup);
        }
    }
}
