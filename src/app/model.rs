//! Application model types: `App`, `Screen` and `Dialog`.
//!
//! The `App` struct owns the state store plus the view state used by the UI
//! and runtime: the screen being shown, the cursor, any open modal dialog
//! and a transient status message.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::store::{Action, Store, Tracker};

/// Which screen the body renders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// The tracker list.
    List,
    /// The calendar view for one tracker.
    Detail(Uuid),
}

/// A modal dialog over the current screen. At most one is open at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dialog {
    /// Editing the name of a tracker about to be created.
    NewTracker { name: String },
    /// Adjusting the timestamp of an event about to be recorded.
    LogEvent { id: Uuid, time: DateTime<Utc> },
    /// Awaiting confirmation before a tracker is deleted.
    ConfirmDelete { id: Uuid },
}

/// The main application model.
pub struct App {
    pub store: Store,
    pub selected: usize,
    pub screen: Screen,
    pub dialog: Option<Dialog>,
    pub calendar_scroll: usize,
    pub status: Option<String>,
}

impl App {
    /// Create a new `App` over an opened store, showing the tracker list.
    pub fn new(store: Store) -> Self {
        let mut app = Self {
            store,
            selected: 0,
            screen: Screen::List,
            dialog: None,
            calendar_scroll: 0,
            status: None,
        };
        app.ensure_selected_visible();
        app
    }

    fn trackers(&self) -> &[Tracker] {
        &self.store.state.trackers
    }

    /// Return the display order of tracker indices: most recently recorded
    /// event first, trackers with no events last. Ties keep collection order.
    pub fn display_indices(&self) -> Vec<usize> {
        let trackers = self.trackers();
        let mut indices: Vec<usize> = (0..trackers.len()).collect();
        indices.sort_by_key(|&i| std::cmp::Reverse(trackers[i].latest_event()));
        indices
    }

    /// The tracker under the cursor.
    pub fn selected_tracker(&self) -> Option<&Tracker> {
        self.trackers().get(self.selected)
    }

    /// Find a tracker by id.
    pub fn tracker(&self, id: Uuid) -> Option<&Tracker> {
        self.store.state.tracker(id)
    }

    /// Return the next visible index in the display order after `current`.
    /// Wraps around to the first element.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index in the display order before
    /// `current`. Wraps around to the last element.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
            None => Some(display[display.len() - 1]),
        }
    }

    /// Move the cursor to the next tracker in display order.
    pub fn next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    /// Move the cursor to the previous tracker in display order.
    pub fn prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }

    /// Set the selected tracker index and ensure it refers to a tracker.
    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
        self.ensure_selected_visible();
    }

    /// Ensure that `selected` refers to an existing tracker, otherwise move
    /// the cursor to the top of the display order.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
            return;
        }

        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }

    /// Open the calendar view for the tracker with `id`.
    pub fn open_detail(&mut self, id: Uuid) {
        self.screen = Screen::Detail(id);
        self.calendar_scroll = 0;
    }

    /// Leave the calendar view.
    pub fn close_detail(&mut self) {
        self.screen = Screen::List;
        self.calendar_scroll = 0;
    }

    /// Open the new-tracker dialog with an empty name.
    pub fn open_new_tracker(&mut self) {
        self.dialog = Some(Dialog::NewTracker {
            name: String::new(),
        });
    }

    /// Open the log-event dialog for `id`, seeded with `time`.
    pub fn open_log_event(&mut self, id: Uuid, time: DateTime<Utc>) {
        self.dialog = Some(Dialog::LogEvent { id, time });
    }

    /// Open the delete confirmation for `id`.
    pub fn open_confirm_delete(&mut self, id: Uuid) {
        self.dialog = Some(Dialog::ConfirmDelete { id });
    }

    /// Close any open dialog without applying it.
    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    /// Append a character to the name being edited in the new-tracker dialog.
    pub fn push_name_char(&mut self, c: char) {
        if let Some(Dialog::NewTracker { name }) = &mut self.dialog {
            name.push(c);
        }
    }

    /// Remove the last character from the name being edited.
    pub fn pop_name_char(&mut self) {
        if let Some(Dialog::NewTracker { name }) = &mut self.dialog {
            name.pop();
        }
    }

    /// Shift the pending timestamp in the log-event dialog by `delta`.
    /// Shifts past the representable time range are ignored.
    pub fn nudge_pending(&mut self, delta: Duration) {
        if let Some(Dialog::LogEvent { time, .. }) = &mut self.dialog {
            if let Some(nudged) = time.checked_add_signed(delta) {
                *time = nudged;
            }
        }
    }

    /// Create the tracker being edited. A blank name keeps the dialog open.
    pub fn submit_new_tracker(&mut self) {
        let name = match &self.dialog {
            Some(Dialog::NewTracker { name }) => name.trim().to_string(),
            _ => return,
        };
        if name.is_empty() {
            return;
        }

        self.dialog = None;
        self.create_tracker(name);
    }

    /// Record the pending event being adjusted and close the dialog.
    pub fn submit_pending_event(&mut self) {
        if let Some(Dialog::LogEvent { id, time }) = &self.dialog {
            let (id, time) = (*id, *time);
            self.dialog = None;
            self.record_event(id, time);
        }
    }

    /// Delete the tracker awaiting confirmation and close the dialog.
    pub fn confirm_pending_delete(&mut self) {
        if let Some(Dialog::ConfirmDelete { id }) = &self.dialog {
            let id = *id;
            self.dialog = None;
            self.delete_tracker(id);
        }
    }

    /// Create a tracker named `name` and move the cursor onto it.
    pub fn create_tracker(&mut self, name: String) {
        self.dispatch(Action::CreateTracker { name });
        if let Some(last) = self.trackers().len().checked_sub(1) {
            self.selected = last;
        }
    }

    /// Record an event against `id` at `time`.
    pub fn record_event(&mut self, id: Uuid, time: DateTime<Utc>) {
        self.dispatch(Action::RecordEvent { id, time });
    }

    /// Delete the tracker with `id`, fixing up the screen and cursor.
    pub fn delete_tracker(&mut self, id: Uuid) {
        if self.screen == Screen::Detail(id) {
            self.close_detail();
        }

        self.dispatch(Action::DeleteTracker { id });

        let len = self.trackers().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        self.ensure_selected_visible();
    }

    /// Apply an action through the store. A failed write-through becomes a
    /// status message instead of ending the session; the change stays applied
    /// in memory and rides along with the next successful save.
    fn dispatch(&mut self, action: Action) {
        match self.store.dispatch(action) {
            Ok(()) => self.status = None,
            Err(e) => self.status = Some(format!("save failed: {e}")),
        }
    }
}
