//! The reducer: every change to the collection goes through [`State::apply`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Tracker;

/// A mutation of the tracker collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add a new tracker with the given name and no events.
    CreateTracker { name: String },
    /// Append an event timestamp to the tracker with the given id.
    RecordEvent { id: Uuid, time: DateTime<Utc> },
    /// Remove the tracker with the given id together with its events.
    DeleteTracker { id: Uuid },
}

/// The full application state: the tracker collection.
///
/// Serializes as the bare array of trackers, so the data file stays readable
/// by (and from) earlier versions of the app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    pub trackers: Vec<Tracker>,
}

impl State {
    /// Apply one action. Actions naming an unknown tracker id are no-ops.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::CreateTracker { name } => {
                self.trackers.push(Tracker::new(name));
            }
            Action::RecordEvent { id, time } => {
                if let Some(tracker) = self.trackers.iter_mut().find(|t| t.id == id) {
                    tracker.events.push(time);
                }
            }
            Action::DeleteTracker { id } => {
                self.trackers.retain(|t| t.id != id);
            }
        }
    }

    /// Find a tracker by id.
    pub fn tracker(&self, id: Uuid) -> Option<&Tracker> {
        self.trackers.iter().find(|t| t.id == id)
    }
}
