//! Persistence: the [`Store`] couples the collection to its backing file.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::reducer::{Action, State};
use crate::config::StorageSettings;

/// Errors from loading or writing the data file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed data file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The tracker collection plus its backing file.
pub struct Store {
    path: PathBuf,
    pub state: State,
}

impl Store {
    /// Open the store at `path`, rehydrating the collection.
    ///
    /// A missing or empty file yields an empty collection: missing is the
    /// first-run case, and a zero-byte file is what an interrupted write
    /// leaves behind. A file with unparsable contents is an error; it is
    /// never silently replaced with an empty collection.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let state = match fs::read_to_string(&path) {
            Ok(contents) if contents.is_empty() => State::default(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => State::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, state })
    }

    /// Apply `action` and write the whole collection back out.
    ///
    /// The action stays applied in memory even when the write fails, so a
    /// later successful save still includes it.
    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        self.state.apply(action);
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Pick the data file path: CLI argument first, then the `storage.path`
/// setting, then the XDG default.
pub fn resolve_data_path(cli: Option<PathBuf>, storage: &StorageSettings) -> Option<PathBuf> {
    cli.or_else(|| storage.path.clone())
        .or_else(default_data_path)
}

/// Compute the default data path `$XDG_DATA_HOME/tally/trackers.json`,
/// falling back to `~/.local/share/tally/trackers.json` when `XDG_DATA_HOME`
/// is not set.
pub fn default_data_path() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    data_home.map(|d| d.join("tally").join("trackers.json"))
}
