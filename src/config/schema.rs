use std::path::PathBuf;

use chrono::Weekday;
use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tally/config.toml` or `~/.config/tally/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TALLY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            ui: UiSettings::default(),
            controls: ControlsSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Data file holding the tracker collection. When unset the XDG default
    /// (`$XDG_DATA_HOME/tally/trackers.json`) is used. A path given on the
    /// command line wins over both.
    pub path: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self { path: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "tally" header box.
    pub header_text: String,

    /// Minimum number of day cells in the detail-view calendar. Young
    /// trackers are padded back to this many days.
    pub calendar_min_days: usize,

    /// Weekday emphasized in the calendar grid.
    pub highlight_weekday: WeekdaySetting,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ tally: count what counts ~ ".to_string(),
            calendar_min_days: 14,
            highlight_weekday: WeekdaySetting::Sunday,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Hours added/removed per `l` / `h` press when adjusting a pending
    /// event time.
    pub nudge_hours: u64,
    /// Days added/removed per `L` / `H` press when adjusting a pending
    /// event time.
    pub nudge_days: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            nudge_hours: 1,
            nudge_days: 1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekdaySetting {
    #[serde(alias = "mon")]
    Monday,
    #[serde(alias = "tue")]
    Tuesday,
    #[serde(alias = "wed")]
    Wednesday,
    #[serde(alias = "thu")]
    Thursday,
    #[serde(alias = "fri")]
    Friday,
    #[serde(alias = "sat")]
    Saturday,
    #[serde(alias = "sun")]
    Sunday,
}

impl WeekdaySetting {
    /// The `chrono` weekday this setting names.
    pub fn weekday(self) -> Weekday {
        match self {
            WeekdaySetting::Monday => Weekday::Mon,
            WeekdaySetting::Tuesday => Weekday::Tue,
            WeekdaySetting::Wednesday => Weekday::Wed,
            WeekdaySetting::Thursday => Weekday::Thu,
            WeekdaySetting::Friday => Weekday::Fri,
            WeekdaySetting::Saturday => Weekday::Sat,
            WeekdaySetting::Sunday => Weekday::Sun,
        }
    }
}
