use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::testenv::{EnvGuard, env_lock};

#[test]
fn resolve_config_path_prefers_tally_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TALLY_CONFIG_PATH", "/tmp/tally-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tally-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tally")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tally")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_weekday_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[storage]
path = "/tmp/custom-trackers.json"

[ui]
header_text = "hello"
calendar_min_days = 21
highlight_weekday = "mon"

[controls]
nudge_hours = 2
nudge_days = 7
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TALLY_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TALLY__UI__CALENDAR_MIN_DAYS");

    let s = Settings::load().unwrap();
    assert_eq!(
        s.storage.path,
        Some(std::path::PathBuf::from("/tmp/custom-trackers.json"))
    );
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.calendar_min_days, 21);
    assert_eq!(s.ui.highlight_weekday, WeekdaySetting::Monday);
    assert_eq!(s.controls.nudge_hours, 2);
    assert_eq!(s.controls.nudge_days, 7);
}

#[test]
fn settings_default_when_no_file_or_env_present() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "TALLY_CONFIG_PATH",
        dir.path().join("missing.toml").to_str().unwrap(),
    );
    let _g2 = EnvGuard::remove("TALLY__UI__CALENDAR_MIN_DAYS");

    let s = Settings::load().unwrap();
    assert_eq!(s.ui.calendar_min_days, 14);
    assert_eq!(s.ui.highlight_weekday, WeekdaySetting::Sunday);
    assert_eq!(s.storage.path, None);
    assert_eq!(s.controls.nudge_hours, 1);
    assert_eq!(s.controls.nudge_days, 1);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[ui]
calendar_min_days = 21
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TALLY_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TALLY__UI__CALENDAR_MIN_DAYS", "30");

    let s = Settings::load().unwrap();
    assert_eq!(s.ui.calendar_min_days, 30);
}

#[test]
fn validate_rejects_zero_minimums() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.ui.calendar_min_days = 0;
    assert!(s.validate().is_err());

    s = Settings::default();
    s.controls.nudge_hours = 0;
    assert!(s.validate().is_err());

    s = Settings::default();
    s.controls.nudge_days = 0;
    assert!(s.validate().is_err());
}

#[test]
fn weekday_setting_maps_to_chrono() {
    assert_eq!(WeekdaySetting::Sunday.weekday(), chrono::Weekday::Sun);
    assert_eq!(WeekdaySetting::Monday.weekday(), chrono::Weekday::Mon);
    assert_eq!(WeekdaySetting::Saturday.weekday(), chrono::Weekday::Sat);
}
