//! Date arithmetic behind the views: relative-time phrasing, calendar-day
//! expansion and display labels.
//!
//! Everything here is pure and takes "now" as an argument, so the runtime can
//! pass the local clock while tests use fixed instants.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike, Utc, Weekday};

/// Milliseconds in one 400-year Gregorian cycle (146097 days).
const MILLIS_PER_GREGORIAN_CYCLE: i64 = 146_097 * 86_400_000;

/// One cell of the detail-view calendar: a calendar day and the number of
/// events logged on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub count: usize,
}

/// Phrase the distance from `then` to `now` the way a person would say it
/// ("3 hours ago", "in 2 days").
pub fn relative_from(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    if delta < Duration::zero() {
        format!("in {}", span_phrase(-delta))
    } else {
        format!("{} ago", span_phrase(delta))
    }
}

/// Colloquial span wording: every unit is rounded to nearest, then the
/// smallest unit whose rounded value fits its threshold wins.
fn span_phrase(delta: Duration) -> String {
    let ms = delta.num_milliseconds();
    let seconds = div_round(ms, 1_000);
    let minutes = div_round(ms, 60_000);
    let hours = div_round(ms, 3_600_000);
    let days = div_round(ms, 86_400_000);
    let months = div_round(ms * 4_800, MILLIS_PER_GREGORIAN_CYCLE);
    let years = div_round(ms * 400, MILLIS_PER_GREGORIAN_CYCLE);

    if seconds <= 44 {
        "a few seconds".to_string()
    } else if seconds <= 89 {
        "a minute".to_string()
    } else if minutes <= 44 {
        format!("{minutes} minutes")
    } else if minutes <= 89 {
        "an hour".to_string()
    } else if hours <= 21 {
        format!("{hours} hours")
    } else if hours <= 35 {
        "a day".to_string()
    } else if days <= 25 {
        format!("{days} days")
    } else if days <= 45 {
        "a month".to_string()
    } else if months <= 10 {
        format!("{months} months")
    } else if months <= 17 {
        "a year".to_string()
    } else {
        format!("{years} years")
    }
}

/// Divide rounding to nearest; callers only pass non-negative numerators.
fn div_round(n: i64, d: i64) -> i64 {
    (n + d / 2) / d
}

/// Expand events into calendar cells for the detail view, newest first.
///
/// The grid is anchored at the first recorded event (or at `now` when there
/// is none): one cell per whole-day step from the anchor up to today, padded
/// with days before the anchor until at least `min_days` cells exist. Whole
/// days are counted on the raw timestamps, so an anchor late in the day can
/// leave today's cell off the grid until a full 24 hours have passed.
pub fn calendar_days(events: &[NaiveDateTime], now: NaiveDateTime, min_days: usize) -> Vec<CalendarDay> {
    let anchor = events.first().copied().unwrap_or(now);
    let days_since = (now - anchor).num_seconds().div_euclid(86_400);
    let anchor_date = anchor.date();
    let event_dates: Vec<NaiveDate> = events.iter().map(|e| e.date()).collect();
    let count_on = |date: NaiveDate| event_dates.iter().filter(|d| **d == date).count();

    let mut cells = Vec::new();
    for i in (0..=days_since).rev() {
        let date = anchor_date + Duration::days(i);
        cells.push(CalendarDay {
            date,
            count: count_on(date),
        });
    }

    let pad = min_days as i64 - days_since - 1;
    for i in 1..=pad {
        let date = anchor_date - Duration::days(i);
        cells.push(CalendarDay {
            date,
            count: count_on(date),
        });
    }

    cells
}

/// Project UTC event timestamps into local wall-clock datetimes.
pub fn to_local_naive(events: &[DateTime<Utc>]) -> Vec<NaiveDateTime> {
    events
        .iter()
        .map(|e| e.with_timezone(&Local).naive_local())
        .collect()
}

/// Two-letter weekday label (`Su`, `Mo`, ...).
pub fn weekday_short(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

/// Calendar-cell label: weekday plus `day.month`, e.g. "Su 7.9".
pub fn day_label(date: NaiveDate) -> String {
    format!(
        "{} {}.{}",
        weekday_short(date.weekday()),
        date.day(),
        date.month()
    )
}

/// Pending-event label: day label plus wall-clock time, e.g. "Su 7.9 14:05".
pub fn time_label(t: NaiveDateTime) -> String {
    format!("{} {:02}:{:02}", day_label(t.date()), t.hour(), t.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn ndt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn relative_phrases_follow_the_usual_ladder() {
        let now = utc(2025, 9, 1, 12, 0, 0);
        let ago = |d: Duration| relative_from(now - d, now);

        assert_eq!(ago(Duration::seconds(30)), "a few seconds ago");
        assert_eq!(ago(Duration::seconds(45)), "a minute ago");
        assert_eq!(ago(Duration::minutes(10)), "10 minutes ago");
        assert_eq!(ago(Duration::minutes(50)), "an hour ago");
        assert_eq!(ago(Duration::hours(5)), "5 hours ago");
        assert_eq!(ago(Duration::hours(30)), "a day ago");
        assert_eq!(ago(Duration::days(12)), "12 days ago");
        assert_eq!(ago(Duration::days(40)), "a month ago");
        assert_eq!(ago(Duration::days(100)), "3 months ago");
        assert_eq!(ago(Duration::days(400)), "a year ago");
        assert_eq!(ago(Duration::days(800)), "2 years ago");
    }

    #[test]
    fn relative_rounds_at_unit_boundaries() {
        let now = utc(2025, 9, 1, 12, 0, 0);
        let ago = |d: Duration| relative_from(now - d, now);

        // 90 seconds rounds to 2 minutes, 90 minutes to 2 hours.
        assert_eq!(ago(Duration::seconds(89)), "a minute ago");
        assert_eq!(ago(Duration::seconds(90)), "2 minutes ago");
        assert_eq!(ago(Duration::minutes(89)), "an hour ago");
        assert_eq!(ago(Duration::minutes(90)), "2 hours ago");
        assert_eq!(ago(Duration::hours(35)), "a day ago");
        assert_eq!(ago(Duration::hours(36)), "2 days ago");
    }

    #[test]
    fn relative_handles_future_timestamps() {
        let now = utc(2025, 9, 1, 12, 0, 0);
        assert_eq!(relative_from(now + Duration::hours(2), now), "in 2 hours");
        assert_eq!(
            relative_from(now + Duration::seconds(10), now),
            "in a few seconds"
        );
    }

    #[test]
    fn calendar_with_no_events_pads_back_from_today() {
        let now = ndt(2025, 9, 10, 8, 0);
        let cells = calendar_days(&[], now, 14);

        assert_eq!(cells.len(), 14);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2025, 9, 10).unwrap());
        assert_eq!(cells[13].date, NaiveDate::from_ymd_opt(2025, 8, 28).unwrap());
        assert!(cells.iter().all(|c| c.count == 0));
    }

    #[test]
    fn calendar_counts_events_per_day_newest_first() {
        let events = [ndt(2025, 9, 1, 0, 30), ndt(2025, 9, 1, 9, 0), ndt(2025, 9, 5, 7, 0)];
        let now = ndt(2025, 9, 10, 8, 0);
        let cells = calendar_days(&events, now, 14);

        assert_eq!(cells.len(), 14);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2025, 9, 10).unwrap());
        assert_eq!(cells[5].date, NaiveDate::from_ymd_opt(2025, 9, 5).unwrap());
        assert_eq!(cells[5].count, 1);
        assert_eq!(cells[9].date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(cells[9].count, 2);
        // Padding continues past the first event's day.
        assert_eq!(cells[13].date, NaiveDate::from_ymd_opt(2025, 8, 28).unwrap());
    }

    #[test]
    fn calendar_grows_past_the_minimum_with_history() {
        let events = [ndt(2025, 8, 1, 0, 0)];
        let now = ndt(2025, 9, 10, 0, 0);
        let cells = calendar_days(&events, now, 14);

        assert_eq!(cells.len(), 41);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2025, 9, 10).unwrap());
        assert_eq!(cells[40].date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        assert_eq!(cells[40].count, 1);
    }

    #[test]
    fn calendar_steps_whole_days_from_the_anchor_timestamp() {
        // First event late on the 8th; by 08:00 on the 10th only one whole
        // day has elapsed, so the newest cell is the 9th, not today.
        let events = [ndt(2025, 9, 8, 9, 30), ndt(2025, 9, 8, 10, 0), ndt(2025, 9, 10, 7, 0)];
        let now = ndt(2025, 9, 10, 8, 0);
        let cells = calendar_days(&events, now, 14);

        assert_eq!(cells.len(), 14);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2025, 9, 9).unwrap());
        assert_eq!(cells[1].date, NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
        assert_eq!(cells[1].count, 2);
        assert!(cells.iter().all(|c| c.date != NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()));
    }

    #[test]
    fn calendar_with_future_anchor_pads_before_it() {
        let events = [ndt(2025, 9, 12, 10, 0)];
        let now = ndt(2025, 9, 10, 8, 0);
        let cells = calendar_days(&events, now, 14);

        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2025, 9, 11).unwrap());
        assert_eq!(cells[15].date, NaiveDate::from_ymd_opt(2025, 8, 27).unwrap());
        assert!(cells.iter().all(|c| c.count == 0));
    }

    #[test]
    fn calendar_honors_the_configured_minimum() {
        let cells = calendar_days(&[], ndt(2025, 9, 10, 8, 0), 3);
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn labels_use_short_weekday_and_unpadded_date() {
        assert_eq!(day_label(NaiveDate::from_ymd_opt(2025, 9, 7).unwrap()), "Su 7.9");
        assert_eq!(day_label(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()), "Th 25.12");
        assert_eq!(time_label(ndt(2025, 9, 7, 5, 3)), "Su 7.9 05:03");
        assert_eq!(weekday_short(Weekday::Wed), "We");
    }
}
