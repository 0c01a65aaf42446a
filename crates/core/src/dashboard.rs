//! Date maths behind the dashboard widgets.
//!
//! Birthdays and work anniversaries recur yearly on the same month/day;
//! tasks are bucketed by how many days remain until their due date.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::types::Date;

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// Default look-ahead for birthdays and anniversaries.
pub const DEFAULT_EVENT_WINDOW_DAYS: i64 = 30;

/// Largest look-ahead a client may request.
pub const MAX_EVENT_WINDOW_DAYS: i64 = 365;

/// Tasks due within this many days count as "upcoming".
pub const UPCOMING_TASK_WINDOW_DAYS: i64 = 7;

/// Clamp a requested event window to `1..=MAX_EVENT_WINDOW_DAYS`.
pub fn clamp_event_window(days: Option<i64>, default: i64) -> i64 {
    days.unwrap_or(default).clamp(1, MAX_EVENT_WINDOW_DAYS)
}

// ---------------------------------------------------------------------------
// Recurring dates
// ---------------------------------------------------------------------------

/// Whole days from `today` to `date`; negative when `date` is in the past.
pub fn days_until(date: Date, today: Date) -> i64 {
    (date - today).num_days()
}

/// `month`/`day` in `year`, with Feb 29 falling back to Feb 28 in
/// non-leap years.
fn on_or_near(year: i32, month: u32, day: u32) -> Option<Date> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month == 2 && day == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}

/// The next yearly recurrence of `event` falling on or after `today`.
pub fn next_occurrence(event: Date, today: Date) -> Option<Date> {
    let this_year = on_or_near(today.year(), event.month(), event.day())?;
    if this_year >= today {
        Some(this_year)
    } else {
        on_or_near(today.year() + 1, event.month(), event.day())
    }
}

/// Kind of a dashboard calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Birthday,
    Anniversary,
}

/// A birthday or anniversary that falls inside the look-ahead window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub kind: EventKind,
    pub date: Date,
    pub days_until: i64,
    /// Completed years of service (anniversaries only).
    pub years: Option<i32>,
}

/// The employee's next birthday if it is within `window_days` of `today`.
pub fn upcoming_birthday(birthday: Date, today: Date, window_days: i64) -> Option<Occurrence> {
    let date = next_occurrence(birthday, today)?;
    let days = days_until(date, today);
    (days <= window_days).then_some(Occurrence {
        kind: EventKind::Birthday,
        date,
        days_until: days,
        years: None,
    })
}

/// The employee's next work anniversary if it is within `window_days` of
/// `today` and marks at least one full year.
pub fn upcoming_anniversary(start_date: Date, today: Date, window_days: i64) -> Option<Occurrence> {
    let date = next_occurrence(start_date, today)?;
    let years = date.year() - start_date.year();
    if years < 1 {
        return None;
    }
    let days = days_until(date, today);
    (days <= window_days).then_some(Occurrence {
        kind: EventKind::Anniversary,
        date,
        days_until: days,
        years: Some(years),
    })
}

// ---------------------------------------------------------------------------
// Task urgency
// ---------------------------------------------------------------------------

/// Urgency bucket shown next to upcoming tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// Overdue or due within a day is high, within three days medium.
pub fn task_priority(days_until_due: i64) -> TaskPriority {
    match days_until_due {
        d if d <= 1 => TaskPriority::High,
        d if d <= 3 => TaskPriority::Medium,
        _ => TaskPriority::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_occurrence_later_this_year() {
        assert_eq!(
            next_occurrence(date(1990, 8, 15), date(2025, 8, 1)),
            Some(date(2025, 8, 15))
        );
    }

    #[test]
    fn next_occurrence_today_counts() {
        assert_eq!(
            next_occurrence(date(1990, 8, 1), date(2025, 8, 1)),
            Some(date(2025, 8, 1))
        );
    }

    #[test]
    fn next_occurrence_wraps_to_next_year() {
        assert_eq!(
            next_occurrence(date(1990, 1, 3), date(2025, 12, 20)),
            Some(date(2026, 1, 3))
        );
    }

    #[test]
    fn leap_day_falls_back_to_feb_28() {
        assert_eq!(
            next_occurrence(date(2000, 2, 29), date(2025, 2, 1)),
            Some(date(2025, 2, 28))
        );
        assert_eq!(
            next_occurrence(date(2000, 2, 29), date(2028, 2, 1)),
            Some(date(2028, 2, 29))
        );
    }

    #[test]
    fn birthday_outside_window_is_skipped() {
        let today = date(2025, 1, 1);
        assert!(upcoming_birthday(date(1990, 3, 1), today, 30).is_none());

        let hit = upcoming_birthday(date(1990, 1, 6), today, 30).unwrap();
        assert_eq!(hit.days_until, 5);
        assert_eq!(hit.kind, EventKind::Birthday);
    }

    #[test]
    fn anniversary_requires_a_full_year() {
        let today = date(2025, 5, 1);
        // Started earlier this year: next recurrence is 2026-04-10, far away.
        assert!(upcoming_anniversary(date(2025, 4, 10), today, 30).is_none());
        // Starts later this month: that is the start date, not an anniversary.
        assert!(upcoming_anniversary(date(2025, 5, 20), today, 30).is_none());

        let hit = upcoming_anniversary(date(2020, 5, 20), today, 30).unwrap();
        assert_eq!(hit.years, Some(5));
        assert_eq!(hit.days_until, 19);
    }

    #[test]
    fn priority_buckets() {
        assert_eq!(task_priority(-4), TaskPriority::High);
        assert_eq!(task_priority(1), TaskPriority::High);
        assert_eq!(task_priority(3), TaskPriority::Medium);
        assert_eq!(task_priority(6), TaskPriority::Low);
    }

    #[test]
    fn event_window_is_clamped() {
        assert_eq!(clamp_event_window(None, 30), 30);
        assert_eq!(clamp_event_window(Some(0), 30), 1);
        assert_eq!(clamp_event_window(Some(9999), 30), 365);
    }
}
