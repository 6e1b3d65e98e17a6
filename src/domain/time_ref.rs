//! Time reference parsing and resolution

use crate::error::{Result, TextnoteError};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::Regex;
use std::sync::OnceLock;

fn relative_days_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(?:(\d+) days? ago|in (\d+) days?)$").unwrap())
}

/// A day expressed relative to "today" or as a fixed date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeReference {
    /// Today plus a signed number of days (yesterday is -1)
    Offset(i64),
    /// Most recent occurrence of a weekday, today included
    Weekday(Weekday),
    /// Occurrence of a weekday strictly before today
    LastWeekday(Weekday),
    /// Specific date
    Date(NaiveDate),
}

impl TimeReference {
    /// Parse a time reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();
        let invalid = || TextnoteError::InvalidTimeReference(input.to_string());

        match normalized.as_str() {
            "today" | "now" => return Ok(TimeReference::Offset(0)),
            "yesterday" => return Ok(TimeReference::Offset(-1)),
            "tomorrow" => return Ok(TimeReference::Offset(1)),
            _ => {}
        }

        if let Some(day) = parse_weekday(&normalized) {
            return Ok(TimeReference::Weekday(day));
        }
        if let Some(rest) = normalized.strip_prefix("last ") {
            return parse_weekday(rest.trim())
                .map(TimeReference::LastWeekday)
                .ok_or_else(invalid);
        }
        if let Some(caps) = relative_days_regex().captures(&normalized) {
            let (digits, sign) = match (caps.get(1), caps.get(2)) {
                (Some(ago), _) => (ago.as_str(), -1),
                (None, Some(ahead)) => (ahead.as_str(), 1),
                (None, None) => return Err(invalid()),
            };
            let days: i64 = digits.parse().map_err(|_| invalid())?;
            return Ok(TimeReference::Offset(sign * days));
        }

        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .map(TimeReference::Date)
            .map_err(|_| invalid())
    }

    /// Resolve this time reference against `today`.
    ///
    /// Fails when the resulting day is outside the range chrono can represent.
    pub fn resolve(&self, today: NaiveDate) -> Result<NaiveDate> {
        let resolved = match *self {
            TimeReference::Offset(days) if days >= 0 => {
                today.checked_add_days(Days::new(days.unsigned_abs()))
            }
            TimeReference::Offset(days) => today.checked_sub_days(Days::new(days.unsigned_abs())),
            TimeReference::Weekday(day) => {
                today.checked_sub_days(Days::new(days_since(today, day)))
            }
            TimeReference::LastWeekday(day) => {
                let back = match days_since(today, day) {
                    0 => 7,
                    n => n,
                };
                today.checked_sub_days(Days::new(back))
            }
            TimeReference::Date(date) => Some(date),
        };
        resolved.ok_or_else(|| {
            TextnoteError::InvalidTimeReference(format!("out of range relative to {}", today))
        })
    }
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    let day = match name {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

/// Days between the most recent `day` (today included) and `today`
fn days_since(today: NaiveDate, day: Weekday) -> u64 {
    let diff = today.weekday().num_days_from_monday() as i64 - day.num_days_from_monday() as i64;
    diff.rem_euclid(7) as u64
}
