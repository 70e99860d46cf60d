//! Date and time extraction.
//!
//! Supported expressions:
//! - Relative offsets: "in 10 minutes", "in an hour", "in 3 days", "in 2 weeks"
//! - Day words: "today", "tonight", "tomorrow", "friday", "next friday"
//! - Clock times: "at 5", "5pm", "7:30 am", "17:30", "noon", "midnight"
//!
//! Everything resolves against a reference time. A clock time without a day
//! that has already passed on the reference day moves to the next day.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use regex::Regex;
use serde::Serialize;

use crate::extraction::Extraction;
use crate::extraction::number::{number_alternation, parse_number};

/// Evening hour assumed for "tonight" without a clock time.
const TONIGHT_HOUR: u32 = 20;

static RELATIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bin\s+(?P<amount>an?|{})\s+(?P<unit>seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?)\b",
        number_alternation()
    ))
    .expect("Invalid regex")
});

static DAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<day>today|tonight|tomorrow|(?P<next>next\s+)?(?P<weekday>monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b",
    )
    .expect("Invalid regex")
});

static CLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?P<hour>\d{1,2}):(?P<minute>\d{2})\s*(?P<meridiem>am|pm)?\b")
        .expect("Invalid regex")
});

static MERIDIEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?P<hour>\d{1,2})\s*(?P<meridiem>am|pm)\b").expect("Invalid regex")
});

static AT_HOUR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bat\s+(?P<hour>\d{1,2})\b").expect("Invalid regex"));

static NAMED_TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?P<name>noon|midnight)\b").expect("Invalid regex"));

/// Whether the value carries a clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Date,
    DateTime,
}

/// The `datetime` entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateTimeEntity {
    /// The matched words, as they appear in the command.
    pub expression: String,
    /// ISO-8601 date or datetime.
    pub value: String,
    pub granularity: Granularity,
    #[serde(skip)]
    pub resolved: NaiveDateTime,
}

impl DateTimeEntity {
    fn new(expression: &str, resolved: NaiveDateTime, granularity: Granularity) -> Self {
        let value = match granularity {
            Granularity::Date => resolved.date().format("%Y-%m-%d").to_string(),
            Granularity::DateTime => resolved.format("%Y-%m-%dT%H:%M:%S").to_string(),
        };
        Self {
            expression: expression.to_string(),
            value,
            granularity,
            resolved,
        }
    }
}

/// A clock time found in text, with the byte span it came from.
struct ClockMatch {
    time: NaiveTime,
    start: usize,
    end: usize,
    /// True when the hour was given without am/pm.
    bare_hour: bool,
}

/// Extract the first date/time expression, resolved against `reference`.
pub fn extract_datetime(text: &str, reference: NaiveDateTime) -> Extraction<DateTimeEntity> {
    if let Some(caps) = RELATIVE_PATTERN.captures(text) {
        return resolve_relative(&caps, reference);
    }

    let day = DAY_PATTERN.captures(text);
    let clock = match find_clock(text) {
        Ok(clock) => clock,
        Err(reason) => return Extraction::Failed(reason),
    };

    let (date, day_span, tonight) = match &day {
        Some(caps) => {
            let Some(whole) = caps.get(0) else {
                return Extraction::Missing;
            };
            let word = caps.name("day").map_or("", |m| m.as_str()).to_lowercase();
            let date = match caps.name("weekday") {
                Some(weekday) => {
                    let Ok(weekday) = weekday.as_str().parse::<Weekday>() else {
                        return Extraction::failed(format!("unknown weekday {:?}", weekday.as_str()));
                    };
                    upcoming(reference.date(), weekday, caps.name("next").is_some())
                }
                None if word == "tomorrow" => reference.date() + Duration::days(1),
                None => reference.date(),
            };
            (Some(date), Some((whole.start(), whole.end())), word == "tonight")
        }
        None => (None, None, false),
    };

    let spans = [day_span, clock.as_ref().map(|c| (c.start, c.end))];
    let start = spans.iter().flatten().map(|(s, _)| *s).min();
    let end = spans.iter().flatten().map(|(_, e)| *e).max();
    let expression = match (start, end) {
        (Some(start), Some(end)) => text.get(start..end).unwrap_or_default().trim(),
        _ => return Extraction::Missing,
    };

    match (date, clock) {
        (Some(date), Some(clock)) => {
            let mut time = clock.time;
            // "tonight at 8" means 20:00.
            if tonight && clock.bare_hour && time.hour() < 12 {
                time += Duration::hours(12);
            }
            Extraction::Found(DateTimeEntity::new(
                expression,
                date.and_time(time),
                Granularity::DateTime,
            ))
        }
        (Some(date), None) if tonight => match date.and_hms_opt(TONIGHT_HOUR, 0, 0) {
            Some(resolved) => {
                Extraction::Found(DateTimeEntity::new(expression, resolved, Granularity::DateTime))
            }
            None => Extraction::failed("invalid evening time"),
        },
        (Some(date), None) => {
            let resolved = date.and_time(NaiveTime::MIN);
            Extraction::Found(DateTimeEntity::new(expression, resolved, Granularity::Date))
        }
        (None, Some(clock)) => {
            let mut resolved = reference.date().and_time(clock.time);
            if resolved < reference {
                resolved += Duration::days(1);
            }
            Extraction::Found(DateTimeEntity::new(expression, resolved, Granularity::DateTime))
        }
        (None, None) => Extraction::Missing,
    }
}

fn resolve_relative(caps: &regex::Captures<'_>, reference: NaiveDateTime) -> Extraction<DateTimeEntity> {
    let (Some(whole), Some(amount), Some(unit)) = (caps.get(0), caps.name("amount"), caps.name("unit"))
    else {
        return Extraction::Missing;
    };

    let amount_text = amount.as_str().to_lowercase();
    let amount = if amount_text == "a" || amount_text == "an" {
        1.0
    } else {
        match parse_number(&amount_text) {
            Some(amount) => amount,
            None => return Extraction::failed(format!("unreadable amount {amount_text:?}")),
        }
    };

    let unit = unit.as_str().to_lowercase();
    let (seconds_per_unit, granularity) = match unit.trim_end_matches('s') {
        "sec" | "second" => (1.0, Granularity::DateTime),
        "min" | "minute" => (60.0, Granularity::DateTime),
        "hr" | "hour" => (3_600.0, Granularity::DateTime),
        "day" => (86_400.0, Granularity::Date),
        "week" => (604_800.0, Granularity::Date),
        other => return Extraction::failed(format!("unsupported unit {other:?}")),
    };

    let seconds = amount * seconds_per_unit;
    if !seconds.is_finite() || seconds > i32::MAX as f64 {
        return Extraction::failed(format!("offset out of range: {}", whole.as_str()));
    }

    let resolved = reference + Duration::seconds(seconds.round() as i64);
    Extraction::Found(DateTimeEntity::new(whole.as_str().trim(), resolved, granularity))
}

/// Find the first clock time. Malformed clock values are an error.
fn find_clock(text: &str) -> std::result::Result<Option<ClockMatch>, String> {
    if let Some(caps) = CLOCK_PATTERN.captures(text) {
        let whole = caps.get(0).ok_or("empty clock match")?;
        let hour = parse_component(caps.name("hour"))?;
        let minute = parse_component(caps.name("minute"))?;
        let hour = match caps.name("meridiem") {
            Some(meridiem) => to_24_hour(hour, meridiem.as_str())?,
            None => hour,
        };
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| format!("invalid clock time {:?}", whole.as_str()))?;
        return Ok(Some(ClockMatch {
            time,
            start: whole.start(),
            end: whole.end(),
            bare_hour: false,
        }));
    }

    if let Some(caps) = MERIDIEM_PATTERN.captures(text) {
        let whole = caps.get(0).ok_or("empty clock match")?;
        let hour = parse_component(caps.name("hour"))?;
        let meridiem = caps.name("meridiem").map_or("", |m| m.as_str());
        let hour = to_24_hour(hour, meridiem)?;
        let time = NaiveTime::from_hms_opt(hour, 0, 0)
            .ok_or_else(|| format!("invalid clock time {:?}", whole.as_str()))?;
        return Ok(Some(ClockMatch {
            time,
            start: whole.start(),
            end: whole.end(),
            bare_hour: false,
        }));
    }

    if let Some(caps) = NAMED_TIME_PATTERN.captures(text) {
        let whole = caps.get(0).ok_or("empty clock match")?;
        let hour = if whole.as_str().eq_ignore_ascii_case("noon") {
            12
        } else {
            0
        };
        let time = NaiveTime::from_hms_opt(hour, 0, 0).ok_or("invalid named time")?;
        return Ok(Some(ClockMatch {
            time,
            start: whole.start(),
            end: whole.end(),
            bare_hour: false,
        }));
    }

    if let Some(caps) = AT_HOUR_PATTERN.captures(text) {
        let whole = caps.get(0).ok_or("empty clock match")?;
        let hour = parse_component(caps.name("hour"))?;
        let time = NaiveTime::from_hms_opt(hour, 0, 0)
            .ok_or_else(|| format!("invalid hour {hour}"))?;
        return Ok(Some(ClockMatch {
            time,
            start: whole.start(),
            end: whole.end(),
            bare_hour: true,
        }));
    }

    Ok(None)
}

fn parse_component(m: Option<regex::Match<'_>>) -> std::result::Result<u32, String> {
    let m = m.ok_or("missing clock component")?;
    m.as_str()
        .parse()
        .map_err(|e| format!("invalid clock component {:?}: {e}", m.as_str()))
}

fn to_24_hour(hour: u32, meridiem: &str) -> std::result::Result<u32, String> {
    if !(1..=12).contains(&hour) {
        return Err(format!("invalid 12-hour clock value {hour}{meridiem}"));
    }
    let pm = meridiem.eq_ignore_ascii_case("pm");
    Ok(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (hour, true) => hour + 12,
        (hour, false) => hour,
    })
}

/// The next date strictly after `from` that falls on `weekday`, pushed one
/// more week out for "next".
fn upcoming(from: NaiveDate, weekday: Weekday, next: bool) -> NaiveDate {
    let current = from.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut days = (target - current).rem_euclid(7);
    if days == 0 {
        days = 7;
    }
    if next {
        days += 7;
    }
    from + Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Friday 2025-03-14, 09:00.
    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn value(text: &str) -> String {
        extract_datetime(text, reference()).found().unwrap().value
    }

    #[test]
    fn test_relative_offsets() {
        assert_eq!(value("remind me in 10 minutes"), "2025-03-14T09:10:00");
        assert_eq!(value("ping me in an hour"), "2025-03-14T10:00:00");
        assert_eq!(value("in two hours"), "2025-03-14T11:00:00");
        assert_eq!(value("in 3 days"), "2025-03-17");
        assert_eq!(value("in 1 week"), "2025-03-21");
    }

    #[test]
    fn test_day_words() {
        assert_eq!(value("today"), "2025-03-14");
        assert_eq!(value("call mom tomorrow"), "2025-03-15");
        assert_eq!(value("tonight"), "2025-03-14T20:00:00");
        let entity = extract_datetime("tomorrow", reference()).found().unwrap();
        assert_eq!(entity.granularity, Granularity::Date);
    }

    #[test]
    fn test_weekdays() {
        // Reference is a Friday.
        assert_eq!(value("on monday"), "2025-03-17");
        assert_eq!(value("on friday"), "2025-03-21");
        assert_eq!(value("next monday"), "2025-03-24");
    }

    #[test]
    fn test_clock_times() {
        assert_eq!(value("at 17:30"), "2025-03-14T17:30:00");
        assert_eq!(value("at 5pm"), "2025-03-14T17:00:00");
        assert_eq!(value("7:15 am tomorrow"), "2025-03-15T07:15:00");
        assert_eq!(value("at noon"), "2025-03-14T12:00:00");
        assert_eq!(value("12am"), "2025-03-15T00:00:00");
    }

    #[test]
    fn test_past_time_rolls_to_tomorrow() {
        assert_eq!(value("at 8"), "2025-03-15T08:00:00");
        assert_eq!(value("at midnight"), "2025-03-15T00:00:00");
        // With an explicit day there is no rollover.
        assert_eq!(value("today at 8"), "2025-03-14T08:00:00");
    }

    #[test]
    fn test_tonight_bare_hour_is_evening() {
        assert_eq!(value("tonight at 8"), "2025-03-14T20:00:00");
        assert_eq!(value("tonight at 8am"), "2025-03-14T08:00:00");
    }

    #[test]
    fn test_expression_spans_day_and_time() {
        let entity = extract_datetime("remind me tomorrow at 5pm to stretch", reference())
            .found()
            .unwrap();
        assert_eq!(entity.expression, "tomorrow at 5pm");
        assert_eq!(entity.value, "2025-03-15T17:00:00");
    }

    #[test]
    fn test_invalid_clock_values_fail() {
        assert!(matches!(
            extract_datetime("at 25:00", reference()),
            Extraction::Failed(_)
        ));
        assert!(matches!(
            extract_datetime("at 13pm", reference()),
            Extraction::Failed(_)
        ));
        assert!(matches!(
            extract_datetime("at 99", reference()),
            Extraction::Failed(_)
        ));
    }

    #[test]
    fn test_no_datetime() {
        assert_eq!(
            extract_datetime("take a note about the meeting", reference()),
            Extraction::Missing
        );
    }

    #[test]
    fn test_serialization_skips_resolved() {
        let entity = extract_datetime("tomorrow", reference()).found().unwrap();
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["granularity"], "date");
        assert_eq!(json["expression"], "tomorrow");
        assert!(json.get("resolved").is_none());
    }
}
