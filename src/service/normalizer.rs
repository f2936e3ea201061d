use chrono::NaiveTime;
use serde_json::Value;

use crate::models::event::{default_time, Category, DayPlan, Event, Priority};

/// A field the normalizer had to reset to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    /// The whole record was unusable and the fallback plan was substituted.
    FallbackPlan,
    /// One field of one event was repaired.
    Field { event: usize, field: RepairedField },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairedField {
    Title,
    Time,
    Duration,
    Description,
    Category,
    Priority,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlan {
    pub plan: DayPlan,
    pub repairs: Vec<Repair>,
}

/// Repairs an untrusted day-plan record into a valid `DayPlan`. Total: any
/// input, including garbage, yields a plan with at least one event. Field
/// repairs are independent of each other and reported in `repairs`.
pub fn normalize(raw: &Value) -> NormalizedPlan {
    let events = match raw.get("events").and_then(Value::as_array) {
        Some(events) if !events.is_empty() => events,
        _ => {
            return NormalizedPlan {
                plan: DayPlan::fallback(),
                repairs: vec![Repair::FallbackPlan],
            };
        }
    };

    let mut repairs = Vec::new();
    let normalized = events
        .iter()
        .enumerate()
        .map(|(idx, raw_event)| normalize_event(raw_event, idx, &mut repairs))
        .collect();

    NormalizedPlan {
        plan: DayPlan::new(normalized),
        repairs,
    }
}

fn normalize_event(raw: &Value, idx: usize, repairs: &mut Vec<Repair>) -> Event {
    let mut repaired = |field| {
        repairs.push(Repair::Field { event: idx, field });
    };

    let title = match raw.get("title").and_then(Value::as_str) {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => {
            repaired(RepairedField::Title);
            "Untitled Event".to_string()
        }
    };

    let time = match raw.get("time").and_then(Value::as_str).and_then(parse_time) {
        Some(time) => time,
        None => {
            repaired(RepairedField::Time);
            default_time()
        }
    };

    let duration_hours = match raw.get("duration").and_then(parse_duration) {
        Some(hours) => hours,
        None => {
            repaired(RepairedField::Duration);
            1.0
        }
    };

    let description = match raw.get("description").and_then(Value::as_str) {
        Some(description) => description.to_string(),
        None => {
            repaired(RepairedField::Description);
            String::new()
        }
    };

    let category = match raw
        .get("category")
        .and_then(Value::as_str)
        .and_then(Category::parse)
    {
        Some(category) => category,
        None => {
            repaired(RepairedField::Category);
            Category::Other
        }
    };

    let priority = match raw
        .get("priority")
        .and_then(Value::as_str)
        .and_then(Priority::parse)
    {
        Some(priority) => priority,
        None => {
            repaired(RepairedField::Priority);
            Priority::Medium
        }
    };

    Event {
        title,
        time,
        duration_hours,
        description,
        category,
        priority,
    }
}

// "H:M" with both parts integral, hour 0-23, minute 0-59. Anything else is a
// full reset, never a partial accept.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    let (hour, minute) = raw.split_once(':')?;
    let hour = hour.trim().parse::<u32>().ok()?;
    let minute = minute.trim().parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

// An event cannot outlast its day; anything longer is treated as
// unparseable so the arithmetic downstream stays in range.
const MAX_EVENT_HOURS: f64 = 24.0;

// "<number>h" or "<number>m", and the result must be a positive number of
// hours, at most `MAX_EVENT_HOURS`.
fn parse_duration(raw: &Value) -> Option<f64> {
    let raw = raw.as_str()?;
    let hours = if let Some(prefix) = raw.strip_suffix('h') {
        prefix.trim().parse::<f64>().ok()?
    } else if let Some(prefix) = raw.strip_suffix('m') {
        prefix.trim().parse::<f64>().ok()? / 60.0
    } else {
        return None;
    };

    (hours.is_finite() && hours > 0.0 && hours <= MAX_EVENT_HOURS).then_some(hours)
}
