use chrono::{Duration, NaiveDate};

use crate::models::event::{CalendarEntry, Event};

/// Binds a normalized event to a concrete date. Deterministic: the same event
/// and date always produce the same entry, including its uid.
pub fn materialize(event: &Event, date: NaiveDate) -> CalendarEntry {
    let start = date.and_time(event.time);
    let end = start + Duration::seconds((event.duration_hours * 3600.0).round() as i64);
    let uid = format!(
        "{}_{}",
        start.format("%Y%m%dT%H%M%S"),
        event.title.replace(' ', "-")
    );

    CalendarEntry {
        uid,
        title: event.title.clone(),
        description: event.description.clone(),
        start,
        end,
        category: event.category,
        color: Some(event.category.color()),
        priority: Some(event.priority.weight()),
    }
}
