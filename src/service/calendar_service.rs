use std::fs;
use std::path::Path;

use ics::components::Property;
use ics::properties::{Categories, Description, DtEnd, DtStart, Priority, Summary};
use ics::{escape_text, ICalendar};

use crate::models::event::CalendarEntry;

const PRODID: &str = "-//Enhanced Life & Budget Planner//EN";

/// Ordered, append-only collection of calendar entries for one planning run.
/// One instance per request; entries are immutable once added.
#[derive(Debug, Default)]
pub struct Calendar {
    entries: Vec<CalendarEntry>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: CalendarEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CalendarEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn to_ics(&self) -> ICalendar<'_> {
        let mut calendar = ICalendar::new("2.0", PRODID);
        for entry in &self.entries {
            calendar.add_event(entry_to_ics(entry));
        }
        calendar
    }

    /// Renders the whole calendar as an RFC 5545 byte stream, one VEVENT per
    /// entry in insertion order. Pure function of the entries, so repeated
    /// calls produce identical output.
    pub fn serialize(&self) -> String {
        self.to_ics().to_string()
    }

    /// Writes the artifact, replacing any previous one at `path`.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
            }
        }
        fs::write(path, self.serialize())
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}

fn entry_to_ics(entry: &CalendarEntry) -> ics::Event<'_> {
    let start = entry.start.format("%Y%m%dT%H%M%S").to_string();
    let end = entry.end.format("%Y%m%dT%H%M%S").to_string();

    let mut event = ics::Event::new(entry.uid.as_str(), start.clone());
    event.push(DtStart::new(start));
    event.push(DtEnd::new(end));
    event.push(Summary::new(escape_text(entry.title.as_str())));
    event.push(Description::new(escape_text(entry.description.as_str())));
    event.push(Categories::new(entry.category.tag()));

    if let Some(color) = entry.color {
        event.push(Property::new("COLOR", color));
    }
    if let Some(priority) = entry.priority {
        event.push(Priority::new(priority.to_string()));
    }

    event
}
