use chrono::{NaiveDateTime, NaiveTime};

/// Fixed set of event categories. Anything the planner cannot place in one of
/// the first four buckets lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Financial,
    Meal,
    Workout,
    Learning,
    Other,
}

impl Category {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "financial" => Some(Self::Financial),
            "meal" => Some(Self::Meal),
            "workout" => Some(Self::Workout),
            "learning" => Some(Self::Learning),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Meal => "meal",
            Self::Workout => "workout",
            Self::Learning => "learning",
            Self::Other => "other",
        }
    }

    /// Display color attached to calendar entries of this category.
    pub fn color(self) -> &'static str {
        match self {
            Self::Financial => "#4CAF50",
            Self::Meal => "#FF9800",
            Self::Workout => "#2196F3",
            Self::Learning => "#9C27B0",
            Self::Other => "#607D8B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// RFC 5545 numeric priority, 1 is most urgent.
    pub fn weight(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 5,
            Self::Low => 9,
        }
    }
}

/// A single normalized plan event. Every field is guaranteed valid once the
/// normalizer has run; invalid input is repaired to the defaults below.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub title: String,
    pub time: NaiveTime,
    pub duration_hours: f64,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
}

impl Event {
    /// Stand-in event used whenever a whole day plan is unusable.
    pub fn fallback() -> Self {
        Self {
            title: "Daily Planning".to_string(),
            time: default_time(),
            duration_hours: 1.0,
            description: "Review your daily goals and schedule".to_string(),
            category: Category::Other,
            priority: Priority::Medium,
        }
    }
}

pub fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

/// The events scheduled for one calendar date. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    events: Vec<Event>,
}

impl DayPlan {
    pub fn new(events: Vec<Event>) -> Self {
        if events.is_empty() {
            return Self::fallback();
        }
        Self { events }
    }

    pub fn fallback() -> Self {
        Self {
            events: vec![Event::fallback()],
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    // Always false: construction guarantees at least one event.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// An event bound to a concrete date, ready for ICS serialization.
/// Color and priority are best-effort decorations; the core fields stand on
/// their own without them.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub uid: String,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub category: Category,
    pub color: Option<&'static str>,
    pub priority: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_registry_maps_tags_and_colors() {
        assert_eq!(Category::parse("financial"), Some(Category::Financial));
        assert_eq!(Category::parse("Financial"), None);
        assert_eq!(Category::parse("unknown"), None);
        assert_eq!(Category::Financial.color(), "#4CAF50");
        assert_eq!(Category::Other.color(), "#607D8B");
        assert_eq!(Category::Meal.tag(), "meal");
    }

    #[test]
    fn priority_registry_maps_weights() {
        assert_eq!(Priority::High.weight(), 1);
        assert_eq!(Priority::Medium.weight(), 5);
        assert_eq!(Priority::Low.weight(), 9);
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn day_plan_never_empty() {
        let plan = DayPlan::new(Vec::new());
        assert_eq!(plan.len(), 1);
        assert!(!plan.is_empty());
        assert_eq!(plan.events()[0].title, "Daily Planning");
    }
}
