use serde::{Deserialize, Serialize};

// Shapes mirror the activity-goals prompt. Like the budget shapes, everything
// defaults so the parser tolerates partial replies.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityGoals {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub preferred_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub meal_times: Vec<String>,
    #[serde(default)]
    pub workout_times: Vec<String>,
    #[serde(default)]
    pub other_preferences: String,
}
