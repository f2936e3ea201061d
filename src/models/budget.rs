use chrono::Local;
use serde::{Deserialize, Serialize};

// Shapes mirror what the budget-parser prompt asks the model to return.
// Every field defaults so a partial reply still deserializes.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetInfo {
    #[serde(default)]
    pub starting_balance: f64,
    #[serde(default)]
    pub income: Income,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub savings_goal: f64,
    #[serde(default)]
    pub additional_income: Vec<AdditionalIncome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    #[serde(default = "default_next_date")]
    pub next_date: String,
}

impl Default for Income {
    fn default() -> Self {
        Self {
            amount: 0.0,
            frequency: default_frequency(),
            next_date: default_next_date(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub due_date: String,
    #[serde(default = "default_frequency")]
    pub frequency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalIncome {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    #[serde(default)]
    pub next_date: String,
}

fn default_frequency() -> String {
    "monthly".to_string()
}

fn default_next_date() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
