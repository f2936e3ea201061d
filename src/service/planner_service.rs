use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::clients::openai_client::strip_code_fences;
use crate::models::activity::ActivityGoals;
use crate::models::budget::BudgetInfo;
use crate::service::calendar_service::Calendar;
use crate::service::materializer::materialize;
use crate::service::normalizer::normalize;
use crate::service::openai_service::OpenAIClient;

/// Inclusive span cap for one planning run (6 months).
pub const MAX_PLAN_DAYS: i64 = 180;

/// Collaborator that proposes a raw, untrusted day-plan record for one date.
#[async_trait]
pub trait DayPlanSource: Send + Sync {
    async fn propose_day_plan(
        &self,
        date: NaiveDate,
        budget: &BudgetInfo,
        goals: &ActivityGoals,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>>;
}

pub struct OpenAIPlanSource {
    openai: Arc<dyn OpenAIClient>,
}

impl OpenAIPlanSource {
    pub fn new(openai: Arc<dyn OpenAIClient>) -> Self {
        Self { openai }
    }
}

#[async_trait]
impl DayPlanSource for OpenAIPlanSource {
    async fn propose_day_plan(
        &self,
        date: NaiveDate,
        budget: &BudgetInfo,
        goals: &ActivityGoals,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let structured = format!(
            "Date: {}\n\nBudget Information:\n{}\n\nActivity Goals:\n{}",
            date.format("%Y-%m-%d"),
            serde_json::to_string_pretty(budget)?,
            serde_json::to_string_pretty(goals)?,
        );
        let payload = self.openai.generate_prompt(&structured, "daily_plan").await?;
        let raw = serde_json::from_str(strip_code_fences(&payload))?;
        Ok(raw)
    }
}

/// Builds a calendar for the inclusive date range. Invalid ranges are
/// rejected up front; after that the run is best-effort, and a day whose
/// collaborator call fails outright gets the fallback plan instead of
/// aborting the range. Each day contributes at least one entry.
pub async fn plan_range<S: DayPlanSource + ?Sized>(
    source: &S,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: &BudgetInfo,
    goals: &ActivityGoals,
) -> Result<Calendar, String> {
    if end_date < start_date {
        return Err("End date is before start date".to_string());
    }
    let span_days = (end_date - start_date).num_days() + 1;
    if span_days > MAX_PLAN_DAYS {
        return Err(format!(
            "Date range spans {} days, maximum is {}",
            span_days, MAX_PLAN_DAYS
        ));
    }

    let mut calendar = Calendar::new();
    let mut date = start_date;
    while date <= end_date {
        let raw = match source.propose_day_plan(date, budget, goals).await {
            Ok(raw) => raw,
            Err(err) => {
                println!("Plan generation failed for {}: {}. Using fallback plan", date, err);
                Value::Null
            }
        };

        let normalized = normalize(&raw);
        if !normalized.repairs.is_empty() {
            println!("Repaired plan for {}: {:?}", date, normalized.repairs);
        }
        for event in normalized.plan.events() {
            calendar.append(materialize(event, date));
        }

        date += Duration::days(1);
    }

    Ok(calendar)
}
