use std::sync::Mutex;

use async_trait::async_trait;
use lifePlanner::service::openai_service::OpenAIClient;
use lifePlanner::service::parser_service::{parse_activities, parse_budget};

struct FakeOpenAI {
    response: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeOpenAI {
    fn new(response: Result<String, String>) -> Self {
        Self {
            response,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl OpenAIClient for FakeOpenAI {
    async fn generate_prompt(
        &self,
        prompt: &str,
        prompt_type: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.prompts
            .lock()
            .unwrap()
            .push(format!("{}:{}", prompt_type, prompt));
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(err) => Err(err.clone().into()),
        }
    }
}

#[tokio::test]
async fn fenced_budget_payload_is_parsed_and_backfilled() {
    let fake = FakeOpenAI::new(Ok(
        "```json\n{\"starting_balance\": 1500.0, \"bills\": [{\"name\": \"Rent\", \"amount\": 1200.0, \"due_date\": \"2024-03-01\", \"frequency\": \"monthly\"}]}\n```".to_string(),
    ));

    let budget = parse_budget(&fake, "I have $1500 and rent is $1200 on the 1st")
        .await
        .unwrap();

    assert_eq!(budget.starting_balance, 1500.0);
    assert_eq!(budget.bills.len(), 1);
    assert_eq!(budget.bills[0].name, "Rent");
    // backfilled defaults
    assert_eq!(budget.income.amount, 0.0);
    assert_eq!(budget.savings_goal, 0.0);
    assert!(budget.additional_income.is_empty());

    let prompts = fake.prompts.lock().unwrap();
    assert!(prompts[0].starts_with("budget:"));
}

#[tokio::test]
async fn unparseable_budget_payload_is_an_error() {
    let fake = FakeOpenAI::new(Ok("sorry, I cannot help with that".to_string()));
    let result = parse_budget(&fake, "whatever").await;
    assert!(result.unwrap_err().contains("Failed to parse budget payload"));
}

#[tokio::test]
async fn client_failure_surfaces_as_error() {
    let fake = FakeOpenAI::new(Err("rate limited".to_string()));
    let result = parse_activities(&fake, "run every morning").await;
    assert!(result.unwrap_err().contains("OpenAI request failed"));
}

#[tokio::test]
async fn activity_payload_maps_type_field() {
    let fake = FakeOpenAI::new(Ok(
        r#"{"goals": [{"type": "workout", "frequency": "daily", "days": [], "details": "morning run", "duration": "30m", "preferred_time": "morning"}], "preferences": {"meal_times": ["breakfast"], "workout_times": ["morning"], "other_preferences": ""}}"#
            .to_string(),
    ));

    let goals = parse_activities(&fake, "I want to run every morning")
        .await
        .unwrap();

    assert_eq!(goals.goals.len(), 1);
    assert_eq!(goals.goals[0].kind, "workout");
    assert_eq!(goals.goals[0].duration, "30m");
    assert_eq!(goals.preferences.meal_times, vec!["breakfast"]);

    let prompts = fake.prompts.lock().unwrap();
    assert!(prompts[0].starts_with("activities:"));
}
