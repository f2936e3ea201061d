use crate::clients::openai_client::strip_code_fences;
use crate::models::activity::ActivityGoals;
use crate::models::budget::BudgetInfo;
use crate::service::openai_service::OpenAIClient;

/// Turns a free-text description of the user's finances into a structured
/// budget record. Missing fields in the model reply are backfilled with
/// defaults by the serde shapes; an unusable reply is a caller-visible error.
pub async fn parse_budget<C: OpenAIClient + ?Sized>(
    openai: &C,
    input: &str,
) -> Result<BudgetInfo, String> {
    let payload = openai
        .generate_prompt(input, "budget")
        .await
        .map_err(|e| format!("OpenAI request failed: {}", e))?;
    serde_json::from_str(strip_code_fences(&payload))
        .map_err(|e| format!("Failed to parse budget payload: {}", e))
}

/// Same contract as `parse_budget`, for activity goals and preferences.
pub async fn parse_activities<C: OpenAIClient + ?Sized>(
    openai: &C,
    input: &str,
) -> Result<ActivityGoals, String> {
    let payload = openai
        .generate_prompt(input, "activities")
        .await
        .map_err(|e| format!("OpenAI request failed: {}", e))?;
    serde_json::from_str(strip_code_fences(&payload))
        .map_err(|e| format!("Failed to parse activity payload: {}", e))
}
