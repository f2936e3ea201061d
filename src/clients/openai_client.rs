use reqwest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

/// Drops a leading/trailing markdown code fence from a model reply so the
/// remainder can be fed to a JSON parser.
pub fn strip_code_fences(payload: &str) -> &str {
    let trimmed = payload.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

pub async fn generate_openai_prompt(
    prompt: &str,
    prompt_type: &str,
    api_key: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let full_prompt = match prompt_type {
        "budget" => format!(
            "You are a financial information parser. Parse the following user input and extract key financial information.\n\
             Return ONLY a valid JSON object with the following structure, no additional text:\n\
             {{\n\
                 \"starting_balance\": float,\n\
                 \"income\": {{\n\
                     \"amount\": float,\n\
                     \"frequency\": \"biweekly\" or \"monthly\",\n\
                     \"next_date\": \"YYYY-MM-DD\"\n\
                 }},\n\
                 \"bills\": [\n\
                     {{\n\
                         \"name\": string,\n\
                         \"amount\": float,\n\
                         \"due_date\": \"YYYY-MM-DD\",\n\
                         \"frequency\": \"monthly\" or \"biweekly\"\n\
                     }}\n\
                 ],\n\
                 \"savings_goal\": float,\n\
                 \"additional_income\": [\n\
                     {{\n\
                         \"source\": string,\n\
                         \"amount\": float,\n\
                         \"frequency\": \"monthly\" or \"biweekly\",\n\
                         \"next_date\": \"YYYY-MM-DD\"\n\
                     }}\n\
                 ]\n\
             }}\n\
             \n\
             User input: {user_prompt}",
            user_prompt = prompt
        ),
        "activities" => format!(
            "You are an activity goals parser. Parse the following user input and extract their goals and preferences.\n\
             Return ONLY a valid JSON object with the following structure, no additional text:\n\
             {{\n\
                 \"goals\": [\n\
                     {{\n\
                         \"type\": \"meal_planning\", \"workout\", \"learning\", \"hobby\", \"other\",\n\
                         \"frequency\": \"daily\", \"weekly\", \"specific_days\",\n\
                         \"days\": [\"monday\", \"tuesday\", etc.],\n\
                         \"details\": string,\n\
                         \"duration\": \"1h\", \"30m\", etc.,\n\
                         \"preferred_time\": \"morning\", \"afternoon\", or \"evening\"\n\
                     }}\n\
                 ],\n\
                 \"preferences\": {{\n\
                     \"meal_times\": [\"breakfast\", \"lunch\", \"dinner\"],\n\
                     \"workout_times\": [\"morning\", \"afternoon\", \"evening\"],\n\
                     \"other_preferences\": string\n\
                 }}\n\
             }}\n\
             \n\
             User input: {user_prompt}",
            user_prompt = prompt
        ),
        "daily_plan" => format!(
            "Generate a detailed daily plan based on the information below.\n\
             Format the response as a JSON object with the following structure:\n\
             {{\n\
                 \"events\": [\n\
                     {{\n\
                         \"title\": \"Event Title\",\n\
                         \"time\": \"HH:MM\",\n\
                         \"duration\": \"1h\" or \"30m\",\n\
                         \"description\": \"Detailed description with proper spacing and formatting\",\n\
                         \"category\": \"financial\", \"meal\", \"workout\", \"learning\", \"other\",\n\
                         \"priority\": \"high\", \"medium\", or \"low\"\n\
                     }}\n\
                 ]\n\
             }}\n\
             \n\
             {structured}\n\
             \n\
             Include events for:\n\
             1. Financial tasks and reminders (bills due, savings goals)\n\
             2. Activities and goals for the day\n\
             3. Meal planning if applicable\n\
             4. Workout plan if applicable\n\
             5. Learning activities if applicable\n\
             \n\
             Important:\n\
             - Use 24-hour format for time (e.g., \"14:30\")\n\
             - Keep descriptions clear and concise\n\
             - Ensure all events have valid times between 06:00 and 22:00\n\
             - Space events appropriately throughout the day\n\
             - Include specific details in descriptions",
            structured = prompt
        ),
        _ => return Err("Not a valid base prompt".to_string().into()),
    };

    query_openai(full_prompt, prompt_type, api_key).await
}

async fn query_openai(
    prompt: String,
    prompt_type: &str,
    api_key: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let system_message = match prompt_type {
        "budget" => {
            "You are a financial information parser. Return only valid JSON, no additional text. Make sure to include all required fields with appropriate default values if not provided."
        }
        "activities" => {
            "You are an activity goals parser. Return only valid JSON, no additional text."
        }
        "daily_plan" => {
            "You are a daily planner. Return only valid JSON with properly formatted event descriptions. Ensure all events have valid times and durations."
        }
        _ => "You are a helpful assistant.",
    };

    // The parsers should be deterministic, plan generation may vary.
    let temperature = if prompt_type == "daily_plan" { 0.7 } else { 0.3 };

    let request: OpenAIRequest = OpenAIRequest {
        model: "gpt-4o-mini".to_string(),
        messages: vec![
            OpenAIMessage {
                role: "system".to_string(),
                content: system_message.to_string(),
            },
            OpenAIMessage {
                role: "user".to_string(),
                content: prompt,
            },
        ],
        max_tokens: 1000,
        temperature,
    };

    let client = reqwest::Client::new();
    let response = client
        .post("https://api.openai.com/v1/chat/completions")
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        println!("Error {}: {}", status, text);
        return Err(format!("Request failed with status {}", status).into());
    }

    let parsed: OpenAIResponse = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse JSON: {}\nRaw body: {}", e, text))?;

    if let Some(choice) = parsed.choices.first() {
        Ok(choice.message.content.clone())
    } else {
        println!("No choices found in response.\nRaw body:\n{}", text);
        Err("No response from OpenAI".to_string().into())
    }
}
