use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use lifePlanner::handlers::api::{self, ApiState};
use lifePlanner::service::openai_service::OpenAIClient;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use warp::Filter;
use warp::http::StatusCode;

struct FakeOpenAI {
    response: Result<String, String>,
}

#[async_trait]
impl OpenAIClient for FakeOpenAI {
    async fn generate_prompt(
        &self,
        _prompt: &str,
        _prompt_type: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(err) => Err(err.clone().into()),
        }
    }
}

fn state_with(response: Result<String, String>, calendar_path: PathBuf) -> Arc<ApiState> {
    Arc::new(ApiState {
        openai: Arc::new(FakeOpenAI { response }),
        calendar_path,
        write_lock: Mutex::new(()),
    })
}

fn missing_artifact_path(test_name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("lifeplanner_api_{}_{}", test_name, std::process::id()))
        .join("calendar.ics")
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn empty_budget_input_is_a_structured_failure() {
    let state = state_with(Ok("{}".to_string()), missing_artifact_path("empty_budget"));
    let routes = api::routes(state).recover(api::handle_rejection);

    let resp = warp::test::request()
        .method("POST")
        .path("/api/parse_budget")
        .json(&json!({"input": "   "}))
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp.body());
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No input provided");
}

#[tokio::test]
async fn parsed_budget_is_returned_on_success() {
    let state = state_with(
        Ok(r#"{"starting_balance": 1500.0}"#.to_string()),
        missing_artifact_path("budget_ok"),
    );
    let routes = api::routes(state).recover(api::handle_rejection);

    let resp = warp::test::request()
        .method("POST")
        .path("/api/parse_budget")
        .json(&json!({"input": "I have $1500 in my account"}))
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp.body());
    assert_eq!(body["success"], true);
    assert_eq!(body["budget_info"]["starting_balance"], 1500.0);
    assert_eq!(body["budget_info"]["income"]["frequency"], "monthly");
}

#[tokio::test]
async fn reversed_range_is_a_structured_failure() {
    let state = state_with(Ok("{}".to_string()), missing_artifact_path("bad_range"));
    let routes = api::routes(state).recover(api::handle_rejection);

    let resp = warp::test::request()
        .method("POST")
        .path("/api/generate_plan")
        .json(&json!({
            "start_date": "2024-03-03",
            "end_date": "2024-03-01",
            "budget_info": {},
            "activity_goals": {}
        }))
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp.body());
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "End date is before start date");
}

#[tokio::test]
async fn generate_plan_writes_the_artifact() {
    let path = missing_artifact_path("plan_ok");
    let state = state_with(
        Ok(r#"{"events": [{"title": "Pay rent", "time": "14:30", "duration": "30m", "description": "", "category": "financial", "priority": "high"}]}"#.to_string()),
        path.clone(),
    );
    let routes = api::routes(state).recover(api::handle_rejection);

    let resp = warp::test::request()
        .method("POST")
        .path("/api/generate_plan")
        .json(&json!({
            "start_date": "2024-03-01",
            "end_date": "2024-03-01",
            "budget_info": {},
            "activity_goals": {}
        }))
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp.body())["success"], true);

    let artifact = std::fs::read_to_string(&path).unwrap();
    assert!(artifact.contains("SUMMARY:Pay rent"));

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[tokio::test]
async fn missing_artifact_downloads_as_not_found() {
    let state = state_with(Ok("{}".to_string()), missing_artifact_path("no_artifact"));
    let routes = api::routes(state).recover(api::handle_rejection);

    let resp = warp::test::request()
        .method("GET")
        .path("/static/calendar.ics")
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp.body())["success"], false);
}

#[tokio::test]
async fn artifact_downloads_as_text_calendar() {
    let path = missing_artifact_path("download_ok");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();

    let state = state_with(Ok("{}".to_string()), path.clone());
    let routes = api::routes(state).recover(api::handle_rejection);

    let resp = warp::test::request()
        .method("GET")
        .path("/static/calendar.ics")
        .reply(&routes)
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["Content-Type"], "text/calendar");
    assert!(
        String::from_utf8(resp.body().to_vec())
            .unwrap()
            .contains("BEGIN:VCALENDAR")
    );

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}
