use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::models::activity::ActivityGoals;
use crate::models::budget::BudgetInfo;
use crate::service::openai_service::OpenAIClient;
use crate::service::parser_service;
use crate::service::planner_service::{plan_range, OpenAIPlanSource};

pub struct ApiState {
    pub openai: Arc<dyn OpenAIClient>,
    pub calendar_path: PathBuf,
    // Serializes writes to the artifact across concurrent generate_plan
    // requests.
    pub write_lock: Mutex<()>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_info: BudgetInfo,
    pub activity_goals: ActivityGoals,
}

pub fn routes(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let parse_budget = warp::path!("api" / "parse_budget")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handle_parse_budget);

    let parse_activities = warp::path!("api" / "parse_activities")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handle_parse_activities);

    let generate_plan = warp::path!("api" / "generate_plan")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handle_generate_plan);

    let download = warp::path!("static" / "calendar.ics")
        .and(warp::get())
        .and(with_state(state))
        .and_then(handle_download);

    parse_budget
        .or(parse_activities)
        .or(generate_plan)
        .or(download)
}

fn with_state(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (Arc<ApiState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

async fn handle_parse_budget(
    state: Arc<ApiState>,
    req: ParseRequest,
) -> Result<impl Reply, Infallible> {
    if req.input.trim().is_empty() {
        return Ok(warp::reply::json(
            &json!({"success": false, "error": "No input provided"}),
        ));
    }
    match parser_service::parse_budget(state.openai.as_ref(), &req.input).await {
        Ok(budget) => Ok(warp::reply::json(
            &json!({"success": true, "budget_info": budget}),
        )),
        Err(err) => Ok(warp::reply::json(&json!({"success": false, "error": err}))),
    }
}

async fn handle_parse_activities(
    state: Arc<ApiState>,
    req: ParseRequest,
) -> Result<impl Reply, Infallible> {
    if req.input.trim().is_empty() {
        return Ok(warp::reply::json(
            &json!({"success": false, "error": "No input provided"}),
        ));
    }
    match parser_service::parse_activities(state.openai.as_ref(), &req.input).await {
        Ok(goals) => Ok(warp::reply::json(
            &json!({"success": true, "activity_goals": goals}),
        )),
        Err(err) => Ok(warp::reply::json(&json!({"success": false, "error": err}))),
    }
}

async fn handle_generate_plan(
    state: Arc<ApiState>,
    req: GeneratePlanRequest,
) -> Result<impl Reply, Infallible> {
    let source = OpenAIPlanSource::new(state.openai.clone());
    let calendar = match plan_range(
        &source,
        req.start_date,
        req.end_date,
        &req.budget_info,
        &req.activity_goals,
    )
    .await
    {
        Ok(calendar) => calendar,
        Err(err) => {
            return Ok(warp::reply::json(&json!({"success": false, "error": err})));
        }
    };

    let _guard = state.write_lock.lock().await;
    match calendar.save(&state.calendar_path) {
        Ok(()) => Ok(warp::reply::json(&json!({"success": true}))),
        Err(err) => Ok(warp::reply::json(&json!({"success": false, "error": err}))),
    }
}

async fn handle_download(state: Arc<ApiState>) -> Result<warp::reply::Response, Infallible> {
    match tokio::fs::read_to_string(&state.calendar_path).await {
        Ok(body) => {
            let reply = warp::reply::with_header(body, "Content-Type", "text/calendar");
            let reply = warp::reply::with_header(
                reply,
                "Content-Disposition",
                "attachment; filename=\"calendar.ics\"",
            );
            Ok(reply.into_response())
        }
        Err(err) => {
            let reply =
                warp::reply::json(&json!({"success": false, "error": err.to_string()}));
            Ok(warp::reply::with_status(reply, StatusCode::NOT_FOUND).into_response())
        }
    }
}

/// Malformed request bodies and unknown paths come back as the same
/// success/error JSON shape the handlers use.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else {
        (StatusCode::BAD_REQUEST, "Invalid request")
    };
    let reply = warp::reply::json(&json!({"success": false, "error": message}));
    Ok(warp::reply::with_status(reply, status))
}
