use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use warp::Filter;

use crate::handlers::api::{self, ApiState};
use crate::service::openai_service::OpenAIService;

pub async fn run_api(openai_api_key: String, calendar_path: PathBuf, port: u16) {
    let state = Arc::new(ApiState {
        openai: Arc::new(OpenAIService::new(openai_api_key)),
        calendar_path,
        write_lock: Mutex::new(()),
    });

    let routes = api::routes(state).recover(api::handle_rejection);

    println!("Listening on http://127.0.0.1:{}", port);
    warp::serve(routes).run(([127, 0, 0, 1], port)).await;
}
