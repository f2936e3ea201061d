#![allow(non_snake_case)]

use std::env;
use std::path::PathBuf;

use lifePlanner::cli;
use lifePlanner::config::AppConfig;
use lifePlanner::runtime;

const DEFAULT_RUN_MODE: &str = "cli";
const DEFAULT_CALENDAR_PATH: &str = "static/calendar.ics";
const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let get_prop = |key: &str| -> Option<String> {
        config.get(key).or_else(|| env::var(key).ok())
    };

    let openai_api_key = get_prop("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY environment variable not set");
    let calendar_path = PathBuf::from(
        get_prop("CALENDAR_PATH").unwrap_or(DEFAULT_CALENDAR_PATH.to_string()),
    );
    let run_mode = get_prop("RUN_MODE").unwrap_or(DEFAULT_RUN_MODE.to_string());

    if run_mode == "api" {
        let port = match get_prop("PORT") {
            Some(port) => port.parse::<u16>().expect("PORT must be a port number"),
            None => DEFAULT_PORT,
        };
        runtime::run_api(openai_api_key, calendar_path, port).await;
    } else if run_mode == "cli" {
        cli::cli(openai_api_key, calendar_path).await;
    } else {
        println!("Invalid run mode {}", run_mode);
    }
}
