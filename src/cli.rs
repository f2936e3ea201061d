use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::Text;

use crate::service::openai_service::OpenAIService;
use crate::service::parser_service;
use crate::service::planner_service::{plan_range, OpenAIPlanSource};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a calendar for the inclusive date range, prompting for the
    /// budget and activity descriptions.
    Plan {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

pub async fn cli(openai_api_key: String, calendar_path: PathBuf) {
    // Fine to panic here
    let cli = Cli::parse();
    match &cli.command {
        Commands::Plan {
            start_date,
            end_date,
        } => {
            if let Err(e) =
                plan_from_prompts(openai_api_key, calendar_path, *start_date, *end_date).await
            {
                println!("Failed to generate plan: {}", e);
            }
        }
    }
}

async fn plan_from_prompts(
    openai_api_key: String,
    calendar_path: PathBuf,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    let budget_text =
        Text::new("Describe your finances (balance, income, bills, savings goals).").prompt()?;
    let activity_text =
        Text::new("Describe your activity goals and preferences.").prompt()?;

    let openai = Arc::new(OpenAIService::new(openai_api_key));

    let budget = parser_service::parse_budget(openai.as_ref(), &budget_text).await?;
    let goals = parser_service::parse_activities(openai.as_ref(), &activity_text).await?;

    let source = OpenAIPlanSource::new(openai);
    let calendar = plan_range(&source, start_date, end_date, &budget, &goals).await?;

    calendar.save(&calendar_path)?;
    println!(
        "Created {} calendar entries in {}",
        calendar.len(),
        calendar_path.display()
    );
    Ok(())
}
