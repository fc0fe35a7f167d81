//! boardsnap
//!
//! Exports the issues of a JIRA Agile board to a JSON file.

use anyhow::{Context, Result};
use boardsnap_cli::{export_board_issues, ExportConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    let config = ExportConfig::parse();
    config.validate()?;

    // Logs go to stderr so stdout stays usable in pipelines
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(&config.log_level)
        .init();

    let client = config
        .client()
        .context("Failed to create JIRA client")?;
    let request = config.request();

    let summary = export_board_issues(&client, &request)
        .await
        .with_context(|| format!("Failed to export board {}", config.board_id))?;

    println!(
        "Exported {} issues from board {} to {}",
        summary.issue_count,
        summary.board_id,
        summary.path.display()
    );

    Ok(())
}
