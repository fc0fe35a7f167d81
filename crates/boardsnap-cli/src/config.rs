//! Export configuration from flags and environment

use std::path::PathBuf;
use std::time::Duration;

use boardsnap_core::storage::DEFAULT_OUTPUT_PATH;
use boardsnap_jira::{JiraAuth, JiraClient, NormalizeOptions, DEFAULT_BROWSE_BASE_URL};
use clap::Parser;

use crate::export::ExportRequest;

pub const DEFAULT_MAX_RESULTS: u32 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound JIRA Cloud accepts for `maxResults` on agile endpoints
const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Parser, Debug, Clone)]
#[command(name = "boardsnap")]
#[command(about = "Export JIRA Agile board issues to a JSON file", long_about = None)]
pub struct ExportConfig {
    /// JIRA base URL, e.g. https://company.atlassian.net
    #[arg(long, env = "JIRA_API_URL")]
    pub api_url: String,

    /// Account email used for basic auth
    #[arg(long, env = "JIRA_EMAIL")]
    pub email: String,

    /// API token used for basic auth
    #[arg(long, env = "JIRA_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Agile board to export
    #[arg(long, env = "JIRA_BOARD_ID")]
    pub board_id: u64,

    /// Destination file
    #[arg(short, long, env = "JIRA_EXPORT_PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Issues requested in the single page fetched
    #[arg(long, env = "JIRA_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: u32,

    /// Prefix for subtask epic links
    #[arg(long, env = "JIRA_BROWSE_URL", default_value = DEFAULT_BROWSE_BASE_URL)]
    pub browse_url: String,

    /// HTTP request timeout
    #[arg(long, env = "JIRA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log level
    #[arg(short, long, env = "BOARDSNAP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ExportConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(ConfigError::Invalid("JIRA email cannot be empty".to_string()));
        }

        if self.token.trim().is_empty() {
            return Err(ConfigError::Invalid("JIRA token cannot be empty".to_string()));
        }

        validate_url("API URL", &self.api_url)?;
        validate_url("Browse URL", &self.browse_url)?;

        if self.max_results == 0 || self.max_results > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "Max results must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            )));
        }

        Ok(())
    }

    pub fn auth(&self) -> JiraAuth {
        JiraAuth::new(self.email.clone(), self.token.clone())
    }

    pub fn client(&self) -> boardsnap_jira::Result<JiraClient> {
        JiraClient::with_timeout(
            self.api_url.clone(),
            self.auth(),
            Duration::from_secs(self.timeout_secs),
        )
    }

    pub fn request(&self) -> ExportRequest {
        ExportRequest {
            board_id: self.board_id,
            max_results: self.max_results,
            destination: self.output.clone(),
            normalize: NormalizeOptions {
                browse_base_url: self.browse_url.clone(),
            },
        }
    }
}

fn validate_url(name: &str, url: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Invalid(format!(
            "{} must start with http:// or https://",
            name
        )));
    }
    Ok(())
}
