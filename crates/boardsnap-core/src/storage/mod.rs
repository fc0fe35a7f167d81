pub mod issues;

pub use issues::IssueFileWriter;

/// Default export file name, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "jira_issues.json";
