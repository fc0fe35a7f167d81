//! Board export pipeline: fetch, normalize, write

use std::path::PathBuf;

use boardsnap_core::storage::{IssueFileWriter, DEFAULT_OUTPUT_PATH};
use boardsnap_jira::{normalize_response, BoardIssueSource, BoardIssuesResponse, NormalizeOptions};

use crate::config::DEFAULT_MAX_RESULTS;

/// Export pipeline error
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JIRA error: {0}")]
    Jira(#[from] boardsnap_jira::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] boardsnap_core::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub board_id: u64,
    pub max_results: u32,
    pub destination: PathBuf,
    pub normalize: NormalizeOptions,
}

impl ExportRequest {
    pub fn new(board_id: u64) -> Self {
        Self {
            board_id,
            max_results: DEFAULT_MAX_RESULTS,
            destination: PathBuf::from(DEFAULT_OUTPUT_PATH),
            normalize: NormalizeOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub board_id: u64,
    pub issue_count: usize,
    pub subtask_links: usize,
    /// Issue count JIRA reported for the whole board, if any
    pub board_total: Option<u64>,
    pub path: PathBuf,
}

impl ExportSummary {
    pub fn is_truncated(&self) -> bool {
        self.board_total.is_some_and(|total| total > self.issue_count as u64)
    }
}

/// Export the first page of a board's issues to `request.destination`.
///
/// Only one page is requested. Boards larger than `max_results` produce a
/// truncated export; this is logged but not treated as an error.
pub async fn export_board_issues(
    source: &dyn BoardIssueSource,
    request: &ExportRequest,
) -> Result<ExportSummary> {
    tracing::info!(
        board_id = request.board_id,
        max_results = request.max_results,
        "Fetching board issues"
    );

    let raw = source
        .fetch_board_issues(request.board_id, request.max_results)
        .await?;
    let response = BoardIssuesResponse::from_value(&raw);
    let normalization = normalize_response(&response, &request.normalize);

    let summary = ExportSummary {
        board_id: request.board_id,
        issue_count: normalization.issues.len(),
        subtask_links: normalization.subtask_links,
        board_total: response.total,
        path: request.destination.clone(),
    };

    if summary.is_truncated() {
        tracing::warn!(
            board_id = summary.board_id,
            exported = summary.issue_count,
            total = summary.board_total,
            "Board has more issues than max results; export is truncated"
        );
    }

    IssueFileWriter::new(&request.destination).write(&normalization.issues)?;

    tracing::info!(
        issues = summary.issue_count,
        subtask_links = summary.subtask_links,
        path = %summary.path.display(),
        "Board issues exported"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    struct StaticSource(Value);

    #[async_trait]
    impl BoardIssueSource for StaticSource {
        async fn fetch_board_issues(
            &self,
            _board_id: u64,
            _max_results: u32,
        ) -> boardsnap_jira::Result<Value> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl BoardIssueSource for FailingSource {
        async fn fetch_board_issues(
            &self,
            board_id: u64,
            _max_results: u32,
        ) -> boardsnap_jira::Result<Value> {
            Err(boardsnap_jira::Error::NotFound(format!("board {}", board_id)))
        }
    }

    fn request_in(temp_dir: &TempDir, file: &str) -> ExportRequest {
        ExportRequest {
            destination: temp_dir.path().join(file),
            ..ExportRequest::new(7)
        }
    }

    #[test]
    fn test_request_defaults() {
        let request = ExportRequest::new(3);
        assert_eq!(request.max_results, 50);
        assert_eq!(request.destination, PathBuf::from("jira_issues.json"));
        assert_eq!(request.normalize, NormalizeOptions::default());
    }

    #[tokio::test]
    async fn test_export_writes_normalized_issues() {
        let temp_dir = TempDir::new().unwrap();
        let request = request_in(&temp_dir, "nested/issues.json");
        let source = StaticSource(json!({"total": 2, "issues": [
            {"key": "T-1", "fields": {"issuetype": {"name": "Task"}, "subtasks": [{"key": "T-2"}]}},
            {"key": "T-2", "fields": {"issuetype": {"name": "Subtask"}}}
        ]}));

        let summary = export_board_issues(&source, &request).await.unwrap();
        assert_eq!(summary.issue_count, 2);
        assert_eq!(summary.subtask_links, 1);
        assert!(!summary.is_truncated());

        let written = IssueFileWriter::new(&request.destination).read().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            written[1].epic_link.as_deref(),
            Some("https://toloka-partners.atlassian.net/browse/T-1")
        );
    }

    #[tokio::test]
    async fn test_export_empty_board() {
        let temp_dir = TempDir::new().unwrap();
        let request = request_in(&temp_dir, "issues.json");

        let summary = export_board_issues(&StaticSource(json!({})), &request)
            .await
            .unwrap();
        assert_eq!(summary.issue_count, 0);
        assert_eq!(std::fs::read_to_string(&request.destination).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_export_reports_truncation() {
        let temp_dir = TempDir::new().unwrap();
        let request = request_in(&temp_dir, "issues.json");
        let source = StaticSource(json!({"total": 75, "issues": [{"key": "T-1"}]}));

        let summary = export_board_issues(&source, &request).await.unwrap();
        assert_eq!(summary.board_total, Some(75));
        assert!(summary.is_truncated());
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let request = request_in(&temp_dir, "issues.json");

        let result = export_board_issues(&FailingSource, &request).await;
        assert!(matches!(result, Err(ExportError::Jira(_))));
        assert!(!request.destination.exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("issues.json")).unwrap();
        let request = request_in(&temp_dir, "issues.json");

        let result = export_board_issues(&StaticSource(json!({"issues": []})), &request).await;
        assert!(matches!(result, Err(ExportError::Storage(_))));
    }
}
