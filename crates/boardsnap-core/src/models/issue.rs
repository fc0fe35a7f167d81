//! Normalized issue data model

use serde::{Deserialize, Serialize};

/// Issue type name Jira uses for subtasks
pub const SUBTASK_ISSUE_TYPE: &str = "Subtask";

/// A flat, export-friendly view of a Jira issue.
///
/// Every field except `key` is nullable. Missing source data is kept as
/// `None` and serialized as an explicit `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedIssue {
    pub key: String,
    pub summary: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    pub priority: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub epic_link: Option<String>,
    #[serde(default)]
    pub comments: Vec<IssueComment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueComment {
    pub author: Option<String>,
    pub body: Option<String>,
    /// Raw timestamp string as Jira sent it
    pub created_at: Option<String>,
}

impl NormalizedIssue {
    /// Create an empty record for the given issue key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Check if the issue is a subtask
    pub fn is_subtask(&self) -> bool {
        self.issue_type.as_deref() == Some(SUBTASK_ISSUE_TYPE)
    }

    /// Point the epic link at the parent issue's browse page
    pub fn link_to_parent(&mut self, browse_base_url: &str, parent_key: &str) {
        self.epic_link = Some(format!("{}{}", browse_base_url, parent_key));
    }
}
