//! JIRA API types
//!
//! Board responses are read best-effort: every field is optional, and a
//! value of the wrong JSON type is treated the same as a missing one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body of `GET /rest/agile/1.0/board/{id}/issue`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardIssuesResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub start_at: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_results: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub issues: Vec<JiraIssue>,
}

impl BoardIssuesResponse {
    /// Read a response body, degrading anything unexpected to an empty page
    pub fn from_value(raw: &Value) -> Self {
        if !raw.is_object() {
            return Self::default();
        }
        Self::deserialize(raw).unwrap_or_default()
    }

    /// Whether the board holds more issues than this page returned
    pub fn is_truncated(&self) -> bool {
        self.total.is_some_and(|total| total > self.issues.len() as u64)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraIssue {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub fields: JiraFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraFields {
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<JiraStatus>,
    #[serde(default, deserialize_with = "lenient")]
    pub assignee: Option<JiraUser>,
    #[serde(default, deserialize_with = "lenient")]
    pub reporter: Option<JiraUser>,
    #[serde(default, deserialize_with = "lenient")]
    pub issuetype: Option<JiraIssueType>,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Option<JiraPriority>,
    #[serde(default, deserialize_with = "lenient")]
    pub created: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated: Option<String>,
    /// Epic link custom field
    #[serde(
        default,
        rename = "customfield_10008",
        deserialize_with = "lenient"
    )]
    pub epic_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub subtasks: Vec<JiraSubtaskRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub comment: Option<JiraCommentPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraStatus {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraIssueType {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraPriority {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraSubtaskRef {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraCommentPage {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub comments: Vec<JiraComment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraComment {
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<JiraUser>,
    #[serde(default, deserialize_with = "lenient")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Arrays are read item by item; unreadable items become `T::default()`
fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| T::deserialize(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}
