//! Flattening of board issue responses into export records
//!
//! Normalization runs in two passes. The first pass builds one record per
//! raw issue and indexes every subtask reference by subtask key. The second
//! pass rewrites the epic link of each subtask to its parent's browse URL.
//! Parents and subtasks come back in arbitrary order, so the index has to
//! be complete before any record is patched.

use std::collections::HashMap;

use boardsnap_core::models::{IssueComment, NormalizedIssue};
use serde_json::Value;

use crate::types::{BoardIssuesResponse, JiraComment, JiraIssue};

/// Browse URL prefix used for subtask epic links unless configured otherwise
pub const DEFAULT_BROWSE_BASE_URL: &str = "https://toloka-partners.atlassian.net/browse/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Prefix joined with the parent key, e.g. `https://company.atlassian.net/browse/`
    pub browse_base_url: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            browse_base_url: DEFAULT_BROWSE_BASE_URL.to_string(),
        }
    }
}

/// Subtask key to parent key, scoped to a single response
#[derive(Debug, Default)]
pub struct SubtaskParentIndex {
    parents: HashMap<String, String>,
}

impl SubtaskParentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a subtask reference; a later parent for the same subtask wins
    pub fn insert(&mut self, subtask_key: String, parent_key: String) {
        self.parents.insert(subtask_key, parent_key);
    }

    pub fn parent_of(&self, subtask_key: &str) -> Option<&str> {
        self.parents.get(subtask_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Result of normalizing one response
#[derive(Debug, Default)]
pub struct Normalization {
    pub issues: Vec<NormalizedIssue>,
    /// Number of subtasks whose epic link was pointed at a parent
    pub subtask_links: usize,
}

/// Normalize a raw board-issues body. Never fails.
pub fn normalize(raw: &Value, options: &NormalizeOptions) -> Vec<NormalizedIssue> {
    normalize_response(&BoardIssuesResponse::from_value(raw), options).issues
}

pub fn normalize_response(
    response: &BoardIssuesResponse,
    options: &NormalizeOptions,
) -> Normalization {
    let (mut issues, index) = build_records(&response.issues);
    let subtask_links = link_subtasks(&mut issues, &index, &options.browse_base_url);

    tracing::debug!(
        issues = issues.len(),
        indexed_subtasks = index.len(),
        subtask_links,
        "Normalized board issues"
    );

    Normalization {
        issues,
        subtask_links,
    }
}

/// Pass 1: one record per issue, plus the subtask index
fn build_records(raw_issues: &[JiraIssue]) -> (Vec<NormalizedIssue>, SubtaskParentIndex) {
    let mut records = Vec::with_capacity(raw_issues.len());
    let mut index = SubtaskParentIndex::new();

    for raw in raw_issues {
        let record = normalize_issue(raw);

        if !record.key.is_empty() {
            for subtask in &raw.fields.subtasks {
                if let Some(ref subtask_key) = subtask.key {
                    index.insert(subtask_key.clone(), record.key.clone());
                }
            }
        }

        records.push(record);
    }

    (records, index)
}

/// Pass 2: point subtask epic links at their parent issue
fn link_subtasks(
    records: &mut [NormalizedIssue],
    index: &SubtaskParentIndex,
    browse_base_url: &str,
) -> usize {
    let mut linked = 0;

    for record in records.iter_mut().filter(|r| r.is_subtask()) {
        if let Some(parent_key) = index.parent_of(&record.key) {
            record.link_to_parent(browse_base_url, parent_key);
            linked += 1;
        }
    }

    linked
}

fn normalize_issue(raw: &JiraIssue) -> NormalizedIssue {
    let key = raw.key.clone().unwrap_or_else(|| {
        tracing::warn!("Board issue without a key; exporting it with an empty key");
        String::new()
    });
    let fields = &raw.fields;

    NormalizedIssue {
        key,
        summary: fields.summary.clone(),
        status: fields.status.as_ref().and_then(|s| s.name.clone()),
        description: fields.description.clone(),
        assignee: fields.assignee.as_ref().and_then(|u| u.display_name.clone()),
        reporter: fields.reporter.as_ref().and_then(|u| u.display_name.clone()),
        issue_type: fields.issuetype.as_ref().and_then(|t| t.name.clone()),
        priority: fields.priority.as_ref().and_then(|p| p.name.clone()),
        created_at: fields.created.clone(),
        updated_at: fields.updated.clone(),
        epic_link: fields.epic_link.clone(),
        comments: fields
            .comment
            .as_ref()
            .map(|page| page.comments.iter().map(normalize_comment).collect())
            .unwrap_or_default(),
    }
}

fn normalize_comment(raw: &JiraComment) -> IssueComment {
    IssueComment {
        author: raw.author.as_ref().and_then(|u| u.display_name.clone()),
        body: raw.body.clone(),
        created_at: raw.created.clone(),
    }
}
