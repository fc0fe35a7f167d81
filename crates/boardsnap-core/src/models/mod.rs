pub mod issue;

pub use issue::{IssueComment, NormalizedIssue, SUBTASK_ISSUE_TYPE};
