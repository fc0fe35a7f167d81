//! boardsnap JIRA Integration
//!
//! Client library for fetching Agile board issues from JIRA and flattening
//! them into export records.

pub mod auth;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use auth::JiraAuth;
pub use client::{BoardIssueSource, JiraClient};
pub use error::{Error, Result};
pub use normalize::{
    normalize, normalize_response, Normalization, NormalizeOptions, SubtaskParentIndex,
    DEFAULT_BROWSE_BASE_URL,
};
pub use types::*;
