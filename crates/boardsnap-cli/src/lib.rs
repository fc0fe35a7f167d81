//! boardsnap CLI Library
//!
//! Configuration and export pipeline exposed as a library for testing.

pub mod config;
pub mod export;

pub use config::{ConfigError, ExportConfig};
pub use export::{export_board_issues, ExportError, ExportRequest, ExportSummary};
