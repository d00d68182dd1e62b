//! Output module for import results
//!
//! This module handles:
//! - The serializable success/failure envelope handed to the calling workflow
//! - Rendering that envelope as JSON or as a markdown review sheet
//! - Writing the rendered result to a file

mod markdown;

pub use markdown::format_markdown_review;

use crate::event::ParsedEventData;
use crate::ImportError;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while rendering or writing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Result envelope of one import
///
/// Serializes as `{"status":"success","data":{...}}` or
/// `{"status":"failure","kind":"fetch_failed","http_status":404,"message":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ImportOutcome {
    Success {
        data: ParsedEventData,
    },
    Failure {
        kind: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        http_status: Option<u16>,
        message: String,
    },
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<ParsedEventData, ImportError>> for ImportOutcome {
    fn from(result: Result<ParsedEventData, ImportError>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(e) => {
                let kind = e.kind();
                Self::Failure {
                    kind: kind.as_str(),
                    http_status: kind.http_status(),
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Rendering format for an [`ImportOutcome`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

/// Renders an outcome in the requested format
pub fn render(outcome: &ImportOutcome, format: OutputFormat) -> OutputResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Markdown => Ok(format_markdown_review(outcome)),
    }
}

/// Renders an outcome and writes it to `path`
pub fn write_outcome(outcome: &ImportOutcome, format: OutputFormat, path: &Path) -> OutputResult<()> {
    let rendered = render(outcome, format)?;
    std::fs::write(path, rendered)?;
    tracing::info!("Wrote import result to {}", path.display());
    Ok(())
}
