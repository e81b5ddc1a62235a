//! Output module for crawl events, summaries and reports
//!
//! This module handles:
//! - The events the crawl loop emits and the reporters that consume them
//! - The final crawl summary and its stdout rendering
//! - Markdown summary files

mod markdown;
mod report;
mod summary;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use report::{CrawlEvent, RecordingReporter, TracingReporter};
pub use summary::{print_summary, CrawlSummary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
