//! Markdown summary generation
//!
//! This module generates a human-readable markdown report of a crawl run:
//! run information, counts and the list of visited pages.

use crate::output::{CrawlSummary, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of a crawl run
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Sumi-Frontier Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Started**: {}\n",
        summary.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        summary.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        summary.duration_seconds()
    ));
    md.push_str(&format!("- **Stopped**: {}\n\n", summary.termination));

    // Counts
    md.push_str("## Overall Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Page budget | {} |\n", summary.budget));
    md.push_str(&format!("| Pages visited | {} |\n", summary.pages_visited));
    md.push_str(&format!("| Fetched OK | {} |\n", summary.successes()));
    md.push_str(&format!("| Fetch failures | {} |\n", summary.failures));
    md.push_str(&format!(
        "| Still pending | {} |\n\n",
        summary.pending_remaining
    ));

    // Visited pages
    md.push_str("## Visited Pages\n\n");
    if summary.visited.is_empty() {
        md.push_str("_No pages were visited._\n");
    } else {
        for (index, location) in summary.visited.iter().enumerate() {
            md.push_str(&format!("{}. <{}>\n", index + 1, location));
        }
    }

    md
}
