//! Final summary of a crawl run

use crate::state::{CrawlSession, Termination};
use crate::url::Location;
use chrono::{DateTime, Utc};

/// Summary of a finished crawl run
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlSummary {
    /// Page budget of the run
    pub budget: usize,

    /// Number of unique pages fetched (successfully or not)
    pub pages_visited: usize,

    /// Visited Locations in the order they were fetched
    pub visited: Vec<Location>,

    /// Number of fetch failures (transport errors and non-200 statuses)
    pub failures: usize,

    /// Locations still pending when the run stopped
    pub pending_remaining: usize,

    /// Why the run stopped
    pub termination: Termination,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl CrawlSummary {
    /// Builds a summary from the final state of a session
    pub fn from_session(
        session: &CrawlSession,
        termination: Termination,
        failures: usize,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            budget: session.budget(),
            pages_visited: session.pages_visited(),
            visited: session.visit_order().to_vec(),
            failures,
            pending_remaining: session.pending_len(),
            termination,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Number of pages fetched with a 200 response
    pub fn successes(&self) -> usize {
        self.pages_visited.saturating_sub(self.failures)
    }

    /// Wall-clock duration of the run, in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Share of fetched pages that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            0.0
        } else {
            (self.successes() as f64 / self.pages_visited as f64) * 100.0
        }
    }
}

/// Prints the summary to stdout
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_summary(summary: &CrawlSummary) {
    println!("\nCrawling finished ({}).", summary.termination);

    println!(
        "\nVisited URLs (total: {}, budget: {}):",
        summary.pages_visited, summary.budget
    );
    for location in &summary.visited {
        println!("{}", location);
    }

    println!();
    println!(
        "Success Rate: {:.1}% ({} / {} pages fetched successfully)",
        summary.success_rate(),
        summary.successes(),
        summary.pages_visited
    );
    if summary.pending_remaining > 0 {
        println!("Still pending: {}", summary.pending_remaining);
    }
    println!("Duration: {:.2}s", summary.duration_seconds());
}
