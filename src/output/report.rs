//! Crawl events and the reporters that consume them
//!
//! The coordinator emits one event per crawl start, per fetch attempt, per
//! fetch failure and one final summary. Only the occurrence and order of
//! events matter; formatting is up to the reporter.

use crate::crawler::Reporter;
use crate::output::CrawlSummary;
use crate::url::Location;
use crate::FetchFailure;

/// A progress or failure event from the crawl loop
#[derive(Debug, Clone, PartialEq)]
pub enum CrawlEvent {
    /// The crawl is starting
    Started {
        /// Locations queued before the first fetch
        seeds: Vec<Location>,
        /// Page budget of the run
        budget: usize,
    },

    /// A page is about to be fetched
    Fetching {
        /// The page being fetched
        location: Location,
        /// Running page count, including this one
        count: usize,
        /// Page budget of the run
        budget: usize,
    },

    /// A fetch failed; the page stays visited and is not retried
    FetchFailed {
        /// The page that failed
        location: Location,
        /// What went wrong
        failure: FetchFailure,
    },

    /// The crawl has ended
    Finished(CrawlSummary),
}

/// Reporter that writes each event as a `tracing` line
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: CrawlEvent) {
        match event {
            CrawlEvent::Started { seeds, budget } => {
                for seed in &seeds {
                    tracing::info!("Starting crawl from: {}", seed);
                }
                tracing::info!("Page budget: {}", budget);
            }
            CrawlEvent::Fetching {
                location,
                count,
                budget,
            } => {
                tracing::info!("Crawling ({}/{}): {}", count, budget, location);
            }
            CrawlEvent::FetchFailed { location, failure } => match failure {
                FetchFailure::Status(status_code) => {
                    tracing::warn!(
                        "Error: Received status code {} for URL: {}",
                        status_code,
                        location
                    );
                }
                FetchFailure::Transport(message) => {
                    tracing::warn!("Error fetching URL {}: {}", location, message);
                }
            },
            CrawlEvent::Finished(summary) => {
                tracing::info!(
                    "Crawling finished ({}): {} pages visited, {} failed, {} still pending",
                    summary.termination,
                    summary.pages_visited,
                    summary.failures,
                    summary.pending_remaining
                );
            }
        }
    }
}

/// Reporter that keeps every event in order
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Vec<CrawlEvent>,
}

impl RecordingReporter {
    /// Creates an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events
    pub fn events(&self) -> &[CrawlEvent] {
        &self.events
    }

    /// Consumes the recorder, returning its events
    pub fn into_events(self) -> Vec<CrawlEvent> {
        self.events
    }

    /// Returns the recorded fetch failures
    pub fn failures(&self) -> Vec<(&Location, &FetchFailure)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CrawlEvent::FetchFailed { location, failure } => Some((location, failure)),
                _ => None,
            })
            .collect()
    }

    /// Returns the Locations of all fetch attempts, in order
    pub fn fetched(&self) -> Vec<&Location> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CrawlEvent::Fetching { location, .. } => Some(location),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: CrawlEvent) {
        self.events.push(event);
    }
}
