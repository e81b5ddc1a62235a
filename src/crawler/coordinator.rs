//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Claiming the next Location from the session
//! - Fetching the page through the fetcher
//! - Extracting links and canonicalizing them against the page Location
//! - Feeding new Locations back into the frontier
//! - Reporting progress, failures and the final summary

use crate::config::Config;
use crate::crawler::fetcher::HttpFetcher;
use crate::crawler::parser::HtmlLinkExtractor;
use crate::crawler::traits::{Fetcher, LinkExtractor, Reporter};
use crate::output::{generate_markdown_summary, CrawlEvent, CrawlSummary, TracingReporter};
use crate::state::{CrawlSession, NextLocation};
use crate::url::{canonicalize, Location};
use crate::SumiError;
use chrono::Utc;
use std::path::Path;

/// Main crawler coordinator structure
///
/// The coordinator owns its collaborators but not the crawl state: the
/// session is lent to [`Coordinator::run`] for the duration of a run.
pub struct Coordinator<F, E, R> {
    fetcher: F,
    extractor: E,
    reporter: R,
}

impl<F, E, R> Coordinator<F, E, R>
where
    F: Fetcher,
    E: LinkExtractor,
    R: Reporter,
{
    /// Creates a new coordinator from its collaborators
    pub fn new(fetcher: F, extractor: E, reporter: R) -> Self {
        Self {
            fetcher,
            extractor,
            reporter,
        }
    }

    /// Runs the crawl loop until the frontier is exhausted or the budget is reached
    ///
    /// For each claimed Location:
    /// 1. Report the attempt with the running page count
    /// 2. Fetch the page
    /// 3. On failure, report it and move on (the page stays visited)
    /// 4. On success, extract links, canonicalize them against the page and
    ///    queue the ones not seen before, in document order
    ///
    /// Nothing in the loop is fatal; it always ends in one of the two normal
    /// terminations.
    pub async fn run(&mut self, session: &mut CrawlSession) -> CrawlSummary {
        let started_at = Utc::now();
        let mut failures = 0;

        self.reporter.report(CrawlEvent::Started {
            seeds: session.pending().cloned().collect(),
            budget: session.budget(),
        });

        let termination = loop {
            let location = match session.next_location() {
                NextLocation::Fetch(location) => location,
                NextLocation::Done(termination) => break termination,
            };

            self.reporter.report(CrawlEvent::Fetching {
                location: location.clone(),
                count: session.pages_visited(),
                budget: session.budget(),
            });

            match self.fetcher.fetch(&location).await.into_body() {
                Ok(body) => {
                    let queued = self.enqueue_links(session, &location, &body);
                    tracing::debug!(
                        "{}: {} new links queued, {} pending",
                        location,
                        queued,
                        session.pending_len()
                    );
                }
                Err(failure) => {
                    failures += 1;
                    self.reporter
                        .report(CrawlEvent::FetchFailed { location, failure });
                }
            }
        };

        let summary = CrawlSummary::from_session(session, termination, failures, started_at);
        self.reporter.report(CrawlEvent::Finished(summary.clone()));

        summary
    }

    /// Canonicalizes the links of a fetched page and queues the new ones
    ///
    /// # Returns
    ///
    /// The number of Locations added to the pending queue
    fn enqueue_links(&self, session: &mut CrawlSession, base: &Location, body: &[u8]) -> usize {
        let mut queued = 0;

        for link in self.extractor.extract_links(body) {
            let Some(location) = canonicalize(base, &link) else {
                tracing::debug!("Dropping malformed link {:?} found on {}", link, base);
                continue;
            };

            if session.enqueue(location) {
                queued += 1;
            }
        }

        queued
    }

    /// Returns the reporter
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Consumes the coordinator, returning the reporter
    pub fn into_reporter(self) -> R {
        self.reporter
    }
}

/// Runs a complete crawl from configuration
///
/// This function:
/// 1. Parses the seed Locations and builds a fresh session
/// 2. Builds the HTTP client
/// 3. Runs the crawl loop with the HTML extractor and the tracing reporter
/// 4. Writes the markdown summary when a summary path is configured
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed
/// * `Err(SumiError)` - Setup or summary output failed
///
/// # Example
///
/// ```no_run
/// use sumi_frontier::config::Config;
/// use sumi_frontier::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(&Config::for_seed("http://example.com")).await?;
/// println!("Visited {} pages", summary.pages_visited);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlSummary, SumiError> {
    let seeds = config.seed_locations()?;
    let mut session = CrawlSession::with_seeds(seeds, config.crawler.max_pages);

    let fetcher = HttpFetcher::new(&config.user_agent, &config.fetch)?;
    let mut coordinator = Coordinator::new(fetcher, HtmlLinkExtractor::new(), TracingReporter);

    let summary = coordinator.run(&mut session).await;

    if let Some(path) = &config.output.summary_path {
        generate_markdown_summary(&summary, Path::new(path))?;
        tracing::info!("Summary written to: {}", path);
    }

    Ok(summary)
}
