//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The collaborator traits the crawl loop talks through
//! - HTTP fetching
//! - HTML link extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod traits;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, HttpFetcher};
pub use parser::HtmlLinkExtractor;
pub use traits::{FetchOutcome, Fetcher, LinkExtractor, Reporter};
