//! Collaborator traits for the crawl loop
//!
//! The coordinator drives the traversal but does no I/O of its own. It talks
//! to the network, to the document parser and to the reporting sink through
//! the traits below, so any of them can be swapped out (the tests use
//! in-memory fakes).

use crate::output::CrawlEvent;
use crate::url::Location;
use crate::FetchFailure;
use async_trait::async_trait;

/// Raw result of fetching one Location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The server answered; any status other than 200 is still a failure
    Ok {
        /// HTTP status code
        status_code: u16,
        /// Raw response body
        body: Vec<u8>,
    },

    /// No usable response (DNS, connect, timeout, body read, ...)
    TransportError {
        /// Error description
        message: String,
    },
}

impl FetchOutcome {
    /// Returns the body of a 200 response, or the failure otherwise
    pub fn into_body(self) -> Result<Vec<u8>, FetchFailure> {
        match self {
            Self::Ok {
                status_code: 200,
                body,
            } => Ok(body),
            Self::Ok { status_code, .. } => Err(FetchFailure::Status(status_code)),
            Self::TransportError { message } => Err(FetchFailure::Transport(message)),
        }
    }
}

/// Fetches a page by Location
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a single page
    async fn fetch(&self, location: &Location) -> FetchOutcome;
}

/// Extracts raw link strings from a fetched document
pub trait LinkExtractor: Send + Sync {
    /// Returns href values in document order
    ///
    /// Values are returned as written in the document; they may be
    /// relative, empty or malformed.
    fn extract_links(&self, body: &[u8]) -> Vec<String>;
}

/// Receives progress and failure events from the crawl loop
pub trait Reporter: Send {
    /// Handles one event
    fn report(&mut self, event: CrawlEvent);
}
