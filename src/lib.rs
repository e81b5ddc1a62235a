//! Sumi-Frontier: a bounded breadth-first web crawler
//!
//! This crate implements the crawl frontier and deduplication engine of a
//! breadth-first crawler: URL canonicalization, a FIFO pending queue with a
//! visited set, and a page budget that bounds the traversal. Fetching, link
//! extraction and reporting are collaborators behind traits, with default
//! HTTP, HTML and tracing implementations provided.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Frontier setup operations
///
/// The crawl loop itself never fails; these errors come from loading
/// configuration, building the HTTP client and writing output.
#[derive(Debug, Error)]
pub enum SumiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Why a single page could not be fetched
///
/// Both variants are handled the same way by the crawler: the page stays
/// visited, nothing is extracted from it and the crawl moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("Received status code {0}")]
    Status(u16),

    #[error("Error fetching URL: {0}")]
    Transport(String),
}

// Re-export commonly used types
pub use config::Config;
pub use state::{CrawlSession, Termination};
pub use url::{canonicalize, Location};
