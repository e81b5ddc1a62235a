//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Redirect following
//! - Error classification

use crate::config::{FetchConfig, UserAgentConfig};
use crate::crawler::traits::{FetchOutcome, Fetcher};
use crate::url::Location;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Maximum number of redirects followed for a single fetch
const MAX_REDIRECTS: usize = 10;

/// Fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from configuration
    ///
    /// # Arguments
    ///
    /// * `user_agent` - The user agent configuration
    /// * `fetch` - Timeouts for each request
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Ready-to-use fetcher
    /// * `Err(reqwest::Error)` - Failed to build the client
    pub fn new(user_agent: &UserAgentConfig, fetch: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(user_agent, fetch)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `fetch` - Timeouts for each request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_frontier::config::{FetchConfig, UserAgentConfig};
/// use sumi_frontier::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetch: &FetchConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetch.request_timeout))
        .connect_timeout(Duration::from_secs(fetch.connect_timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Fetches a URL and classifies the result
    ///
    /// | Condition | Outcome |
    /// |-----------|---------|
    /// | HTTP 200 | `Ok` with the full body |
    /// | Any other status | `Ok` with the status and an empty body |
    /// | Timeout | `TransportError` |
    /// | Connection refused | `TransportError` |
    /// | Redirect chain > 10 | `TransportError` |
    /// | Body read failure | `TransportError` |
    async fn fetch(&self, location: &Location) -> FetchOutcome {
        let response = match self.client.get(location.as_str()).send().await {
            Ok(response) => response,
            Err(e) => {
                return FetchOutcome::TransportError {
                    message: describe_error(&e),
                }
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            // Nothing is extracted from failed pages, so the body is not read
            return FetchOutcome::Ok {
                status_code: status.as_u16(),
                body: Vec::new(),
            };
        }

        match response.bytes().await {
            Ok(body) => FetchOutcome::Ok {
                status_code: status.as_u16(),
                body: body.to_vec(),
            },
            Err(e) => FetchOutcome::TransportError {
                message: describe_error(&e),
            },
        }
    }
}

/// Turns a `reqwest` error into a short description
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection refused".to_string()
    } else if error.is_redirect() {
        format!("Too many redirects (limit {})", MAX_REDIRECTS)
    } else {
        error.to_string()
    }
}
