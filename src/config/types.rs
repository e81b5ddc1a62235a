use crate::url::Location;
use crate::UrlError;
use serde::Deserialize;

/// Default page budget when none is configured
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Main configuration structure for Sumi-Frontier
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Builds a configuration for a single seed with all defaults
    pub fn for_seed(seed: impl Into<String>) -> Self {
        Self {
            crawler: CrawlerConfig {
                seed: seed.into(),
                max_pages: DEFAULT_MAX_PAGES,
                extra_seeds: Vec::new(),
            },
            user_agent: UserAgentConfig::default(),
            fetch: FetchConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Parses the seed and any extra seeds, in order
    pub fn seed_locations(&self) -> Result<Vec<Location>, UrlError> {
        std::iter::once(&self.crawler.seed)
            .chain(&self.crawler.extra_seeds)
            .map(|seed| Location::parse(seed))
            .collect()
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Location the crawl starts from
    pub seed: String,

    /// Page budget: maximum number of distinct pages to fetch
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Additional Locations queued after the seed
    #[serde(rename = "extra-seeds", default)]
    pub extra_seeds: Vec<String>,
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiFrontier".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

/// HTTP request settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Total time allowed for one request (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Time allowed to establish a connection (seconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: 30,
            connect_timeout: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path to the markdown summary file, written when set
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}
