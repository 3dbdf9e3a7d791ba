//! Configuration for the Semantic Scholar CLI.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Recommendations API endpoint.
    pub const RECOMMENDATIONS_API: &str = "https://api.semanticscholar.org/recommendations/v1";

    /// Datasets API endpoint.
    pub const DATASETS_API: &str = "https://api.semanticscholar.org/datasets/v1";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum retries after a 429 before giving up.
    pub const MAX_RETRIES: u32 = 5;

    /// Wait applied when a 429 response carries no usable Retry-After header.
    pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(5);

    /// Maximum results per search page (server cap).
    pub const SEARCH_LIMIT_CAP: i64 = 100;

    /// Maximum IDs per batch lookup (server cap).
    pub const BATCH_ID_CAP: usize = 500;

    /// Maximum results per citation/reference/author-papers page (server cap).
    pub const LIST_LIMIT_CAP: i64 = 1000;

    /// Maximum recommendations per request (server cap).
    pub const RECOMMEND_LIMIT_CAP: i64 = 500;
}

/// Default field sets for API requests.
pub mod fields {
    /// Default fields for paper endpoints.
    pub const PAPER: &[&str] = &[
        "paperId",
        "title",
        "year",
        "authors",
        "citationCount",
        "abstract",
        "venue",
        "openAccessPdf",
        "externalIds",
    ];

    /// Default fields for author endpoints.
    pub const AUTHOR: &[&str] =
        &["authorId", "name", "affiliations", "paperCount", "citationCount", "hIndex"];

    /// Fields needed to build a complete BibTeX entry.
    pub const BIBTEX: &[&str] = &[
        "paperId",
        "title",
        "year",
        "authors",
        "venue",
        "externalIds",
        "journal",
        "publicationVenue",
        "openAccessPdf",
    ];
}

/// Client configuration.
///
/// The API key is injected here by the caller (flag or `S2_API_KEY`, resolved
/// by the CLI layer) rather than read from the environment at request time.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional, raises rate limits).
    pub api_key: Option<String>,

    /// Base URL for the Graph API (overridable for mock servers).
    pub graph_api_url: String,

    /// Base URL for the Recommendations API.
    pub recommendations_api_url: String,

    /// Base URL for the Datasets API.
    pub datasets_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retry budget for 429 responses. Zero disables retries.
    pub max_retries: u32,

    /// Backoff used when a 429 carries no Retry-After header.
    pub default_backoff: Duration,
}

impl Config {
    /// Create a configuration with an optional API key.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            graph_api_url: api::GRAPH_API.to_string(),
            recommendations_api_url: api::RECOMMENDATIONS_API.to_string(),
            datasets_api_url: api::DATASETS_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            default_backoff: api::DEFAULT_BACKOFF,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            graph_api_url: format!("{base_url}/graph/v1"),
            recommendations_api_url: format!("{base_url}/recommendations/v1"),
            datasets_api_url: format!("{base_url}/datasets/v1"),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: api::MAX_RETRIES,
            default_backoff: Duration::from_millis(0), // No waiting in tests
        }
    }

    /// Disable 429 retries (`--no-retry`).
    #[must_use]
    pub fn without_retries(mut self) -> Self {
        self.max_retries = 0;
        self
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
