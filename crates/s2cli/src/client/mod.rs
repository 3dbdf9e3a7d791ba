//! Semantic Scholar API client.
//!
//! Provides an HTTP client with:
//! - Connection pooling via reqwest
//! - A single middleware retry for network-level failures
//! - A bounded 429 retry loop with a live countdown on stderr
//!
//! One request is in flight at a time; batch commands go through the API's
//! own batch endpoints rather than client-side fan-out.

mod middleware;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, fields};
use crate::error::{ClientError, ClientResult};
use crate::request::{self, ApiRequest, CitationDirection, Method, QueryFilters};

use middleware::TransportErrorStrategy;

/// Delay before the single network-failure retry.
const TRANSPORT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Semantic Scholar API client.
#[derive(Clone)]
pub struct SemanticScholarClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Endpoint URLs and retry policy.
    config: Config,
}

impl SemanticScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().expect("valid content-type header"),
        );

        if let Some(ref key) = config.api_key {
            headers.insert("x-api-key", key.parse()?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        // Exactly one retry for transport errors; received responses are
        // never retried here (see execute for 429 handling).
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(TRANSPORT_RETRY_DELAY, TRANSPORT_RETRY_DELAY)
            .build_with_max_retries(1);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                retry_policy,
                TransportErrorStrategy,
            ))
            .build();

        Ok(Self { client, config })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.config.has_api_key()
    }

    /// Search for papers.
    pub async fn search_papers(
        &self,
        query: &str,
        filters: &QueryFilters,
        limit: i64,
        offset: i64,
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req = request::search_papers(&self.config, query, filters, limit, offset, user_fields);
        self.execute(&req).await
    }

    /// Get a single paper by ID.
    pub async fn get_paper(
        &self,
        paper_id: &str,
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req = request::get_paper(&self.config, paper_id, user_fields, fields::PAPER)?;
        self.execute(&req).await
    }

    /// Get a single paper with the BibTeX-optimized field set.
    pub async fn get_paper_for_bibtex(&self, paper_id: &str) -> ClientResult<serde_json::Value> {
        let req = request::get_paper(&self.config, paper_id, None, fields::BIBTEX)?;
        self.execute(&req).await
    }

    /// Get multiple papers via the batch endpoint.
    pub async fn get_papers_batch(
        &self,
        paper_ids: &[String],
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req =
            request::get_papers_batch(&self.config, paper_ids, user_fields, fields::PAPER)?;
        self.execute(&req).await
    }

    /// Get multiple papers with the BibTeX-optimized field set.
    pub async fn get_papers_batch_for_bibtex(
        &self,
        paper_ids: &[String],
    ) -> ClientResult<serde_json::Value> {
        let req = request::get_papers_batch(&self.config, paper_ids, None, fields::BIBTEX)?;
        self.execute(&req).await
    }

    /// Get papers citing a paper.
    pub async fn get_citations(
        &self,
        paper_id: &str,
        limit: i64,
        offset: i64,
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req = request::get_citation_list(
            &self.config,
            paper_id,
            CitationDirection::Citations,
            limit,
            offset,
            user_fields,
        )?;
        self.execute(&req).await
    }

    /// Get papers cited by a paper.
    pub async fn get_references(
        &self,
        paper_id: &str,
        limit: i64,
        offset: i64,
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req = request::get_citation_list(
            &self.config,
            paper_id,
            CitationDirection::References,
            limit,
            offset,
            user_fields,
        )?;
        self.execute(&req).await
    }

    /// Get recommendations seeded by a paper.
    pub async fn get_recommendations(
        &self,
        paper_id: &str,
        pool: &str,
        limit: i64,
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req = request::get_recommendations(&self.config, paper_id, pool, limit, user_fields)?;
        self.execute(&req).await
    }

    /// Get recommendations from positive and negative example papers.
    pub async fn get_recommendations_multi(
        &self,
        positive_ids: &[String],
        negative_ids: &[String],
        limit: i64,
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req = request::get_recommendations_multi(
            &self.config,
            positive_ids,
            negative_ids,
            limit,
            user_fields,
        )?;
        self.execute(&req).await
    }

    /// Search for authors by name.
    pub async fn search_authors(
        &self,
        query: &str,
        limit: i64,
        offset: i64,
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req = request::search_authors(&self.config, query, limit, offset, user_fields);
        self.execute(&req).await
    }

    /// Get an author by ID.
    pub async fn get_author(
        &self,
        author_id: &str,
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req = request::get_author(&self.config, author_id, user_fields);
        self.execute(&req).await
    }

    /// Get papers by an author.
    pub async fn get_author_papers(
        &self,
        author_id: &str,
        limit: i64,
        offset: i64,
        user_fields: Option<&str>,
    ) -> ClientResult<serde_json::Value> {
        let req =
            request::get_author_papers(&self.config, author_id, limit, offset, user_fields);
        self.execute(&req).await
    }

    /// List available dataset releases.
    pub async fn list_releases(&self) -> ClientResult<serde_json::Value> {
        self.execute(&request::list_releases(&self.config)).await
    }

    /// Get datasets in a release.
    pub async fn get_release(&self, release_id: &str) -> ClientResult<serde_json::Value> {
        self.execute(&request::get_release(&self.config, release_id)).await
    }

    /// Get download links for a dataset.
    pub async fn get_dataset_links(
        &self,
        release_id: &str,
        name: &str,
    ) -> ClientResult<serde_json::Value> {
        self.execute(&request::get_dataset_links(&self.config, release_id, name)).await
    }

    /// Execute a request, retrying on 429 within the configured budget.
    ///
    /// Non-429 error statuses surface immediately as `Api { status, body }`.
    /// The countdown between 429 retries goes to stderr so piped stdout
    /// stays clean.
    pub async fn execute(&self, request: &ApiRequest) -> ClientResult<serde_json::Value> {
        let mut retry = RetryState::new(self.config.max_retries, self.config.default_backoff);

        loop {
            let response = self.send(request).await?;
            let status = response.status();

            if status.as_u16() == 429 {
                let hint = parse_retry_after(&response);
                let Some(delay) = retry.next_delay(hint) else {
                    return Err(ClientError::RateLimitExceeded { attempts: retry.attempts() });
                };
                tracing::warn!(
                    attempt = retry.attempts(),
                    delay_secs = delay.as_secs(),
                    "rate limited, waiting before retry"
                );
                wait_with_countdown(delay).await;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::api(status.as_u16(), body));
            }

            return response.json::<serde_json::Value>().await.map_err(ClientError::from);
        }
    }

    /// Send one request. Transport errors get a single middleware retry.
    async fn send(&self, request: &ApiRequest) -> ClientResult<reqwest::Response> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => {
                let body = request.body.as_ref().map(serde_json::to_string).transpose()?;
                self.client.post(&request.url).body(body.unwrap_or_default())
            }
        };

        builder.query(&request.params).send().await.map_err(ClientError::from)
    }
}

impl std::fmt::Debug for SemanticScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScholarClient")
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}

/// Retry bookkeeping for a single execute call.
///
/// Discarded after success or exhaustion; nothing carries over between
/// requests.
#[derive(Debug)]
struct RetryState {
    retries_used: u32,
    budget: u32,
    fallback: Duration,
}

impl RetryState {
    fn new(budget: u32, fallback: Duration) -> Self {
        Self { retries_used: 0, budget, fallback }
    }

    /// Requests made so far, including the initial one.
    fn attempts(&self) -> u32 {
        self.retries_used + 1
    }

    /// Delay before the next retry, or None when the budget is spent.
    fn next_delay(&mut self, hint: Option<Duration>) -> Option<Duration> {
        if self.retries_used >= self.budget {
            return None;
        }
        self.retries_used += 1;
        Some(hint.unwrap_or(self.fallback))
    }
}

/// Parse an integer Retry-After header, if present and well-formed.
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Sleep through a retry delay with a per-second countdown on stderr.
///
/// indicatif draws to stderr and hides itself when stderr is not a TTY, so
/// piped output never sees the countdown.
async fn wait_with_countdown(delay: Duration) {
    let secs = delay.as_secs();
    if secs == 0 {
        tokio::time::sleep(delay).await;
        return;
    }

    let bar = ProgressBar::new(secs);
    bar.set_style(
        ProgressStyle::with_template("rate limited, retrying in {msg}s {bar:20}")
            .expect("valid progress template"),
    );

    for remaining in (1..=secs).rev() {
        bar.set_message(remaining.to_string());
        tokio::time::sleep(Duration::from_secs(1)).await;
        bar.inc(1);
    }
    tokio::time::sleep(delay - Duration::from_secs(secs)).await;
    bar.finish_and_clear();
}
