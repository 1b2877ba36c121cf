use std::time::Duration;

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::data::{QueryMode, WordResult};

static DEFAULT_BASE_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("https://api.datamuse.com").expect("default base URL parses"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure talking to the word service. Network errors, non-success statuses,
/// and malformed payloads all collapse into this single kind; the reason is
/// kept in human-readable form for logs.
#[derive(Debug, Clone, Error)]
#[error("word service request failed: {reason}")]
pub struct ServiceFailure {
    reason: String,
}

impl ServiceFailure {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<reqwest::Error> for ServiceFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Where and how to reach the word-relation service.
#[derive(Debug, Clone)]
pub struct WordServiceConfig {
    /// Service root; the `words` endpoint is resolved against it.
    pub base_url: Url,
    /// Budget for one whole call, connect through body.
    pub timeout: Duration,
}

impl Default for WordServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.clone(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl WordServiceConfig {
    #[must_use]
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for a Datamuse-style word-relation endpoint. Clones share the
/// underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct WordClient {
    config: WordServiceConfig,
    http: reqwest::Client,
}

impl WordClient {
    pub fn new() -> Result<Self, ServiceFailure> {
        Self::with_config(WordServiceConfig::default())
    }

    pub fn with_config(config: WordServiceConfig) -> Result<Self, ServiceFailure> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ServiceFailure::new(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { config, http })
    }

    /// Issues one GET against the `words` endpoint with the relation
    /// parameter for `mode` and returns the decoded result list.
    pub async fn lookup(
        &self,
        mode: QueryMode,
        term: &str,
    ) -> Result<Vec<WordResult>, ServiceFailure> {
        let url = self
            .config
            .base_url
            .join("words")
            .map_err(|err| ServiceFailure::new(format!("invalid service URL: {err}")))?;
        debug!(%url, %mode, term, "querying word service");
        let response = self
            .http
            .get(url)
            .query(&[(mode.relation_param(), term)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceFailure::new(format!("service answered {status}")));
        }
        let words = response.json::<Vec<WordResult>>().await?;
        debug!(count = words.len(), "word service answered");
        Ok(words)
    }

    /// Words that rhyme with `term`.
    pub async fn rhymes(&self, term: &str) -> Result<Vec<WordResult>, ServiceFailure> {
        self.lookup(QueryMode::Rhyme, term).await
    }

    /// Words with a meaning similar to `term`.
    pub async fn synonyms(&self, term: &str) -> Result<Vec<WordResult>, ServiceFailure> {
        self.lookup(QueryMode::Synonym, term).await
    }
}
