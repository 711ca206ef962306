//! Per-source HTTP retrieval.
//!
//! One call, one source, one typed outcome. The fetcher itself reports
//! failures as values ([`SourceFetch`]) rather than raising them, so the
//! aggregation layer can flatten a broken feed to an empty contribution
//! without affecting its siblings.

use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use url::form_urlencoded;

use crate::article::Article;
use crate::config::Config;
use crate::feed::parser::parse_source_feed;

/// Errors that can occur while fetching one feed source.
///
/// `Network`, `HttpStatus`, `Timeout` and `ResponseTooLarge` cover the
/// source-unavailable cases; `Parse` covers a body that is not a valid
/// RSS/Atom document. None of these cross the per-source boundary: the
/// aggregator recovers every variant to an empty contribution.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured per-fetch timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the configured size cap
    #[error("Response too large")]
    ResponseTooLarge,
    /// Body could not be parsed as RSS or Atom
    #[error("Parse error: {0}")]
    Parse(String),
}

/// The typed outcome of one source fetch.
///
/// Distinguishes success-with-data from failure-recovered-empty even though
/// the batch contract flattens both into the merged sequence. Keeping the
/// error here keeps per-source diagnostics testable.
#[derive(Debug)]
pub struct SourceFetch {
    /// The source identifier this outcome belongs to.
    pub source: String,
    /// Parsed articles, or the error that emptied this source's contribution.
    pub outcome: Result<Vec<Article>, FetchError>,
}

impl SourceFetch {
    /// Flattens the outcome to the batch contract: articles on success,
    /// empty sequence on any failure.
    pub fn into_articles(self) -> Vec<Article> {
        self.outcome.unwrap_or_default()
    }

    /// True when this source failed and was recovered to empty.
    pub fn is_recovered(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Fetches and normalizes one feed source.
///
/// Retrieves the document (through the configured relay when one is set),
/// parses it, and normalizes every entry. Any failure is captured in the
/// returned [`SourceFetch`] and logged with the failing source; this
/// function never panics and never aborts sibling fetches.
pub async fn fetch_source(client: &reqwest::Client, config: &Config, source: &str) -> SourceFetch {
    let outcome = fetch_inner(client, config, source).await;

    if let Err(e) = &outcome {
        tracing::warn!(
            source = %source,
            error = %e,
            "Feed fetch failed, source contributes no articles"
        );
    }

    SourceFetch {
        source: source.to_string(),
        outcome,
    }
}

/// Builds the request URL, routing through the relay prefix when set.
///
/// The relay is an opaque pass-through transport: the target URL is
/// percent-encoded and appended to the prefix, and the relay is expected to
/// return the target's body unmodified.
fn request_url(relay: Option<&str>, source: &str) -> String {
    match relay {
        Some(prefix) => {
            let encoded: String = form_urlencoded::byte_serialize(source.as_bytes()).collect();
            format!("{prefix}{encoded}")
        }
        None => source.to_string(),
    }
}

async fn fetch_inner(
    client: &reqwest::Client,
    config: &Config,
    source: &str,
) -> Result<Vec<Article>, FetchError> {
    let url = request_url(config.relay.as_deref(), source);

    // One hard timeout over send + body read; these are the only suspension
    // points in the pipeline.
    let bytes = tokio::time::timeout(
        Duration::from_secs(config.fetch_timeout_secs),
        async {
            let response = client.get(&url).send().await.map_err(FetchError::Network)?;

            if !response.status().is_success() {
                return Err(FetchError::HttpStatus(response.status().as_u16()));
            }

            read_limited_bytes(response, config.max_response_bytes).await
        },
    )
    .await
    .map_err(|_| FetchError::Timeout)??;

    parse_source_feed(&bytes, source).map_err(|e| FetchError::Parse(e.to_string()))
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
