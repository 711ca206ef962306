//! Fan-out/fan-in aggregation over the registered feed sources.
//!
//! One refresh cycle issues a fetch per source concurrently (bounded by
//! `max_concurrent_fetches`), waits for all of them, and concatenates the
//! per-source results in source-list order. Completion timing never affects
//! merge order. There is no caching and no delta fetch; every cycle repeats
//! the full fan-out.

use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::article::Article;
use crate::config::Config;
use crate::feed::fetcher::{fetch_source, SourceFetch};

/// The aggregation orchestrator.
///
/// Holds the immutable configuration, a shared HTTP client, and the
/// "currently refreshing" signal. Cheap to share behind an `Arc`; all
/// operations take `&self`.
pub struct Aggregator {
    client: reqwest::Client,
    config: Arc<Config>,
    in_flight: AtomicUsize,
}

impl Aggregator {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Like [`new`](Self::new) with a caller-supplied client, e.g. one with
    /// a custom user agent or proxy settings.
    pub fn with_client(config: Config, client: reqwest::Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True while at least one refresh cycle is in flight.
    ///
    /// A UI hint for disabling refresh triggers and rendering a loading
    /// state, not a lock: callers that race anyway get overlapping cycles,
    /// each producing an independent merged result.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Fetches every registered source and returns the merged articles.
    ///
    /// Failed sources contribute an empty sequence; this never returns an
    /// error and never aborts on a broken feed. Merge order is source-list
    /// order, then entry order within each source.
    pub async fn refresh_all(&self) -> Vec<Article> {
        merge(self.refresh_detailed().await)
    }

    /// [`refresh_all`](Self::refresh_all) keeping the typed per-source
    /// outcomes, for callers that want the diagnostic trail.
    pub async fn refresh_detailed(&self) -> Vec<SourceFetch> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = RefreshGuard {
            in_flight: &self.in_flight,
        };
        self.run_cycle().await
    }

    /// Manual refresh trigger with an explicit overlap policy: declines
    /// (returns `None`) when another cycle is already in flight, so a
    /// caller wiring this to a button gets at most one cycle at a time.
    pub async fn try_refresh(&self) -> Option<Vec<Article>> {
        if self
            .in_flight
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Refresh already in flight, ignoring trigger");
            return None;
        }
        let _guard = RefreshGuard {
            in_flight: &self.in_flight,
        };
        Some(merge(self.run_cycle().await))
    }

    async fn run_cycle(&self) -> Vec<SourceFetch> {
        let total = self.config.sources.len();
        tracing::info!(sources = total, "Refreshing all feed sources");

        // `buffered` (not `buffer_unordered`) keeps results in source-list
        // order regardless of which fetch completes first.
        let fetches: Vec<_> = self
            .config
            .sources
            .iter()
            .map(|source| fetch_source(&self.client, &self.config, source))
            .collect();
        let results: Vec<SourceFetch> = stream::iter(fetches)
            .buffered(self.config.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_recovered()).count();
        tracing::info!(
            sources = total,
            failed = failed,
            "Refresh cycle complete"
        );

        results
    }
}

/// Flattens per-source outcomes into the merged article sequence,
/// preserving the order of `results`.
pub fn merge(results: Vec<SourceFetch>) -> Vec<Article> {
    results
        .into_iter()
        .flat_map(SourceFetch::into_articles)
        .collect()
}

/// Clears the in-flight count even when a cycle's future is dropped.
struct RefreshGuard<'a> {
    in_flight: &'a AtomicUsize,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::fetcher::FetchError;
    use pretty_assertions::assert_eq;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            link: String::new(),
            content: String::new(),
            content_snippet: None,
            iso_date: None,
            categories: Vec::new(),
            creator: None,
            source: None,
        }
    }

    #[test]
    fn test_merge_preserves_source_then_entry_order() {
        let results = vec![
            SourceFetch {
                source: "a".to_string(),
                outcome: Ok(vec![article("a1"), article("a2")]),
            },
            SourceFetch {
                source: "b".to_string(),
                outcome: Ok(vec![article("b1")]),
            },
        ];

        let titles: Vec<String> = merge(results).into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn test_merge_flattens_failures_to_empty() {
        let results = vec![
            SourceFetch {
                source: "a".to_string(),
                outcome: Ok(vec![article("a1")]),
            },
            SourceFetch {
                source: "b".to_string(),
                outcome: Err(FetchError::HttpStatus(500)),
            },
            SourceFetch {
                source: "c".to_string(),
                outcome: Ok(vec![article("c1")]),
            },
        ];

        let titles: Vec<String> = merge(results).into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["a1", "c1"]);
    }

    #[tokio::test]
    async fn test_refresh_with_no_sources_is_empty_and_resets_flag() {
        let config = Config {
            sources: Vec::new(),
            ..Config::default()
        };
        let agg = Aggregator::new(config);

        assert!(!agg.is_refreshing());
        let articles = agg.refresh_all().await;
        assert!(articles.is_empty());
        assert!(!agg.is_refreshing());
    }
}
