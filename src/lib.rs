//! newswire — a feed aggregation and categorization pipeline.
//!
//! Fetches articles from many RSS/Atom sources concurrently, normalizes
//! them into a uniform [`Article`] record, assigns a topical category by
//! keyword matching, and filters the merged collection by search term
//! and/or category. Designed to run inside a long-lived host process (a UI
//! layer, a bot, a service) that consumes the in-memory results; nothing is
//! persisted.
//!
//! # Architecture
//!
//! - [`config`] - Immutable source registry, category table, relay, limits
//! - [`feed`] - Per-source HTTP fetch and `feed-rs` based normalization
//! - [`aggregator`] - Concurrent fan-out over all sources, ordered fan-in
//! - [`categorize`] - First-match-wins keyword classifier
//! - [`query`] - Search/category filter over the merged collection
//!
//! # Failure model
//!
//! A broken feed never degrades the rest of the aggregate: every network or
//! parse failure is recovered to an empty per-source contribution, logged
//! via `tracing`, and the batch operation always returns a (possibly
//! smaller) collection.
//!
//! # Example
//!
//! ```ignore
//! use newswire::{Aggregator, Config, filter_articles};
//!
//! let config = Config::default();
//! let aggregator = Aggregator::new(config);
//!
//! let articles = aggregator.refresh_all().await;
//! let hits = filter_articles(
//!     &articles,
//!     "transformer",
//!     Some("AI & ML"),
//!     &aggregator.config().categories,
//! );
//! ```

pub mod aggregator;
pub mod article;
pub mod categorize;
pub mod config;
pub mod feed;
pub mod query;

pub use aggregator::Aggregator;
pub use article::{Article, SNIPPET_MAX_CHARS};
pub use categorize::{CategoryRule, CategoryTable, MatchMode};
pub use config::{Config, ConfigError};
pub use feed::{FetchError, SourceFetch};
pub use query::filter_articles;
