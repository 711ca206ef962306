//! Feed retrieval and normalization.
//!
//! This module turns remote RSS/Atom sources into uniform [`Article`]
//! records:
//!
//! - [`parser`] - Low-level feed parsing using the `feed-rs` crate, plus the
//!   per-field fallback chains that normalize heterogeneous feed schemas
//! - [`fetcher`] - HTTP retrieval of a single source with a typed error
//!   taxonomy; failures are reported per source and never cross the fetch
//!   boundary as panics or aborts
//!
//! The fan-out over all registered sources lives one level up, in
//! [`crate::aggregator`].
//!
//! [`Article`]: crate::article::Article

pub mod fetcher;
pub mod parser;

pub use fetcher::{fetch_source, FetchError, SourceFetch};
pub use parser::{normalize_entry, parse_source_feed};
