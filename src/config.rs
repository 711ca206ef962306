//! Static pipeline configuration.
//!
//! The source registry and category table are fixed at process start: the
//! compiled-in defaults cover the stock AI/tech feed set, and an optional
//! TOML file can replace any subset of them. A missing or empty file yields
//! `Config::default()`. Unknown keys are silently ignored by serde, though
//! we log a warning when the file contains potential typos.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::categorize::{CategoryRule, CategoryTable};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

/// Top-level pipeline configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to the compiled-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered feed source registry. Merge order of the aggregate follows
    /// this list, so order is significant.
    pub sources: Vec<String>,

    /// Ordered category table for keyword classification.
    pub categories: CategoryTable,

    /// Optional pass-through relay prefix. When set, each request goes to
    /// `<relay><urlencoded source url>` instead of the source directly.
    /// Transport detail only; response bodies are expected unmodified.
    pub relay: Option<String>,

    /// Hard per-fetch timeout in seconds.
    pub fetch_timeout_secs: u64,

    /// Response body size cap in bytes.
    pub max_response_bytes: usize,

    /// Upper bound on simultaneously in-flight fetches.
    pub max_concurrent_fetches: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            categories: default_categories(),
            relay: None,
            fetch_timeout_secs: 30,
            max_response_bytes: 10 * 1024 * 1024,
            max_concurrent_fetches: 10,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse as a raw table first to warn about unknown keys (typos)
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "sources",
                "categories",
                "relay",
                "fetch_timeout_secs",
                "max_response_bytes",
                "max_concurrent_fetches",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            sources = config.sources.len(),
            categories = config.categories.rules.len(),
            "Loaded configuration"
        );
        Ok(config)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        default_categories()
    }
}

fn default_categories() -> CategoryTable {
    let rule = |name: &str, keywords: &[&str]| CategoryRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    };

    CategoryTable::new(
        vec![
            rule(
                "AI & ML",
                &[
                    "artificial-intelligence",
                    "machine-learning",
                    "ai",
                    "ml",
                    "deep-learning",
                    "neural-networks",
                ],
            ),
            rule("Robotics", &["robotics", "robots", "automation"]),
            rule(
                "Computing",
                &["computing", "computer-science", "algorithms", "programming"],
            ),
            rule("Tech News", &["tech", "technology", "innovation"]),
            rule("HCI", &["human-computer-interaction", "hci", "ui", "ux"]),
            rule("Research", &["research", "academic", "paper", "arxiv"]),
        ],
        "Tech News",
    )
}

fn default_sources() -> Vec<String> {
    [
        // AI & ML specific feeds
        "https://blogs.nvidia.com/feed/",
        "https://theaisummer.com/feed.xml",
        "https://www.kdnuggets.com/feed",
        "https://www.marktechpost.com/feed/",
        "https://machinelearningmastery.com/feed/",
        "https://blog.paperspace.com/rss/",
        "https://www.aiweirdness.com/rss/",
        "https://huggingface.co/blog/feed.xml",
        "https://openai.com/blog/rss/",
        "https://deepmind.com/blog/feed/basic/",
        "https://www.artificialintelligence-news.com/feed/",
        "https://stability.ai/blog?format=rss",
        "https://blog.eleuther.ai/index.xml",
        "https://www.together.xyz/blog?format=rss",
        "https://neptune.ai/blog/feed",
        // Academic & research
        "https://arxiv.org/rss/cs.CL",
        "https://arxiv.org/rss/cs.CV",
        "https://arxiv.org/rss/cs.LG",
        "https://arxiv.org/rss/stat.ML",
        "https://bair.berkeley.edu/blog/feed.xml",
        "https://crfm.stanford.edu/feed",
        "https://blog.ml.cmu.edu/feed",
        "https://www.nature.com/subjects/machine-learning.rss",
        // Tech news & analysis
        "https://techmeme.com/feed.xml",
        "https://feeds.arstechnica.com/arstechnica/index",
        "https://www.engadget.com/rss.xml",
        "https://theverge.com/rss/index.xml",
        "https://www.wired.com/feed/category/business/latest/rss",
        "https://rss.nytimes.com/services/xml/rss/nyt/Technology.xml",
        "https://www.technologyreview.com/feed/",
        "https://www.zdnet.com/topic/artificial-intelligence/rss.xml",
        "https://venturebeat.com/category/ai/feed/",
        "https://www.theguardian.com/technology/artificialintelligenceai/rss",
        "https://www.sciencedaily.com/rss/computers_math/artificial_intelligence.xml",
        // Industry & applications
        "https://spectrum.ieee.org/feeds/topic/artificial-intelligence.rss",
        "https://insidebigdata.com/feed",
        "https://www.datanami.com/feed/",
        "https://blog.langchain.dev/rss/",
        "https://www.assemblyai.com/blog/rss/",
        "https://developer.nvidia.com/blog/feed",
        // MIT feeds
        "https://news.mit.edu/topic/mitartificial-intelligence2-rss.xml",
        "https://news.mit.edu/rss/topic/artificial-intelligence-machine-learning",
        "https://news.mit.edu/rss/topic/robotics",
        "https://news.mit.edu/rss/topic/algorithms",
        "https://news.mit.edu/rss/topic/computing",
        "https://news.mit.edu/rss/topic/human-computer-interaction",
        "https://news.mit.edu/topic/mitmachine-learning-rss.xml",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
