//! Feed parsing and normalization.
//!
//! `feed-rs` absorbs the RSS 2.0 / Atom schema differences; this module maps
//! its entry model onto [`Article`] with a fixed fallback chain per field,
//! so every entry yields exactly one record and a missing field never
//! surfaces as an error downstream.

use chrono::SecondsFormat;
use feed_rs::model::Entry;
use feed_rs::parser::{self, ParseFeedError};

use crate::article::Article;

/// Parses a raw feed document and normalizes every entry.
///
/// The channel/feed title becomes each article's `source`, falling back to
/// `source_url` when the feed declares no title. Entries are kept in
/// document order; none are dropped or merged.
///
/// # Errors
///
/// Returns the underlying `feed-rs` error when the body is not parseable as
/// an RSS/Atom-family document. The caller decides the recovery policy.
pub fn parse_source_feed(bytes: &[u8], source_url: &str) -> Result<Vec<Article>, ParseFeedError> {
    let feed = parser::parse(bytes)?;
    let feed_title = feed.title.map(|t| t.content);

    let articles = feed
        .entries
        .into_iter()
        .map(|entry| normalize_entry(entry, feed_title.as_deref(), source_url))
        .collect();

    Ok(articles)
}

/// Maps one parsed entry onto the uniform [`Article`] shape.
///
/// Fallback chains:
/// - `content`: full content body, else summary/description, else `""`
/// - `content_snippet`: explicit summary when a separate content body
///   exists, else the first 200 characters of the content text, else `""`
/// - `source`: feed title, else the source URL
/// - `creator`: first author, else first contributor, else `None`
/// - `title` / `link`: empty string when missing, never absent
pub fn normalize_entry(entry: Entry, feed_title: Option<&str>, source_url: &str) -> Article {
    let title = entry.title.map(|t| t.content).unwrap_or_default();
    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .unwrap_or_default();

    let body = entry.content.and_then(|c| c.body);
    let summary = entry.summary.map(|s| s.content);

    // When the entry carries both a content body and a summary, the summary
    // is an explicit snippet and is kept verbatim. Otherwise the snippet is
    // derived from whichever text became `content`, capped at 200 chars.
    let (content, content_snippet) = match (body, summary) {
        (Some(body), Some(summary)) => (body, Some(summary)),
        (Some(body), None) => {
            let snippet = Article::snippet_of(&body);
            (body, Some(snippet))
        }
        (None, Some(summary)) => {
            let snippet = Article::snippet_of(&summary);
            (summary, Some(snippet))
        }
        (None, None) => (String::new(), Some(String::new())),
    };

    let iso_date = entry
        .published
        .or(entry.updated)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true));

    let categories = entry
        .categories
        .into_iter()
        .map(|c| c.label.unwrap_or(c.term))
        .collect();

    let creator = entry
        .authors
        .into_iter()
        .next()
        .or_else(|| entry.contributors.into_iter().next())
        .map(|p| p.name);

    let source = Some(
        feed_title
            .map(|t| t.to_string())
            .unwrap_or_else(|| source_url.to_string()),
    );

    Article {
        title,
        link,
        content,
        content_snippet,
        iso_date,
        categories,
        creator,
        source,
    }
}
