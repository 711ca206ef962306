use serde::Serialize;

/// Maximum length, in characters, of a derived content snippet.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// A normalized article produced from one feed entry.
///
/// Every field that the source may omit is defaulted rather than left
/// absent: `title`, `link`, and `content` are always present (possibly
/// empty strings) so downstream string operations never have to handle a
/// missing field. The computed category label is deliberately NOT stored
/// here — it is recomputed from `(title, content)` on every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Entry title; empty string when the source omits it.
    pub title: String,
    /// Entry permalink; treated as a display identifier, not enforced unique.
    pub link: String,
    /// Full body or description text; may be empty.
    pub content: String,
    /// Short preview. Derived from `content` (truncated to
    /// [`SNIPPET_MAX_CHARS`] characters) when the source lacks an explicit
    /// summary.
    pub content_snippet: Option<String>,
    /// Publication timestamp in whatever string form the source provided.
    /// Not guaranteed to parse as a strict timestamp.
    pub iso_date: Option<String>,
    /// Source-declared tags, distinct from the computed category label.
    pub categories: Vec<String>,
    /// Author attribution, when the source declares one.
    pub creator: Option<String>,
    /// Human-readable feed title, falling back to the feed URL when the
    /// channel declares no title.
    pub source: Option<String>,
}

impl Article {
    /// Truncates `text` to at most [`SNIPPET_MAX_CHARS`] characters.
    ///
    /// Raw character-count truncation with no word-boundary awareness —
    /// a snippet may end mid-word. Counting `char`s (not bytes) keeps the
    /// cut on a UTF-8 boundary.
    pub fn snippet_of(text: &str) -> String {
        if text.chars().count() <= SNIPPET_MAX_CHARS {
            text.to_string()
        } else {
            text.chars().take(SNIPPET_MAX_CHARS).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_snippet_short_text_unchanged() {
        assert_eq!(Article::snippet_of("hello"), "hello");
    }

    #[test]
    fn test_snippet_exactly_at_limit_unchanged() {
        let text = "a".repeat(SNIPPET_MAX_CHARS);
        assert_eq!(Article::snippet_of(&text), text);
    }

    #[test]
    fn test_snippet_truncates_to_first_200_chars() {
        let text = "x".repeat(500);
        let snippet = Article::snippet_of(&text);
        assert_eq!(snippet.chars().count(), 200);
        assert_eq!(snippet, text.chars().take(200).collect::<String>());
    }

    #[test]
    fn test_snippet_counts_chars_not_bytes() {
        // 300 multibyte chars: truncation must land on a char boundary
        let text = "é".repeat(300);
        let snippet = Article::snippet_of(&text);
        assert_eq!(snippet.chars().count(), 200);
    }

    proptest! {
        #[test]
        fn prop_snippet_never_exceeds_limit(text in ".*") {
            let snippet = Article::snippet_of(&text);
            prop_assert!(snippet.chars().count() <= SNIPPET_MAX_CHARS);
        }

        #[test]
        fn prop_snippet_is_prefix(text in ".*") {
            let snippet = Article::snippet_of(&text);
            prop_assert!(text.starts_with(&snippet));
        }
    }
}
