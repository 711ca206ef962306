//! Search and category filtering over a merged article collection.

use crate::article::Article;
use crate::categorize::CategoryTable;

/// Filters articles by free-text search term and/or category.
///
/// - `search_term`: case-insensitive substring match against title OR
///   content; an empty term matches everything.
/// - `category`: when `Some`, keeps only articles whose computed label
///   equals it. The label is recomputed per call via
///   [`CategoryTable::categorize`] — it is never cached on the record.
///
/// Both predicates are ANDed. Pure and stable: input order is preserved,
/// the input is untouched.
pub fn filter_articles(
    articles: &[Article],
    search_term: &str,
    category: Option<&str>,
    table: &CategoryTable,
) -> Vec<Article> {
    let needle = search_term.to_lowercase();

    articles
        .iter()
        .filter(|article| {
            let matches_search = needle.is_empty()
                || article.title.to_lowercase().contains(&needle)
                || article.content.to_lowercase().contains(&needle);

            let matches_category =
                category.map_or(true, |wanted| table.categorize(article) == wanted);

            matches_search && matches_category
        })
        .cloned()
        .collect()
}
