//! Case-insensitive substring filtering over lookup lists.

use super::option::{LookupOption, OptionValue};

/// True if `text` contains `query`, ignoring case. An empty query matches.
pub fn matches_query(text: &str, query: &str) -> bool {
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// Entries whose search text contains `query`, in original order.
pub fn filter_options<'a, T: OptionValue>(
    options: &'a [LookupOption<T>],
    query: &str,
) -> Vec<&'a LookupOption<T>> {
    options
        .iter()
        .filter(|option| matches_query(&option.value.search_text(), query))
        .collect()
}
