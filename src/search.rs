use crate::indexer::IndexedItem;

/// Trimmed, lower-cased form of a raw query. Empty means "not searching".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn root_marker(root_segment: &str) -> String {
    format!("{root_segment}/")
}

fn is_candidate(item: &IndexedItem, marker: &str) -> bool {
    item.search_reference()
        .is_some_and(|reference| reference.contains(marker))
}

fn haystack(item: &IndexedItem) -> String {
    let mut parts = vec![item.label()];
    if let Some(body) = item.body() {
        parts.push(body);
    }
    parts.push(item.source_path());
    parts.push(item.locator());
    parts.join(" ").to_lowercase()
}

pub fn matches_query(item: &IndexedItem, normalized_query: &str) -> bool {
    haystack(item).contains(normalized_query)
}

/// Items under the content root whose text contains `query`, in input order, capped at
/// `max_results`.
pub fn search_items<'a>(
    items: &'a [IndexedItem],
    query: &str,
    root_segment: &str,
    max_results: usize,
) -> Vec<&'a IndexedItem> {
    let query = normalize_query(query);
    if query.is_empty() || max_results == 0 {
        return Vec::new();
    }

    let marker = root_marker(root_segment);
    items
        .iter()
        .filter(|item| is_candidate(item, &marker))
        .filter(|item| matches_query(item, &query))
        .take(max_results)
        .collect()
}
