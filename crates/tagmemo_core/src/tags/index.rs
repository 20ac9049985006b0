//! Tag index and substring matching.
//!
//! # Invariants
//! - Vocabulary output is sorted lexicographically and duplicate-free.
//! - Matching is a case-insensitive substring test and never reorders the
//!   universe it is given.

use crate::model::memo::Memo;
use std::collections::BTreeSet;

/// Returns every tag used by any memo, sorted and deduplicated.
pub fn all_tags(memos: &[Memo]) -> Vec<String> {
    memos
        .iter()
        .flat_map(|memo| memo.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Suggests existing tags while a tag is being typed onto a memo.
///
/// Blank `query` yields nothing. Otherwise every `universe` tag not in
/// `excluding` that contains the trimmed query, ignoring case.
pub fn suggest(query: &str, excluding: &[String], universe: &[String]) -> Vec<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let needle = trimmed.to_lowercase();
    universe
        .iter()
        .filter(|tag| !excluding.contains(tag))
        .filter(|tag| contains_ignore_case(tag, &needle))
        .cloned()
        .collect()
}

/// Matches the filter-bar search box against the vocabulary.
///
/// The query is used as typed (not trimmed); an empty query yields nothing.
pub fn search_tags(query: &str, universe: &[String]) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    universe
        .iter()
        .filter(|tag| contains_ignore_case(tag, &needle))
        .cloned()
        .collect()
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use super::{search_tags, suggest};

    fn universe() -> Vec<String> {
        ["Home", "homework", "work"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn suggest_ignores_surrounding_whitespace() {
        let hits = suggest("  HOME ", &[], &universe());
        assert_eq!(hits, vec!["Home".to_string(), "homework".to_string()]);
    }

    #[test]
    fn search_uses_untrimmed_query() {
        assert!(search_tags(" home", &universe()).is_empty());
        assert_eq!(search_tags("ork", &universe()).len(), 2);
    }
}
