//! Include/exclude tag selection for the filter bar.
//!
//! A tag is in at most one of the two sets at any time: selecting it on one
//! side deselects it on the other.

use super::engine::MemoFilter;
use crate::model::memo::normalize_tag;

impl MemoFilter {
    /// Flips positive selection of `tag`.
    ///
    /// Returns whether the tag is included afterwards.
    pub fn toggle_include(&mut self, tag: &str) -> bool {
        if self.include_tags.remove(tag) {
            return false;
        }
        self.exclude_tags.remove(tag);
        self.include_tags.insert(tag.to_string());
        true
    }

    /// Flips negative selection of `tag`.
    ///
    /// Returns whether the tag is excluded afterwards.
    pub fn toggle_exclude(&mut self, tag: &str) -> bool {
        if self.exclude_tags.remove(tag) {
            return false;
        }
        self.include_tags.remove(tag);
        self.exclude_tags.insert(tag.to_string());
        true
    }

    /// Includes free-typed text from the tag search box.
    ///
    /// The text is trimmed; blank input or an already-included tag is a
    /// no-op.
    pub fn include_typed(&mut self, raw: &str) -> bool {
        let Some(tag) = normalize_tag(raw) else {
            return false;
        };
        if self.include_tags.contains(&tag) {
            return false;
        }
        self.exclude_tags.remove(&tag);
        self.include_tags.insert(tag);
        true
    }

    /// Excludes free-typed text, mirroring `include_typed`.
    pub fn exclude_typed(&mut self, raw: &str) -> bool {
        let Some(tag) = normalize_tag(raw) else {
            return false;
        };
        if self.exclude_tags.contains(&tag) {
            return false;
        }
        self.include_tags.remove(&tag);
        self.exclude_tags.insert(tag);
        true
    }

    /// Drops every positive and negative tag selection.
    pub fn clear_tags(&mut self) {
        self.include_tags.clear();
        self.exclude_tags.clear();
    }

    /// Returns whether any tag selection is active.
    pub fn has_tag_selection(&self) -> bool {
        !self.include_tags.is_empty() || !self.exclude_tags.is_empty()
    }
}
