//! Memo entity.
//!
//! # Responsibility
//! - Define the canonical record captured by the user.
//! - Provide tag mutation helpers that enforce trim/non-empty/distinct rules.
//! - Provide the task/tag synchronization step run before every commit.
//!
//! # Invariants
//! - `id` is stable and never reused for another memo.
//! - `tags` holds distinct, non-empty, trimmed strings in insertion order.
//! - `normalize_tags` restores the tag rule for hand-built tag lists.
//! - After `sync_task_tag`, `is_task` <=> `tags` contains `TASK_TAG` exactly
//!   once, and `is_completed` is `false` for non-task memos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a memo.
pub type MemoId = Uuid;

/// Reserved label kept in sync with `Memo::is_task`.
pub const TASK_TAG: &str = "タスク";

/// A single user note.
///
/// Wire names follow the persisted blob layout (`date`, `isSecret`, ...).
/// The three flags decode as `false` when absent so records written before
/// they existed still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: MemoId,
    /// Free-text body.
    pub content: String,
    /// Creation instant. Serialized as `date`.
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    /// Display-ordered labels.
    pub tags: Vec<String>,
    /// Visibility flag only; not a security boundary.
    #[serde(default)]
    pub is_secret: bool,
    #[serde(default)]
    pub is_task: bool,
    /// Meaningful only when `is_task` is set.
    #[serde(default)]
    pub is_completed: bool,
}

impl Memo {
    /// Creates a memo stamped with a fresh id and the current instant.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), content, Utc::now())
    }

    /// Creates a memo with caller-provided identity and timestamp.
    ///
    /// Used by import paths and tests where both already exist.
    pub fn with_id(id: MemoId, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            created_at,
            tags: Vec::new(),
            is_secret: false,
            is_task: false,
            is_completed: false,
        }
    }

    /// Returns whether the memo carries `tag` verbatim.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    /// Appends a tag after trimming.
    ///
    /// Returns `false` (and changes nothing) when the trimmed value is empty
    /// or already present.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let Some(tag) = normalize_tag(raw) else {
            return false;
        };
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes the first occurrence of `tag`.
    ///
    /// Removing `TASK_TAG` from a task is allowed here; `sync_task_tag`
    /// restores it before the next commit.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|existing| existing == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    /// Trims every tag, drops blank ones, and keeps only the first of any
    /// duplicates. Order of the survivors is preserved.
    pub fn normalize_tags(&mut self) {
        let mut kept: Vec<String> = Vec::with_capacity(self.tags.len());
        for raw in self.tags.drain(..) {
            if let Some(tag) = normalize_tag(&raw) {
                if !kept.contains(&tag) {
                    kept.push(tag);
                }
            }
        }
        self.tags = kept;
    }

    /// Reconciles the reserved task label with `is_task`.
    pub fn sync_task_tag(&mut self) {
        if self.is_task {
            let mut seen = false;
            self.tags.retain(|tag| {
                if tag != TASK_TAG {
                    return true;
                }
                let keep = !seen;
                seen = true;
                keep
            });
            if !seen {
                self.tags.push(TASK_TAG.to_string());
            }
        } else {
            self.tags.retain(|tag| tag != TASK_TAG);
            self.is_completed = false;
        }
    }

    /// Returns whether this is a task that has been checked off.
    pub fn is_completed_task(&self) -> bool {
        self.is_task && self.is_completed
    }

    /// Returns whether the body is empty after trimming.
    pub fn is_blank(&self) -> bool {
        is_blank_content(&self.content)
    }
}

/// Normalizes one free-typed tag value.
///
/// Returns `None` when nothing remains after trimming. Case is preserved.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Returns whether `content` is empty or whitespace-only.
pub fn is_blank_content(content: &str) -> bool {
    content.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{normalize_tag, Memo, TASK_TAG};

    #[test]
    fn normalize_tag_trims_and_rejects_blank() {
        assert_eq!(normalize_tag("  work \n").as_deref(), Some("work"));
        assert_eq!(normalize_tag(" \t "), None);
        assert_eq!(normalize_tag("Work").as_deref(), Some("Work"));
    }

    #[test]
    fn sync_task_tag_collapses_duplicate_task_labels() {
        let mut memo = Memo::new("dup");
        memo.is_task = true;
        memo.tags = vec![
            TASK_TAG.to_string(),
            "home".to_string(),
            TASK_TAG.to_string(),
        ];

        memo.sync_task_tag();

        assert_eq!(memo.tags, vec![TASK_TAG.to_string(), "home".to_string()]);
    }

    #[test]
    fn normalize_tags_trims_drops_blank_and_keeps_first_duplicate() {
        let mut memo = Memo::new("messy");
        memo.tags = vec![
            " home".to_string(),
            "work".to_string(),
            "".to_string(),
            "home ".to_string(),
            "\t".to_string(),
        ];

        memo.normalize_tags();

        assert_eq!(memo.tags, vec!["home".to_string(), "work".to_string()]);
    }

    #[test]
    fn remove_tag_only_drops_first_match() {
        let mut memo = Memo::new("x");
        memo.tags = vec!["a".to_string(), "b".to_string()];

        assert!(memo.remove_tag("a"));
        assert!(!memo.remove_tag("a"));
        assert_eq!(memo.tags, vec!["b".to_string()]);
    }
}
