//! Memo visibility predicate and day grouping.

use crate::model::memo::Memo;
use chrono::{Local, NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Filter configuration supplied by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoFilter {
    /// Every tag here must be on the memo.
    pub include_tags: BTreeSet<String>,
    /// No tag here may be on the memo.
    pub exclude_tags: BTreeSet<String>,
    pub show_secret: bool,
    /// When `false`, completed tasks are hidden. Other memos are unaffected.
    pub show_completed_tasks: bool,
}

impl Default for MemoFilter {
    fn default() -> Self {
        Self {
            include_tags: BTreeSet::new(),
            exclude_tags: BTreeSet::new(),
            show_secret: false,
            show_completed_tasks: true,
        }
    }
}

impl MemoFilter {
    /// Returns whether `memo` is visible under this configuration.
    ///
    /// A tag present in both sets makes every memo holding it invisible;
    /// the selection helpers never produce that state.
    pub fn matches(&self, memo: &Memo) -> bool {
        let has_all_included = self.include_tags.iter().all(|tag| memo.has_tag(tag));
        let has_no_excluded = !self.exclude_tags.iter().any(|tag| memo.has_tag(tag));
        let passes_secret = self.show_secret || !memo.is_secret;
        let passes_completed = self.show_completed_tasks || !memo.is_completed_task();

        has_all_included && has_no_excluded && passes_secret && passes_completed
    }
}

/// Memos created on one local calendar day, in store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup<'a> {
    pub day: NaiveDate,
    pub memos: Vec<&'a Memo>,
}

/// Returns the memos visible under `filter`, in store order.
pub fn filter_memos<'a>(memos: &'a [Memo], filter: &MemoFilter) -> Vec<&'a Memo> {
    memos.iter().filter(|memo| filter.matches(memo)).collect()
}

/// Groups visible memos by the viewer's local day, most recent day first.
pub fn group_by_day<'a>(memos: &'a [Memo], filter: &MemoFilter) -> Vec<DayGroup<'a>> {
    group_by_day_in(memos, filter, &Local)
}

/// Groups visible memos by calendar day in `tz`, most recent day first.
pub fn group_by_day_in<'a, Tz: TimeZone>(
    memos: &'a [Memo],
    filter: &MemoFilter,
    tz: &Tz,
) -> Vec<DayGroup<'a>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&'a Memo>> = BTreeMap::new();
    for memo in filter_memos(memos, filter) {
        let day = memo.created_at.with_timezone(tz).date_naive();
        buckets.entry(day).or_default().push(memo);
    }

    buckets
        .into_iter()
        .rev()
        .map(|(day, memos)| DayGroup { day, memos })
        .collect()
}
