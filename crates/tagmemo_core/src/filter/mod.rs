//! Filter/group engine.
//!
//! # Responsibility
//! - Decide which memos are visible under a filter configuration.
//! - Bucket visible memos by local calendar day of creation.
//! - Hold include/exclude tag selection state for the filter bar.
//!
//! # Invariants
//! - Engine functions are pure over a store snapshot; nothing is cached.
//! - Store order is preserved inside each day group.
//! - Selection helpers keep include and exclude sets disjoint.

pub mod engine;
pub mod selection;
