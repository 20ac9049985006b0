//! Tag vocabulary, suggestion, and chip layout.
//!
//! # Responsibility
//! - Derive the sorted distinct tag vocabulary from a memo snapshot.
//! - Match free-typed text against the vocabulary for suggestions/search.
//! - Break tag chips into rows from fixed item widths.

pub mod flow;
pub mod index;
