//! Memo domain model.
//!
//! # Responsibility
//! - Define the single persisted entity (`Memo`) and its field helpers.
//! - Own the task/tag synchronization rule applied before commits.
//!
//! # Invariants
//! - Every memo is identified by a stable `MemoId` assigned at creation.
//! - `created_at` is written once and never touched by edits.

pub mod memo;
