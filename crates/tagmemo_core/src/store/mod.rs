//! Memo store state container.
//!
//! # Responsibility
//! - Own the ordered in-memory memo collection for one session.
//! - Funnel every mutation through add/update/delete and persist the full
//!   snapshot after each one.
//! - Publish change notifications to subscribers.
//!
//! # Invariants
//! - New memos are prepended; order is insertion order, newest first.
//! - Every committed memo satisfies the task/tag synchronization rule.
//! - No operation surfaces an error; failures degrade to "nothing changed"
//!   (or, for writes, "changed in memory, save reported via event").

pub mod memo_store;
