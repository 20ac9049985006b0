//! Persistence surface for the memo collection.
//!
//! # Responsibility
//! - Define the opaque key/blob contract the store persists through.
//! - Provide SQLite-backed and in-memory implementations.
//! - Encode/decode the full memo sequence to one self-describing blob.
//!
//! # Invariants
//! - Writes overwrite the whole value for a key; there is no append format.
//! - Decoding tolerates records that predate the secret/task/completed flags.

pub mod blob_repo;
pub mod codec;
