//! Core memo model, store, and filter engine for Tagmemo.
//! This crate is the single source of truth for memo invariants; callers
//! render what it returns and route every edit through `MemoStore`.

pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod tags;

pub use filter::engine::{filter_memos, group_by_day, group_by_day_in, DayGroup, MemoFilter};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::memo::{is_blank_content, normalize_tag, Memo, MemoId, TASK_TAG};
pub use repo::blob_repo::{
    BlobError, BlobRepository, BlobResult, InMemoryBlobRepository, SqliteBlobRepository,
};
pub use repo::codec::{decode_memos, encode_memos, CodecError};
pub use store::memo_store::{
    load_memos, BlankContentPolicy, MemoStore, SaveFailureKind, StoreError, StoreEvent,
    StoreOptions, SubscriptionId, DEFAULT_STORAGE_KEY,
};
pub use tags::flow::{flow_rows, flow_rows_uniform, ESTIMATED_CHIP_WIDTH};
pub use tags::index::{all_tags, search_tags, suggest};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
