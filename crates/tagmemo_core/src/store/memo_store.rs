//! Memo store implementation.
//!
//! # Responsibility
//! - Load the collection once at construction from a `BlobRepository`.
//! - Apply add/update/delete and convenience edits, then overwrite the blob.
//!
//! # Invariants
//! - Missing or unreadable blobs load as an empty collection.
//! - Update/delete of an unknown id is a logged no-op.
//! - `created_at` and `id` of a stored memo never change through `update`.

use crate::model::memo::{is_blank_content, Memo, MemoId};
use crate::repo::blob_repo::{BlobError, BlobRepository};
use crate::repo::codec::{decode_memos, encode_memos, CodecError};
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Blob key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "saved_memos";

/// What `add` does with empty/whitespace-only content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlankContentPolicy {
    /// Store it anyway; callers are expected to validate.
    #[default]
    Accept,
    /// Drop the request as a no-op.
    Reject,
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Fixed key of the persisted blob.
    pub storage_key: String,
    pub blank_content: BlankContentPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            blank_content: BlankContentPolicy::default(),
        }
    }
}

/// Snapshot save failure.
#[derive(Debug)]
pub enum StoreError {
    Encode(CodecError),
    Write(BlobError),
}

impl StoreError {
    pub fn kind(&self) -> SaveFailureKind {
        match self {
            Self::Encode(_) => SaveFailureKind::Encode,
            Self::Write(_) => SaveFailureKind::Write,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "{err}"),
            Self::Write(err) => write!(f, "failed to write memo snapshot: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Write(err) => Some(err),
        }
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        Self::Encode(value)
    }
}

impl From<BlobError> for StoreError {
    fn from(value: BlobError) -> Self {
        Self::Write(value)
    }
}

/// Which stage of a save failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFailureKind {
    Encode,
    Write,
}

impl Display for SaveFailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode => write!(f, "encode"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Change notification delivered to subscribers after each mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added { id: MemoId },
    Updated { id: MemoId },
    Deleted { id: MemoId },
    /// The in-memory change stands but the snapshot was not persisted.
    /// The typed error stays available via `MemoStore::last_save_error`.
    SaveFailed {
        kind: SaveFailureKind,
        reason: String,
    },
}

/// Handle returned by `subscribe`.
pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Ordered memo collection bound to one persistence surface.
pub struct MemoStore<R: BlobRepository> {
    repo: R,
    options: StoreOptions,
    memos: Vec<Memo>,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: SubscriptionId,
    last_save_error: Option<StoreError>,
}

impl<R: BlobRepository> MemoStore<R> {
    /// Opens a store with default options.
    pub fn new(repo: R) -> Self {
        Self::open(repo, StoreOptions::default())
    }

    /// Opens a store and loads its full contents from `repo`.
    pub fn open(repo: R, options: StoreOptions) -> Self {
        let memos = load_memos(&repo, &options.storage_key);
        Self {
            repo,
            options,
            memos,
            listeners: BTreeMap::new(),
            next_subscription: 1,
            last_save_error: None,
        }
    }

    /// Current snapshot in store order.
    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    pub fn get(&self, id: MemoId) -> Option<&Memo> {
        self.memos.iter().find(|memo| memo.id == id)
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Error of the most recent save, cleared by the next successful one.
    pub fn last_save_error(&self) -> Option<&StoreError> {
        self.last_save_error.as_ref()
    }

    /// Underlying persistence surface.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Registers a listener for subsequent `StoreEvent`s.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener. Returns `false` for an unknown handle.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Creates a memo from `content` and prepends it.
    ///
    /// Returns the new id, or `None` when `BlankContentPolicy::Reject` drops
    /// blank content.
    pub fn add(&mut self, content: impl Into<String>) -> Option<MemoId> {
        let content = content.into();
        if self.options.blank_content == BlankContentPolicy::Reject && is_blank_content(&content)
        {
            info!("event=memo_add module=store status=skipped reason=blank_content");
            return None;
        }

        let memo = Memo::new(content);
        let id = memo.id;
        self.memos.insert(0, memo);
        info!(
            "event=memo_add module=store status=ok memo_id={} count={}",
            id,
            self.memos.len()
        );
        self.commit(StoreEvent::Added { id });
        Some(id)
    }

    /// Replaces the stored memo with the same id, keeping its position.
    ///
    /// Tags are normalized (trimmed, blanks and duplicates dropped) and the
    /// task/tag rule is applied before committing. `id` and `created_at` of
    /// the stored memo are retained. Returns `false` when no
    /// memo has that id.
    pub fn update(&mut self, mut memo: Memo) -> bool {
        let Some(index) = self.position(memo.id) else {
            warn!(
                "event=memo_update module=store status=skipped reason=not_found memo_id={}",
                memo.id
            );
            return false;
        };

        memo.created_at = self.memos[index].created_at;
        memo.normalize_tags();
        memo.sync_task_tag();
        let id = memo.id;
        self.memos[index] = memo;
        info!("event=memo_update module=store status=ok memo_id={id} index={index}");
        self.commit(StoreEvent::Updated { id });
        true
    }

    /// Removes the memo with `memo.id`. Returns `false` when absent.
    pub fn delete(&mut self, memo: &Memo) -> bool {
        self.delete_by_id(memo.id)
    }

    pub fn delete_by_id(&mut self, id: MemoId) -> bool {
        let Some(index) = self.position(id) else {
            warn!("event=memo_delete module=store status=skipped reason=not_found memo_id={id}");
            return false;
        };

        self.memos.remove(index);
        info!(
            "event=memo_delete module=store status=ok memo_id={} count={}",
            id,
            self.memos.len()
        );
        self.commit(StoreEvent::Deleted { id });
        true
    }

    /// Replaces the body text.
    pub fn set_content(&mut self, id: MemoId, content: impl Into<String>) -> bool {
        let content = content.into();
        self.edit(id, |memo| {
            memo.content = content;
            true
        })
    }

    pub fn set_secret(&mut self, id: MemoId, is_secret: bool) -> bool {
        self.edit(id, |memo| {
            memo.is_secret = is_secret;
            true
        })
    }

    /// Marks or unmarks a memo as a task; the reserved label follows.
    pub fn set_task(&mut self, id: MemoId, is_task: bool) -> bool {
        self.edit(id, |memo| {
            memo.is_task = is_task;
            true
        })
    }

    /// Sets completion. A no-op for non-task memos, since the task rule
    /// forces their flag back to `false`.
    pub fn set_completed(&mut self, id: MemoId, is_completed: bool) -> bool {
        self.edit(id, |memo| {
            memo.is_completed = is_completed;
            true
        })
    }

    /// Appends a trimmed tag. No-op when blank, duplicate, or id unknown.
    pub fn add_tag(&mut self, id: MemoId, tag: &str) -> bool {
        self.edit(id, |memo| memo.add_tag(tag))
    }

    /// Removes a tag. No-op when absent or id unknown.
    pub fn remove_tag(&mut self, id: MemoId, tag: &str) -> bool {
        self.edit(id, |memo| memo.remove_tag(tag))
    }

    fn edit(&mut self, id: MemoId, apply: impl FnOnce(&mut Memo) -> bool) -> bool {
        let Some(mut draft) = self.get(id).cloned() else {
            warn!("event=memo_update module=store status=skipped reason=not_found memo_id={id}");
            return false;
        };
        if !apply(&mut draft) {
            return false;
        }
        draft.normalize_tags();
        draft.sync_task_tag();
        if self.get(id) == Some(&draft) {
            info!("event=memo_update module=store status=skipped reason=unchanged memo_id={id}");
            return false;
        }
        self.update(draft)
    }

    fn position(&self, id: MemoId) -> Option<usize> {
        self.memos.iter().position(|memo| memo.id == id)
    }

    fn commit(&mut self, event: StoreEvent) {
        let failure = self.save().err().map(|err| {
            error!(
                "event=memo_store_save module=store status=error error_code={}_failed error={}",
                err.kind(),
                err
            );
            StoreEvent::SaveFailed {
                kind: err.kind(),
                reason: err.to_string(),
            }
        });
        self.notify(&event);
        if let Some(failure) = failure {
            self.notify(&failure);
        }
    }

    fn save(&mut self) -> Result<(), &StoreError> {
        match self.write_snapshot() {
            Ok(bytes) => {
                info!(
                    "event=memo_store_save module=store status=ok count={} bytes={}",
                    self.memos.len(),
                    bytes
                );
                self.last_save_error = None;
                Ok(())
            }
            Err(err) => Err(&*self.last_save_error.insert(err)),
        }
    }

    fn write_snapshot(&mut self) -> Result<usize, StoreError> {
        let encoded = encode_memos(&self.memos)?;
        self.repo.write(&self.options.storage_key, &encoded)?;
        Ok(encoded.len())
    }

    fn notify(&mut self, event: &StoreEvent) {
        for listener in self.listeners.values_mut() {
            listener(event);
        }
    }
}

/// Reads and decodes the memo blob at `key`.
///
/// Absent, unreadable, or malformed data all yield an empty collection.
pub fn load_memos<R: BlobRepository + ?Sized>(repo: &R, key: &str) -> Vec<Memo> {
    let bytes = match repo.read(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            info!("event=memo_store_load module=store status=skipped reason=missing_key");
            return Vec::new();
        }
        Err(err) => {
            error!(
                "event=memo_store_load module=store status=error error_code=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    match decode_memos(&bytes) {
        Ok(memos) => {
            info!(
                "event=memo_store_load module=store status=ok count={}",
                memos.len()
            );
            memos
        }
        Err(err) => {
            warn!(
                "event=memo_store_load module=store status=error error_code=decode_failed bytes={} error={}",
                bytes.len(),
                err
            );
            Vec::new()
        }
    }
}
