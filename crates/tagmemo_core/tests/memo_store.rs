use std::cell::RefCell;
use std::rc::Rc;
use tagmemo_core::{
    all_tags, encode_memos, BlobRepository, InMemoryBlobRepository, Memo, MemoStore, StoreEvent,
    StoreOptions, DEFAULT_STORAGE_KEY, TASK_TAG,
};
use uuid::Uuid;

fn store_with(contents: &[&str]) -> MemoStore<InMemoryBlobRepository> {
    let mut store = MemoStore::new(InMemoryBlobRepository::new());
    for content in contents {
        store.add(*content);
    }
    store
}

fn reopen(store: &MemoStore<InMemoryBlobRepository>) -> MemoStore<InMemoryBlobRepository> {
    MemoStore::new(store.repo().clone())
}

#[test]
fn missing_blob_loads_empty_store() {
    let store = MemoStore::new(InMemoryBlobRepository::new());
    assert!(store.is_empty());
}

#[test]
fn corrupt_blob_loads_empty_store() {
    let repo = InMemoryBlobRepository::new().with_entry(DEFAULT_STORAGE_KEY, "not json{");
    let store = MemoStore::new(repo);
    assert!(store.is_empty());
}

#[test]
fn add_prepends_and_persists() {
    let mut store = store_with(&["first"]);
    let before = store.len();

    let id = store.add("second").unwrap();

    assert_eq!(store.len(), before + 1);
    assert_eq!(store.memos()[0].id, id);
    assert_eq!(store.memos()[0].content, "second");
    assert_eq!(store.memos()[1].content, "first");

    let reloaded = reopen(&store);
    assert_eq!(reloaded.memos(), store.memos());
}

#[test]
fn update_replaces_in_place_and_keeps_count() {
    let mut store = store_with(&["a", "b", "c"]);
    let mut edited = store.memos()[1].clone();
    edited.content = "b edited".to_string();
    edited.add_tag("work");
    edited.is_secret = true;

    assert!(store.update(edited.clone()));

    assert_eq!(store.len(), 3);
    assert_eq!(store.memos()[1], edited);
    assert_eq!(reopen(&store).memos()[1], edited);
}

#[test]
fn update_keeps_original_creation_time() {
    let mut store = store_with(&["a"]);
    let original = store.memos()[0].clone();
    let mut edited = original.clone();
    edited.created_at = original.created_at + chrono::Duration::days(3);

    assert!(store.update(edited));
    assert_eq!(store.memos()[0].created_at, original.created_at);
}

#[test]
fn update_unknown_id_is_noop() {
    let mut store = store_with(&["a", "b"]);
    let before = store.memos().to_vec();

    assert!(!store.update(Memo::new("stranger")));
    assert_eq!(store.memos(), before.as_slice());
}

#[test]
fn update_applies_task_tag_rule() {
    let mut store = store_with(&["task"]);
    let mut edited = store.memos()[0].clone();
    edited.is_task = true;
    edited.is_completed = true;
    store.update(edited);

    let saved = &store.memos()[0];
    assert_eq!(
        saved.tags.iter().filter(|tag| tag.as_str() == TASK_TAG).count(),
        1
    );

    let mut untasked = saved.clone();
    untasked.is_task = false;
    store.update(untasked);

    let saved = &store.memos()[0];
    assert!(!saved.has_tag(TASK_TAG));
    assert!(!saved.is_completed);
}

#[test]
fn delete_removes_only_target() {
    let mut store = store_with(&["a", "b", "c"]);
    let target = store.memos()[1].clone();

    assert!(store.delete(&target));

    assert_eq!(store.len(), 2);
    assert!(store.get(target.id).is_none());
    let remaining: Vec<&str> = store.memos().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(remaining, vec!["c", "a"]);
    assert_eq!(reopen(&store).len(), 2);
}

#[test]
fn delete_unknown_id_is_noop() {
    let mut store = store_with(&["a"]);
    assert!(!store.delete_by_id(Uuid::new_v4()));
    assert_eq!(store.len(), 1);
}

#[test]
fn convenience_edits_go_through_update() {
    let mut store = store_with(&["memo"]);
    let id = store.memos()[0].id;

    assert!(store.add_tag(id, " work "));
    assert!(!store.add_tag(id, "work"));
    assert!(!store.add_tag(id, "  "));
    assert!(store.set_task(id, true));
    assert!(store.set_completed(id, true));
    assert!(store.set_secret(id, true));
    assert!(store.set_content(id, "memo v2"));

    let memo = store.get(id).unwrap();
    assert_eq!(memo.tags, vec!["work".to_string(), TASK_TAG.to_string()]);
    assert!(memo.is_completed_task());
    assert!(memo.is_secret);
    assert_eq!(memo.content, "memo v2");

    assert!(store.remove_tag(id, "work"));
    assert!(!store.remove_tag(id, "work"));
    assert!(!store.set_secret(Uuid::new_v4(), true));
}

#[test]
fn subscribers_receive_events_until_unsubscribed() {
    let mut store = store_with(&[]);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let subscription = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let id = store.add("x").unwrap();
    store.set_secret(id, true);
    store.delete_by_id(id);
    store.delete_by_id(id);

    assert_eq!(
        *events.borrow(),
        vec![
            StoreEvent::Added { id },
            StoreEvent::Updated { id },
            StoreEvent::Deleted { id },
        ]
    );

    assert!(store.unsubscribe(subscription));
    assert!(!store.unsubscribe(subscription));
    store.add("y");
    assert_eq!(events.borrow().len(), 3);
}

#[test]
fn custom_storage_key_is_used_for_load_and_save() {
    let existing = vec![Memo::new("seeded")];
    let repo = InMemoryBlobRepository::new().with_entry("alt", encode_memos(&existing).unwrap());
    let options = StoreOptions {
        storage_key: "alt".to_string(),
        ..StoreOptions::default()
    };

    let mut store = MemoStore::open(repo, options);
    assert_eq!(store.memos(), existing.as_slice());

    store.add("more");
    assert!(store.repo().read(DEFAULT_STORAGE_KEY).unwrap().is_none());
    assert!(store.repo().read("alt").unwrap().is_some());
}

#[test]
fn update_normalizes_hand_built_tag_lists() {
    let mut store = store_with(&["tags"]);
    let mut edited = store.memos()[0].clone();
    edited.tags = vec![
        "work".to_string(),
        " work ".to_string(),
        "".to_string(),
        "work".to_string(),
    ];

    assert!(store.update(edited));

    assert_eq!(store.memos()[0].tags, vec!["work".to_string()]);
    let reloaded = reopen(&store);
    assert_eq!(reloaded.memos()[0].tags, vec!["work".to_string()]);
    assert_eq!(all_tags(reloaded.memos()), vec!["work".to_string()]);
}

#[test]
fn update_keeps_single_task_label_among_messy_tags() {
    let mut store = store_with(&["task"]);
    let mut edited = store.memos()[0].clone();
    edited.is_task = true;
    edited.tags = vec![format!(" {TASK_TAG} "), TASK_TAG.to_string(), "  ".to_string()];

    store.update(edited);

    assert_eq!(store.memos()[0].tags, vec![TASK_TAG.to_string()]);
}

#[test]
fn edits_that_change_nothing_are_not_committed() {
    let mut store = store_with(&["plain"]);
    let id = store.memos()[0].id;
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    assert!(!store.set_completed(id, true));
    assert!(!store.get(id).unwrap().is_completed);
    assert!(!store.set_secret(id, false));
    assert!(!store.set_task(id, false));
    assert!(events.borrow().is_empty());

    assert!(store.set_task(id, true));
    assert!(store.set_completed(id, true));
    assert!(!store.set_completed(id, true));
    assert_eq!(events.borrow().len(), 2);
}
