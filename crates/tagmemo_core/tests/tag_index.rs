use tagmemo_core::{all_tags, flow_rows, search_tags, suggest, Memo, MemoFilter, TASK_TAG};

fn memo_with(tags: &[&str]) -> Memo {
    let mut memo = Memo::new("m");
    for tag in tags {
        memo.add_tag(tag);
    }
    memo
}

#[test]
fn all_tags_is_sorted_union_without_duplicates() {
    let memos = vec![
        memo_with(&["work", "home"]),
        memo_with(&["home", "Errand"]),
        memo_with(&[]),
    ];

    assert_eq!(
        all_tags(&memos),
        vec!["Errand".to_string(), "home".to_string(), "work".to_string()]
    );
    assert!(all_tags(&[]).is_empty());
}

#[test]
fn suggest_returns_nothing_for_blank_query() {
    let universe = vec!["work".to_string()];
    assert!(suggest("", &[], &universe).is_empty());
    assert!(suggest("   ", &[], &universe).is_empty());
}

#[test]
fn suggest_excludes_tags_already_on_memo() {
    let memos = vec![
        memo_with(&["work", "workout", "home"]),
        memo_with(&["Network"]),
    ];
    let universe = all_tags(&memos);
    let editing = memo_with(&["work"]);

    let hits = suggest("WORK", &editing.tags, &universe);

    assert_eq!(hits, vec!["Network".to_string(), "workout".to_string()]);
}

#[test]
fn suggestion_accepts_reserved_task_label() {
    let mut task = memo_with(&[]);
    task.is_task = true;
    task.sync_task_tag();
    let universe = all_tags(&[task]);

    let mut editing = memo_with(&[]);
    let hits = suggest("タス", &editing.tags, &universe);
    assert_eq!(hits, vec![TASK_TAG.to_string()]);

    assert!(editing.add_tag(&hits[0]));
    assert!(!editing.add_tag(&hits[0]));
    assert_eq!(editing.tags, vec![TASK_TAG.to_string()]);
}

#[test]
fn filter_bar_search_then_select() {
    let universe = all_tags(&[memo_with(&["Work", "home", "homework"])]);
    let mut filter = MemoFilter::default();

    let hits = search_tags("HOME", &universe);
    assert_eq!(hits, vec!["home".to_string(), "homework".to_string()]);
    assert!(search_tags("", &universe).is_empty());

    filter.toggle_include(&hits[0]);
    filter.toggle_exclude("Work");
    assert!(filter.include_tags.contains("home"));
    assert!(filter.exclude_tags.contains("Work"));
    assert!(filter.include_tags.is_disjoint(&filter.exclude_tags));
}

#[test]
fn flow_rows_cover_every_chip_once() {
    let widths = [30.0, 70.0, 25.0, 90.0, 10.0, 10.0];
    let rows = flow_rows(&widths, 100.0, 4.0);

    let flattened: Vec<usize> = rows.iter().cloned().flatten().collect();
    assert_eq!(flattened, (0..widths.len()).collect::<Vec<_>>());
    for row in &rows {
        assert!(!row.is_empty());
        let used: f32 = widths[row.clone()].iter().sum::<f32>() + 4.0 * (row.len() - 1) as f32;
        assert!(row.len() == 1 || used <= 100.0);
    }
}
