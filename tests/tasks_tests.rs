use stickies::reorder::ReorderEngine;
use stickies::tasks::TasksStore;

fn texts(store: &TasksStore) -> Vec<&str> {
    store.tasks().iter().map(|t| t.text.as_str()).collect()
}

fn abc() -> TasksStore {
    let mut store = TasksStore::default();
    for t in ["A", "B", "C"] {
        store.add(t);
    }
    store
}

#[test]
fn test_add_appends_trimmed() {
    let mut store = TasksStore::default();
    let task = store.add("  Write report ").unwrap().clone();

    assert_eq!(task.text, "Write report");
    assert!(!task.completed);
    assert!(task.created_at > 0);
    assert_eq!(store.len(), 1);

    store.add("Second");
    assert_eq!(texts(&store), vec!["Write report", "Second"]);
}

#[test]
fn test_add_rejects_blank() {
    let mut store = abc();
    let before = store.clone();

    assert!(store.add("").is_none());
    assert!(store.add("   ").is_none());
    assert!(store.add("\t\n").is_none());
    assert_eq!(store, before);
}

#[test]
fn test_ids_are_unique() {
    let store = abc();
    let ids: std::collections::HashSet<_> = store.tasks().iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_toggle_complete_flips_only_completed() {
    let mut store = abc();
    let before = store.tasks()[1].clone();

    assert!(store.toggle_complete(&before.id));
    let after = &store.tasks()[1];
    assert!(after.completed);
    assert_eq!(after.text, before.text);
    assert_eq!(after.created_at, before.created_at);

    store.toggle_complete(&before.id);
    assert!(!store.tasks()[1].completed);
    assert!(!store.toggle_complete("missing"));
}

#[test]
fn test_delete_keeps_order() {
    let mut store = abc();
    let id = store.tasks()[1].id.clone();

    assert!(store.delete(&id));
    assert_eq!(texts(&store), vec!["A", "C"]);
    assert!(!store.delete(&id));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_reorder_first_to_last() {
    let mut store = abc();
    let mut engine = ReorderEngine::new();

    engine.drag_start(0);
    engine.drag_enter(2);
    assert!(store.finish_reorder(&mut engine));

    assert_eq!(texts(&store), vec!["B", "C", "A"]);
    assert_eq!(engine, ReorderEngine::default());
}

#[test]
fn test_reorder_last_to_first() {
    let mut store = abc();
    let mut engine = ReorderEngine::new();

    engine.drag_start(2);
    engine.drag_enter(1);
    engine.drag_enter(0);
    store.finish_reorder(&mut engine);

    assert_eq!(texts(&store), vec!["C", "A", "B"]);
}

#[test]
fn test_reorder_target_indexes_post_removal_sequence() {
    let mut items = vec!['a', 'b', 'c', 'd'];
    let mut engine = ReorderEngine::new();

    engine.drag_start(1);
    engine.drag_enter(2);
    engine.drag_end(&mut items);
    assert_eq!(items, vec!['a', 'c', 'b', 'd']);
}

#[test]
fn test_drop_without_target_is_noop_and_clears() {
    let mut items = vec![1, 2, 3];
    let mut engine = ReorderEngine::new();

    engine.drag_start(1);
    assert!(!engine.drag_end(&mut items));
    assert_eq!(items, vec![1, 2, 3]);
    assert_eq!(engine.source(), None);
    assert_eq!(engine.target(), None);

    engine.drag_enter(0);
    assert!(!engine.drag_end(&mut items));
    assert_eq!(items, vec![1, 2, 3]);
    assert_eq!(engine.target(), None);
}

#[test]
fn test_drop_on_itself_keeps_order() {
    let mut items = vec![1, 2, 3];
    let mut engine = ReorderEngine::new();

    engine.drag_start(1);
    engine.drag_enter(1);
    assert!(!engine.drag_end(&mut items));
    assert_eq!(items, vec![1, 2, 3]);
}

#[test]
fn test_out_of_range_cursors() {
    let mut items = vec![1, 2, 3];
    let mut engine = ReorderEngine::new();

    engine.drag_start(7);
    engine.drag_enter(0);
    assert!(!engine.drag_end(&mut items));
    assert_eq!(items, vec![1, 2, 3]);

    engine.drag_start(0);
    engine.drag_enter(9);
    engine.drag_end(&mut items);
    assert_eq!(items, vec![2, 3, 1]);
    assert!(!engine.is_dragging());
}
