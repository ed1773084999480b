use stickies::drag::NoteDrag;
use stickies::models::{commit_text, NoteColor, NotePatch, StickyNote, Viewport, PLACEHOLDER_TEXT};
use stickies::notes::NotesStore;
use stickies::Error;

fn board_with(n: usize) -> NotesStore {
    let mut store = NotesStore::default();
    for _ in 0..n {
        store.add_with(Viewport::default(), |_| NoteColor::Blue);
    }
    store
}

fn ids(store: &NotesStore) -> Vec<String> {
    store.notes().iter().map(|n| n.id.clone()).collect()
}

#[test]
fn test_add_defaults() {
    let mut store = NotesStore::default();
    let note = store.add_with(Viewport::new(1000.0, 800.0), |palette| palette[3]).clone();

    assert_eq!(note.text, "");
    assert_eq!(note.due_date, None);
    assert!(!note.completed);
    assert_eq!((note.x, note.y), (372.0, 300.0));
    assert_eq!(note.z, 1);
    assert_eq!(note.color, NoteColor::Blue);
    assert_eq!(note.id.len(), 36);
}

#[test]
fn test_add_picks_from_palette() {
    let mut store = NotesStore::default();
    let mut seen = Vec::new();
    store.add_with(Viewport::default(), |palette| {
        seen.extend_from_slice(palette);
        palette[0]
    });
    assert_eq!(seen, NoteColor::PALETTE.to_vec());

    for _ in 0..20 {
        let c = store.add(Viewport::default()).color;
        assert!(NoteColor::PALETTE.contains(&c));
    }
}

#[test]
fn test_each_added_note_is_on_top() {
    let mut store = NotesStore::default();
    for _ in 0..10 {
        let before = store.max_z();
        let z = store.add(Viewport::default()).z;
        assert!(z > before);
        assert!(store.notes().iter().filter(|n| n.z == z).count() == 1);
    }
}

#[test]
fn test_add_after_raise_stays_above() {
    let mut store = board_with(3);
    let first = store.notes()[0].id.clone();
    store.bring_to_top(&first);
    let raised_z = store.get(&first).unwrap().z;

    let z = store.add(Viewport::default()).z;
    assert!(z > raised_z);
}

#[test]
fn test_z_floor_is_zero() {
    let mut store = NotesStore::new(vec![StickyNote {
        id: "neg".into(),
        text: String::new(),
        due_date: None,
        completed: false,
        x: 0.0,
        y: 0.0,
        z: -5,
        color: NoteColor::Pink,
    }]);
    assert_eq!(store.add(Viewport::default()).z, 1);
}

#[test]
fn test_bring_to_top_last_wins() {
    let mut store = board_with(3);
    let a = store.notes()[0].id.clone();
    let b = store.notes()[1].id.clone();

    store.bring_to_top(&a);
    store.bring_to_top(&b);

    let za = store.get(&a).unwrap().z;
    let zb = store.get(&b).unwrap().z;
    assert!(zb > za);
    assert_eq!(zb, store.max_z());
}

#[test]
fn test_update_position_only() {
    let mut store = board_with(2);
    let id = store.notes()[0].id.clone();
    store.update(&id, &NotePatch { text: Some("keep".into()), completed: Some(true), ..Default::default() });
    let before = store.get(&id).unwrap().clone();

    assert!(store.update(&id, &NotePatch::position(10.0, 20.0)));

    let after = store.get(&id).unwrap();
    assert_eq!(after.x, 10.0);
    assert_eq!(after.y, 20.0);
    assert_eq!(after.text, before.text);
    assert_eq!(after.due_date, before.due_date);
    assert_eq!(after.completed, before.completed);
    assert_eq!(after.z, before.z);
    assert_eq!(after.color, before.color);
    assert_eq!(after.id, before.id);
}

#[test]
fn test_update_ignores_non_finite_position() {
    let mut store = board_with(1);
    let id = store.notes()[0].id.clone();
    store.update(&id, &NotePatch::position(16.0, 32.0));

    let patch = NotePatch { text: Some("still applied".into()), ..NotePatch::position(f64::NAN, f64::INFINITY) };
    assert!(store.update(&id, &patch));

    let note = store.get(&id).unwrap();
    assert_eq!((note.x, note.y), (16.0, 32.0));
    assert_eq!(note.text, "still applied");
}

#[test]
fn test_update_due_date_set_and_clear() {
    let mut store = board_with(1);
    let id = store.notes()[0].id.clone();
    let date = chrono::NaiveDate::from_ymd_opt(2025, 12, 1);

    store.update(&id, &NotePatch::due_date(date));
    assert_eq!(store.get(&id).unwrap().due_date, date);

    // leaving due_date unset in a patch keeps it
    store.update(&id, &NotePatch::completed(true));
    assert_eq!(store.get(&id).unwrap().due_date, date);

    store.update(&id, &NotePatch::due_date(None));
    assert_eq!(store.get(&id).unwrap().due_date, None);
}

#[test]
fn test_missing_ids_are_noops() {
    let mut store = board_with(2);
    let snapshot = store.clone();

    assert!(!store.update("nope", &NotePatch::position(1.0, 1.0)));
    assert!(!store.delete("nope"));
    assert!(!store.bring_to_top("nope"));
    assert_eq!(store, snapshot);
}

#[test]
fn test_delete_keeps_order() {
    let mut store = board_with(4);
    let mut expected = ids(&store);
    let victim = expected.remove(1);

    assert!(store.delete(&victim));
    assert_eq!(ids(&store), expected);
}

#[test]
fn test_empty_text_commits_placeholder() {
    let mut store = board_with(1);
    let id = store.notes()[0].id.clone();

    store.update(&id, &NotePatch::text("   "));
    assert_eq!(store.get(&id).unwrap().text, PLACEHOLDER_TEXT);

    store.update(&id, &NotePatch::text("  Buy milk \n"));
    assert_eq!(store.get(&id).unwrap().text, "Buy milk");
    assert_eq!(commit_text(""), "Untitled");
}

#[test]
fn test_hit_test_prefers_topmost() {
    let mut store = board_with(2);
    let a = store.notes()[0].id.clone();
    let b = store.notes()[1].id.clone();
    store.update(&a, &NotePatch::position(0.0, 0.0));
    store.update(&b, &NotePatch::position(100.0, 100.0));

    assert_eq!(store.hit_test(150.0, 150.0).map(|n| n.id.clone()), Some(b.clone()));
    store.bring_to_top(&a);
    assert_eq!(store.hit_test(150.0, 150.0).map(|n| n.id.clone()), Some(a.clone()));
    assert_eq!(store.hit_test(10.0, 10.0).map(|n| n.id.clone()), Some(a));
    assert!(store.hit_test(900.0, 900.0).is_none());
}

#[test]
fn test_resolve_id_prefix() {
    let mut store = board_with(1);
    let id = store.notes()[0].id.clone();

    assert_eq!(store.resolve_id(&id).unwrap(), id);
    assert_eq!(store.resolve_id(&id[..6]).unwrap(), id);
    assert!(matches!(store.resolve_id("zzzz"), Err(Error::NotFound(_))));

    let mut twin = store.notes()[0].clone();
    twin.id = format!("{}-twin", &id[..6]);
    let mut notes = store.into_notes();
    notes.push(twin);
    store = NotesStore::new(notes);
    assert!(matches!(store.resolve_id(&id[..6]), Err(Error::AmbiguousId(_))));
}

#[test]
fn test_drag_start_raises_and_records_offset() {
    let mut store = board_with(2);
    let a = store.notes()[0].id.clone();
    store.update(&a, &NotePatch::position(40.0, 50.0));

    let drag = NoteDrag::start(&mut store, &a, (60.0, 90.0)).unwrap();
    assert_eq!(drag.grab_offset, (20.0, 40.0));
    assert_eq!(store.get(&a).unwrap().z, store.max_z());
    assert!(NoteDrag::start(&mut store, "missing", (0.0, 0.0)).is_none());
}

#[test]
fn test_drag_move_subtracts_origin_and_ignores_zero() {
    let mut store = board_with(1);
    let id = store.notes()[0].id.clone();
    let drag = NoteDrag::start(&mut store, &id, (600.0, 300.0)).unwrap();

    assert!(drag.move_to(&mut store, (300.0, 216.0), (8.0, 16.0)));
    let note = store.get(&id).unwrap();
    assert_eq!((note.x, note.y), (292.0, 200.0));

    assert!(!drag.move_to(&mut store, (0.0, 0.0), (8.0, 16.0)));
    let note = store.get(&id).unwrap();
    assert_eq!((note.x, note.y), (292.0, 200.0));

    // repeated samples are harmless
    drag.move_to(&mut store, (300.0, 216.0), (8.0, 16.0));
    drag.move_to(&mut store, (300.0, 216.0), (8.0, 16.0));
    let note = store.get(&id).unwrap();
    assert_eq!((note.x, note.y), (292.0, 200.0));
}
