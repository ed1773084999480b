use chrono::NaiveDate;
use stickies::models::{NoteColor, NotePatch, StickyNote, Viewport};
use stickies::notes::NotesStore;
use stickies::storage::{
    load_dark_mode, load_notes, reset, save_dark_mode, save_notes, FileStorage, MemoryStorage, Storage,
    DARK_MODE_KEY, NOTES_KEY,
};

fn sample_notes() -> Vec<StickyNote> {
    let mut store = NotesStore::default();
    let a = store.add_with(Viewport::default(), |_| NoteColor::Green).id.clone();
    let b = store.add_with(Viewport::default(), |_| NoteColor::Purple).id.clone();
    store.update(&a, &NotePatch {
        text: Some("Dentist".into()),
        due_date: Some(NaiveDate::from_ymd_opt(2025, 3, 14)),
        completed: Some(true),
        ..Default::default()
    });
    store.update(&b, &NotePatch::position(-12.5, 33.25));
    store.into_notes()
}

#[test]
fn test_absent_state_defaults() {
    let storage = MemoryStorage::new();
    assert!(load_notes(&storage).is_empty());
    assert!(load_dark_mode(&storage, true));
    assert!(!load_dark_mode(&storage, false));
}

#[test]
fn test_round_trip_memory() {
    let mut storage = MemoryStorage::new();
    let notes = sample_notes();

    save_notes(&mut storage, &notes).unwrap();
    assert_eq!(load_notes(&storage), notes);

    save_notes(&mut storage, &[]).unwrap();
    assert!(load_notes(&storage).is_empty());
}

#[test]
fn test_round_trip_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");
    let notes = sample_notes();

    let mut storage = FileStorage::open(&path);
    save_notes(&mut storage, &notes).unwrap();
    save_dark_mode(&mut storage, true).unwrap();

    let reopened = FileStorage::open(&path);
    assert_eq!(load_notes(&reopened), notes);
    assert!(load_dark_mode(&reopened, false));
}

#[test]
fn test_malformed_values_fall_back() {
    let mut storage = MemoryStorage::new();
    storage.set(NOTES_KEY, "{not json".into()).unwrap();
    storage.set(DARK_MODE_KEY, "\"yes\"".into()).unwrap();

    assert!(load_notes(&storage).is_empty());
    assert!(load_dark_mode(&storage, true));
}

#[test]
fn test_malformed_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "garbage").unwrap();

    let storage = FileStorage::open(&path);
    assert!(storage.get(NOTES_KEY).is_none());
}

#[test]
fn test_serialized_shape() {
    let mut storage = MemoryStorage::new();
    let notes = sample_notes();
    save_notes(&mut storage, &notes).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&storage.get(NOTES_KEY).unwrap()).unwrap();
    let first = &raw[0];
    assert_eq!(first["dueDate"], "2025-03-14");
    assert_eq!(first["color"], "green");
    assert_eq!(first["completed"], true);
    assert!(raw[1].get("dueDate").is_none());

    save_dark_mode(&mut storage, false).unwrap();
    assert_eq!(storage.get(DARK_MODE_KEY).as_deref(), Some("false"));
}

#[test]
fn test_reads_browser_style_records() {
    let mut storage = MemoryStorage::new();
    let raw = r#"[{"id":"1","text":"hi","completed":false,"x":10,"y":20.5,"z":3,"color":"teal"},
                  {"id":"2","text":"","dueDate":"2024-01-02","completed":true,"x":0,"y":0,"z":4,"color":"pink"}]"#;
    storage.set(NOTES_KEY, raw.into()).unwrap();

    let notes = load_notes(&storage);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].color, NoteColor::Yellow);
    assert_eq!(notes[0].x, 10.0);
    assert_eq!(notes[1].color, NoteColor::Pink);
    assert_eq!(notes[1].due_date, NaiveDate::from_ymd_opt(2024, 1, 2));
}

#[test]
fn test_reset_removes_keys() {
    let mut storage = MemoryStorage::new();
    save_notes(&mut storage, &sample_notes()).unwrap();
    save_dark_mode(&mut storage, true).unwrap();

    reset(&mut storage).unwrap();
    assert!(storage.get(NOTES_KEY).is_none());
    assert!(storage.get(DARK_MODE_KEY).is_none());
}

#[test]
fn test_non_finite_positions_do_not_break_reload() {
    let mut store = NotesStore::default();
    let a = store.add_with(Viewport::default(), |_| NoteColor::Pink).id.clone();
    store.add_with(Viewport::default(), |_| NoteColor::Blue);
    store.update(&a, &NotePatch::position(40.0, 80.0));

    store.update(&a, &NotePatch::position(f64::NAN, 10.0));
    store.update(&a, &NotePatch::position(f64::INFINITY, f64::NEG_INFINITY));
    let note = store.get(&a).unwrap();
    assert_eq!((note.x, note.y), (40.0, 10.0));

    let mut storage = MemoryStorage::new();
    save_notes(&mut storage, store.notes()).unwrap();
    assert!(!storage.get(NOTES_KEY).unwrap().contains("null"));
    assert_eq!(load_notes(&storage), store.notes());
}
