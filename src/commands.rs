use std::io::{self, Write};

use clap::ValueEnum;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{commit_text, parse_due, NoteColor, NotePatch, Viewport};
use crate::notes::NotesStore;
use crate::storage::{self, db_path, load_dark_mode, load_notes, save_dark_mode, save_notes, FileStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DarkModeChange {
    On,
    Off,
    Toggle,
}

/// Loads the board, applies `f`, and saves it back if `f` changed anything.
fn with_board<T>(f: impl FnOnce(&mut NotesStore) -> Result<T>) -> Result<T> {
    let mut storage = FileStorage::open(db_path());
    let mut store = NotesStore::new(load_notes(&storage));
    let before = store.clone();
    let out = f(&mut store)?;
    if store != before {
        save_notes(&mut storage, store.notes())?;
    }
    Ok(out)
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn report(result: Result<String>, silent: bool) {
    match result {
        Ok(msg) => {
            if !silent { println!("{}", msg); }
        }
        Err(e) => {
            if !silent { eprintln!("{}", e); }
        }
    }
}

/// Viewport of the current terminal, or a default desktop size.
fn current_viewport() -> Viewport {
    crossterm::terminal::size()
        .map(|(cols, rows)| Viewport::from_cells(cols, rows))
        .unwrap_or_default()
}

/// Adds a new note, optionally filling in its text and due date.
pub fn cmd_add(text: Option<String>, due: Option<String>, silent: bool) {
    let viewport = current_viewport();
    report(
        with_board(|store| {
            let due = due.as_deref().map(parse_due).transpose()?.flatten();
            let id = store.add(viewport).id.clone();
            let mut patch = NotePatch { due_date: due.map(Some), ..Default::default() };
            if let Some(t) = &text {
                patch.text = Some(commit_text(t));
            }
            store.update(&id, &patch);
            Ok(format!("Note added (id = {})", short_id(&id)))
        }),
        silent,
    );
}

/// Lists notes front to back.
pub fn cmd_list() {
    let storage = FileStorage::open(db_path());
    let store = NotesStore::new(load_notes(&storage));
    if store.is_empty() {
        println!("No notes found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Text").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Position").add_attribute(Attribute::Bold),
            Cell::new("Z").add_attribute(Attribute::Bold),
            Cell::new("Color").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for n in store.by_z().into_iter().rev() {
        let color = match n.color {
            NoteColor::Yellow => Color::Yellow,
            NoteColor::Pink => Color::Magenta,
            NoteColor::Green => Color::Green,
            NoteColor::Blue => Color::Blue,
            NoteColor::Purple => Color::DarkMagenta,
        };
        let status = if n.completed { "Done" } else { "Open" };
        table.add_row(vec![
            Cell::new(short_id(&n.id)),
            Cell::new(n.display_text()),
            Cell::new(n.due_date.map(|d| d.to_string()).unwrap_or_default()),
            Cell::new(format!("{:.0}, {:.0}", n.x, n.y)),
            Cell::new(n.z),
            Cell::new(n.color).fg(color),
            Cell::new(status).fg(if n.completed { Color::Green } else { Color::Reset }),
        ]);
    }

    println!("{table}");
}

/// Edits a note's text and/or due date.
pub fn cmd_edit(id: String, text: Option<String>, due: Option<String>, clear_due: bool, silent: bool) {
    report(
        with_board(|store| {
            let id = store.resolve_id(&id)?;
            let mut patch = NotePatch::default();
            if let Some(t) = &text {
                patch.text = Some(commit_text(t));
            }
            if clear_due {
                patch.due_date = Some(None);
            } else if let Some(d) = &due {
                patch.due_date = Some(parse_due(d)?);
            }
            store.update(&id, &patch);
            Ok(format!("Note {} updated.", short_id(&id)))
        }),
        silent,
    );
}

/// Toggles a note's completed flag.
pub fn cmd_done(id: String, silent: bool) {
    report(
        with_board(|store| {
            let id = store.resolve_id(&id)?;
            let completed = store.get(&id).map(|n| !n.completed).unwrap_or(true);
            store.update(&id, &NotePatch::completed(completed));
            let state = if completed { "done" } else { "open" };
            Ok(format!("Note {} marked {}.", short_id(&id), state))
        }),
        silent,
    );
}

/// Moves a note's top-left corner to (x, y).
pub fn cmd_move(id: String, x: f64, y: f64, silent: bool) {
    report(
        with_board(|store| {
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::InvalidPosition(x, y));
            }
            let id = store.resolve_id(&id)?;
            store.update(&id, &NotePatch::position(x, y));
            Ok(format!("Note {} moved to {:.0}, {:.0}.", short_id(&id), x, y))
        }),
        silent,
    );
}

/// Raises a note above all others.
pub fn cmd_raise(id: String, silent: bool) {
    report(
        with_board(|store| {
            let id = store.resolve_id(&id)?;
            store.bring_to_top(&id);
            Ok(format!("Note {} raised.", short_id(&id)))
        }),
        silent,
    );
}

/// Removes a note.
pub fn cmd_remove(id: String, silent: bool) {
    report(
        with_board(|store| {
            let id = store.resolve_id(&id)?;
            store.delete(&id);
            Ok(format!("Note {} removed.", short_id(&id)))
        }),
        silent,
    );
}

/// Shows or changes the dark-mode preference.
pub fn cmd_dark_mode(change: Option<DarkModeChange>, silent: bool) {
    let mut storage = FileStorage::open(db_path());
    let current = load_dark_mode(&storage, Config::from_env().prefers_dark);
    let next = match change {
        None => current,
        Some(DarkModeChange::On) => true,
        Some(DarkModeChange::Off) => false,
        Some(DarkModeChange::Toggle) => !current,
    };
    let result = if change.is_some() {
        save_dark_mode(&mut storage, next)
    } else {
        Ok(())
    };
    let label = if next { "on" } else { "off" };
    report(result.map(|_| format!("Dark mode is {}.", label)), silent);
}

/// Resets storage by deleting all notes and preferences.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all notes? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() || input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    let mut storage = FileStorage::open(db_path());
    match storage::reset(&mut storage) {
        Ok(()) => println!("Storage reset successfully."),
        Err(e) => eprintln!("Failed to reset storage: {}", e),
    }
}
