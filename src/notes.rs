use rand::seq::SliceRandom;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{NoteColor, NotePatch, StickyNote, Viewport};

/// Picks a colour uniformly from the palette.
pub fn random_color(palette: &[NoteColor]) -> NoteColor {
    palette.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

/// The ordered note collection of the board.
///
/// Collection order is append order and carries no display meaning;
/// `z` decides stacking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotesStore {
    notes: Vec<StickyNote>,
}

impl NotesStore {
    pub fn new(notes: Vec<StickyNote>) -> Self {
        NotesStore { notes }
    }

    pub fn notes(&self) -> &[StickyNote] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&StickyNote> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Highest stacking index in use, floored at 0.
    pub fn max_z(&self) -> i64 {
        self.notes.iter().map(|n| n.z).max().unwrap_or(0).max(0)
    }

    /// Adds a blank note with a random colour, centred in `viewport`.
    pub fn add(&mut self, viewport: Viewport) -> &StickyNote {
        self.add_with(viewport, random_color)
    }

    /// Like [`NotesStore::add`] with an explicit colour picker.
    pub fn add_with<F>(&mut self, viewport: Viewport, mut pick: F) -> &StickyNote
    where
        F: FnMut(&[NoteColor]) -> NoteColor,
    {
        let (x, y) = viewport.centered_note_origin();
        let note = StickyNote {
            id: Uuid::new_v4().to_string(),
            text: String::new(),
            due_date: None,
            completed: false,
            x,
            y,
            z: self.max_z() + 1,
            color: pick(&NoteColor::PALETTE),
        };
        debug!(id = %note.id, z = note.z, color = %note.color, "note added");
        self.notes.push(note);
        &self.notes[self.notes.len() - 1]
    }

    /// Merges `patch` into the note with `id`. Returns whether a note matched.
    pub fn update(&mut self, id: &str, patch: &NotePatch) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                // NaN and infinity have no JSON form; keep the old coordinate
                let patch = NotePatch {
                    x: patch.x.filter(|v| v.is_finite()),
                    y: patch.y.filter(|v| v.is_finite()),
                    ..patch.clone()
                };
                *note = note.merged(&patch);
                true
            }
            None => false,
        }
    }

    /// Removes the note with `id`. Returns whether a note matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let len_before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = self.notes.len() != len_before;
        if removed {
            debug!(id, "note deleted");
        }
        removed
    }

    /// Raises the note with `id` above every other note.
    pub fn bring_to_top(&mut self, id: &str) -> bool {
        let z = self.max_z() + 1;
        self.update(id, &NotePatch { z: Some(z), ..Default::default() })
    }

    /// Topmost note whose footprint contains the pixel point.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<&StickyNote> {
        self.notes.iter().filter(|n| n.contains(px, py)).max_by_key(|n| n.z)
    }

    /// Notes ordered back to front.
    pub fn by_z(&self) -> Vec<&StickyNote> {
        let mut sorted: Vec<&StickyNote> = self.notes.iter().collect();
        sorted.sort_by_key(|n| n.z);
        sorted
    }

    /// Resolves a full id or a unique id prefix.
    pub fn resolve_id(&self, prefix: &str) -> Result<String> {
        if let Some(n) = self.get(prefix) {
            return Ok(n.id.clone());
        }
        let mut matches = self.notes.iter().filter(|n| n.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(n), None) if !prefix.is_empty() => Ok(n.id.clone()),
            (Some(_), Some(_)) => Err(Error::AmbiguousId(prefix.to_string())),
            _ => Err(Error::NotFound(prefix.to_string())),
        }
    }

    pub fn into_notes(self) -> Vec<StickyNote> {
        self.notes
    }
}
