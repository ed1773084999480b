//! Free-form note dragging.
//!
//! Pointer samples arrive in pixels relative to the screen. A drag raises the
//! note once at the start and then moves its top-left corner to the pointer
//! on every sample. Notes may overlap freely.

use crate::models::NotePatch;
use crate::notes::NotesStore;

/// A note being dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDrag {
    pub note_id: String,
    /// Pointer offset inside the note at grab time. Not used for placement.
    pub grab_offset: (f64, f64),
}

impl NoteDrag {
    /// Starts dragging `note_id` from `pointer`. Returns `None` when the note
    /// does not exist.
    pub fn start(store: &mut NotesStore, note_id: &str, pointer: (f64, f64)) -> Option<NoteDrag> {
        let note = store.get(note_id)?;
        let grab_offset = (pointer.0 - note.x, pointer.1 - note.y);
        store.bring_to_top(note_id);
        Some(NoteDrag { note_id: note_id.to_string(), grab_offset })
    }

    /// Applies one pointer sample. `(0, 0)` samples are drag-end artifacts and
    /// are ignored. Returns whether the note moved.
    pub fn move_to(&self, store: &mut NotesStore, pointer: (f64, f64), origin: (f64, f64)) -> bool {
        if pointer == (0.0, 0.0) {
            return false;
        }
        let x = pointer.0 - origin.0;
        let y = pointer.1 - origin.1;
        store.update(&self.note_id, &NotePatch::position(x, y))
    }
}
