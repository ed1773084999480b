use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tracing::warn;

use crate::drag::NoteDrag;
use crate::error::Result;
use crate::models::{parse_due, NotePatch, Viewport, CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::notes::NotesStore;
use crate::reorder::ReorderEngine;
use crate::storage::{load_dark_mode, load_notes, save_dark_mode, save_notes, Storage};
use crate::tasks::TasksStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    Tasks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    None,
    NoteText,
    NoteDue,
    NewTask,
}

pub struct App {
    storage: Box<dyn Storage>,
    pub notes: NotesStore,
    pub tasks: TasksStore,
    pub reorder: ReorderEngine,
    pub drag: Option<NoteDrag>,
    pub selected_note: Option<String>,
    pub task_state: ListState,
    pub view: View,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub dark_mode: bool,
    pub status: Option<String>,
    /// Board area from the last draw, in terminal cells.
    pub board_area: Rect,
    /// Task list rows from the last draw, in terminal cells.
    pub task_area: Rect,
}

/// Screen pixel position of a terminal cell.
fn cell_to_px(column: u16, row: u16) -> (f64, f64) {
    (f64::from(column) * CELL_WIDTH_PX, f64::from(row) * CELL_HEIGHT_PX)
}

impl App {
    /// Creates the app from persisted state.
    pub fn new(storage: Box<dyn Storage>, prefers_dark: bool) -> App {
        let notes = NotesStore::new(load_notes(&*storage));
        let dark_mode = load_dark_mode(&*storage, prefers_dark);
        App {
            storage,
            notes,
            tasks: TasksStore::default(),
            reorder: ReorderEngine::new(),
            drag: None,
            selected_note: None,
            task_state: ListState::default(),
            view: View::Board,
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            dark_mode,
            status: None,
            board_area: Rect::new(0, 0, 160, 45),
            task_area: Rect::default(),
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        &*self.storage
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "persist failed");
            self.status = Some(format!("Save failed: {}", e));
        }
    }

    fn persist_notes(&mut self) {
        let result = save_notes(&mut *self.storage, self.notes.notes());
        self.report(result);
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        let result = save_dark_mode(&mut *self.storage, self.dark_mode);
        self.report(result);
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Board => View::Tasks,
            View::Tasks => View::Board,
        };
    }

    /// Board origin in screen pixels.
    fn board_origin(&self) -> (f64, f64) {
        cell_to_px(self.board_area.x, self.board_area.y)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_cells(self.board_area.width, self.board_area.height)
    }

    pub fn add_note(&mut self) {
        let viewport = self.viewport();
        let id = self.notes.add(viewport).id.clone();
        self.selected_note = Some(id);
        self.persist_notes();
    }

    /// Selects the next note in collection order and raises it.
    pub fn select_next_note(&mut self) {
        let notes = self.notes.notes();
        if notes.is_empty() {
            self.selected_note = None;
            return;
        }
        let next = match &self.selected_note {
            Some(id) => match notes.iter().position(|n| &n.id == id) {
                Some(i) => (i + 1) % notes.len(),
                None => 0,
            },
            None => 0,
        };
        let id = notes[next].id.clone();
        self.notes.bring_to_top(&id);
        self.selected_note = Some(id);
        self.persist_notes();
    }

    pub fn toggle_selected_note(&mut self) {
        let Some(id) = self.selected_note.clone() else { return };
        if let Some(completed) = self.notes.get(&id).map(|n| !n.completed) {
            self.notes.update(&id, &NotePatch::completed(completed));
            self.persist_notes();
        }
    }

    pub fn delete_selected_note(&mut self) {
        if let Some(id) = self.selected_note.take() {
            if self.notes.delete(&id) {
                self.persist_notes();
            }
        }
    }

    /// Moves the selected note by whole cells.
    pub fn nudge_selected_note(&mut self, dx: i16, dy: i16) {
        let Some(id) = self.selected_note.clone() else { return };
        let Some(note) = self.notes.get(&id) else { return };
        let x = note.x + f64::from(dx) * CELL_WIDTH_PX;
        let y = note.y + f64::from(dy) * CELL_HEIGHT_PX;
        self.notes.update(&id, &NotePatch::position(x, y));
        self.persist_notes();
    }

    pub fn selected_task(&self) -> Option<usize> {
        self.task_state.selected().filter(|&i| i < self.tasks.len())
    }

    pub fn next_task(&mut self) {
        if self.tasks.is_empty() { return; }
        let i = match self.task_state.selected() {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            _ => 0,
        };
        self.task_state.select(Some(i));
    }

    pub fn previous_task(&mut self) {
        if self.tasks.is_empty() { return; }
        let i = match self.task_state.selected() {
            Some(0) | None => self.tasks.len() - 1,
            Some(i) => i - 1,
        };
        self.task_state.select(Some(i));
    }

    pub fn toggle_selected_task(&mut self) {
        if let Some(i) = self.selected_task() {
            let id = self.tasks.tasks()[i].id.clone();
            self.tasks.toggle_complete(&id);
        }
    }

    pub fn delete_selected_task(&mut self) {
        if let Some(i) = self.selected_task() {
            let id = self.tasks.tasks()[i].id.clone();
            self.tasks.delete(&id);
            self.clamp_task_selection();
        }
    }

    /// Keyboard reorder: drags the selected task `delta` rows.
    pub fn move_selected_task(&mut self, delta: isize) {
        let Some(i) = self.selected_task() else { return };
        let Some(target) = i.checked_add_signed(delta).filter(|&t| t < self.tasks.len()) else {
            return;
        };
        self.reorder.drag_start(i);
        self.reorder.drag_enter(target);
        self.tasks.finish_reorder(&mut self.reorder);
        self.task_state.select(Some(target));
    }

    fn clamp_task_selection(&mut self) {
        if self.tasks.is_empty() {
            self.task_state.select(None);
        } else if let Some(i) = self.task_state.selected() {
            if i >= self.tasks.len() {
                self.task_state.select(Some(self.tasks.len() - 1));
            }
        } else {
            self.task_state.select(Some(0));
        }
    }

    /// Opens the input box for `field`, pre-filled from the current value.
    pub fn start_edit(&mut self, field: InputField) {
        self.input_buffer.clear();
        match field {
            InputField::NoteText | InputField::NoteDue => {
                let Some(note) = self.selected_note.as_deref().and_then(|id| self.notes.get(id)) else {
                    return;
                };
                if field == InputField::NoteText {
                    self.input_buffer = note.text.clone();
                } else {
                    self.input_buffer = note.due_date.map(|d| d.to_string()).unwrap_or_default();
                }
            }
            InputField::NewTask => {}
            InputField::None => return,
        }
        self.input_field = field;
        self.input_mode = InputMode::Editing;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
    }

    /// Commits the input box.
    pub fn handle_input(&mut self) {
        match self.input_field {
            InputField::NoteText => {
                if let Some(id) = self.selected_note.clone() {
                    self.notes.update(&id, &NotePatch::text(&self.input_buffer));
                    self.persist_notes();
                }
            }
            InputField::NoteDue => {
                if let Some(id) = self.selected_note.clone() {
                    match parse_due(&self.input_buffer) {
                        Ok(due) => {
                            self.notes.update(&id, &NotePatch::due_date(due));
                            self.persist_notes();
                        }
                        Err(e) => {
                            // keep the box open so the date can be fixed
                            self.status = Some(e.to_string());
                            return;
                        }
                    }
                }
            }
            InputField::NewTask => {
                if self.tasks.add(&self.input_buffer).is_some() {
                    self.task_state.select(Some(self.tasks.len() - 1));
                }
            }
            InputField::None => {}
        }
        self.cancel_input();
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match self.view {
            View::Board => self.board_mouse(event),
            View::Tasks => self.tasks_mouse(event),
        }
    }

    fn board_mouse(&mut self, event: MouseEvent) {
        let pointer = cell_to_px(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (ox, oy) = self.board_origin();
                let hit = self.notes.hit_test(pointer.0 - ox, pointer.1 - oy).map(|n| n.id.clone());
                self.selected_note = hit.clone();
                if let Some(id) = hit {
                    self.drag = NoteDrag::start(&mut self.notes, &id, (pointer.0 - ox, pointer.1 - oy));
                    self.persist_notes();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let origin = self.board_origin();
                let moved = match &self.drag {
                    Some(drag) => drag.move_to(&mut self.notes, pointer, origin),
                    None => false,
                };
                if moved {
                    self.persist_notes();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag = None;
            }
            _ => {}
        }
    }

    /// Task index under a terminal row, if any.
    fn task_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.task_area;
        if column < area.x || column >= area.x + area.width || row < area.y || row >= area.y + area.height {
            return None;
        }
        let index = usize::from(row - area.y) + self.task_state.offset();
        (index < self.tasks.len()).then_some(index)
    }

    fn tasks_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(i) = self.task_at(event.column, event.row) {
                    self.task_state.select(Some(i));
                    self.reorder.drag_start(i);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.reorder.is_dragging() {
                    if let Some(i) = self.task_at(event.column, event.row) {
                        self.reorder.drag_enter(i);
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let target = self.reorder.target();
                if self.tasks.finish_reorder(&mut self.reorder) {
                    self.task_state.select(target.map(|t| t.min(self.tasks.len() - 1)));
                }
            }
            _ => {}
        }
    }
}
