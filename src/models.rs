use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Text stored when an edit commits nothing but whitespace.
pub const PLACEHOLDER_TEXT: &str = "Untitled";

/// Nominal note footprint in pixels.
pub const NOTE_WIDTH: f64 = 256.0;
pub const NOTE_HEIGHT: f64 = 200.0;

/// Pixel size of one terminal cell on the board.
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// The fixed sticky-note palette.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum NoteColor {
    #[default]
    Yellow,
    Pink,
    Green,
    Blue,
    Purple,
}

impl NoteColor {
    pub const PALETTE: [NoteColor; 5] = [
        NoteColor::Yellow,
        NoteColor::Pink,
        NoteColor::Green,
        NoteColor::Blue,
        NoteColor::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NoteColor::Yellow => "yellow",
            NoteColor::Pink => "pink",
            NoteColor::Green => "green",
            NoteColor::Blue => "blue",
            NoteColor::Purple => "purple",
        }
    }
}

// Anything outside the palette renders as the default colour.
impl From<String> for NoteColor {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pink" => NoteColor::Pink,
            "green" => NoteColor::Green,
            "blue" => NoteColor::Blue,
            "purple" => NoteColor::Purple,
            _ => NoteColor::Yellow,
        }
    }
}

impl From<NoteColor> for String {
    fn from(c: NoteColor) -> Self {
        c.name().to_string()
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single note on the board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StickyNote {
    /// Unique identifier (UUID v4).
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    /// Left edge in pixels, relative to the board origin.
    pub x: f64,
    /// Top edge in pixels, relative to the board origin.
    pub y: f64,
    /// Stacking index; higher draws on top.
    pub z: i64,
    #[serde(default)]
    pub color: NoteColor,
}

impl StickyNote {
    /// Returns a copy of this note with every field set in `patch` replaced.
    pub fn merged(&self, patch: &NotePatch) -> StickyNote {
        StickyNote {
            id: self.id.clone(),
            text: patch.text.clone().unwrap_or_else(|| self.text.clone()),
            due_date: patch.due_date.unwrap_or(self.due_date),
            completed: patch.completed.unwrap_or(self.completed),
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            z: patch.z.unwrap_or(self.z),
            color: patch.color.unwrap_or(self.color),
        }
    }

    /// Whether the pixel point falls inside the note's footprint.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + NOTE_WIDTH && py >= self.y && py < self.y + NOTE_HEIGHT
    }

    /// Text as displayed; an empty note shows the placeholder.
    pub fn display_text(&self) -> &str {
        if self.text.is_empty() {
            PLACEHOLDER_TEXT
        } else {
            &self.text
        }
    }
}

/// Partial update of a [`StickyNote`]. `None` leaves the field alone.
///
/// `due_date` is tri-state: `None` keeps it, `Some(None)` clears it,
/// `Some(Some(d))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub text: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<i64>,
    pub color: Option<NoteColor>,
}

impl NotePatch {
    pub fn position(x: f64, y: f64) -> Self {
        NotePatch { x: Some(x), y: Some(y), ..Default::default() }
    }

    pub fn text(input: &str) -> Self {
        NotePatch { text: Some(commit_text(input)), ..Default::default() }
    }

    pub fn due_date(due: Option<NaiveDate>) -> Self {
        NotePatch { due_date: Some(due), ..Default::default() }
    }

    pub fn completed(completed: bool) -> Self {
        NotePatch { completed: Some(completed), ..Default::default() }
    }
}

/// Trims edited text, falling back to the placeholder when nothing is left.
pub fn commit_text(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_TEXT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses a due-date input. A blank input clears the date.
pub fn parse_due(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| Error::InvalidDate(trimmed.to_string()))
}

/// Represents a single entry in the to-do list. Tasks live for the session
/// only and are never written to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Never empty after trimming.
    pub text: String,
    pub completed: bool,
    /// Creation time in epoch milliseconds. Informational only.
    pub created_at: i64,
}

/// Visible board area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// Viewport covering a terminal area of `cols` x `rows` cells.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Viewport::new(f64::from(cols) * CELL_WIDTH_PX, f64::from(rows) * CELL_HEIGHT_PX)
    }

    /// Top-left position that centres a note in this viewport.
    pub fn centered_note_origin(&self) -> (f64, f64) {
        (self.width / 2.0 - NOTE_WIDTH / 2.0, self.height / 2.0 - NOTE_HEIGHT / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(1280.0, 720.0)
    }
}
