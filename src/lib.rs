//! Sticky-notes board and drag-to-reorder to-do list for the terminal.

pub mod commands;
pub mod config;
pub mod drag;
pub mod error;
pub mod logging;
pub mod models;
pub mod notes;
pub mod reorder;
pub mod storage;
pub mod tasks;
pub mod tui;

pub use error::{Error, Result};
