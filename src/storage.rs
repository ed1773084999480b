use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::StickyNote;

pub const NOTES_KEY: &str = "sticky-notes";
pub const DARK_MODE_KEY: &str = "darkMode";

/// Key-value persistence in the shape of browser local storage: string keys
/// mapped to serialized string values.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Returns the path to the storage file (`storage.json`).
///
/// The path is determined in the following order:
/// 1. `STICKIES_DB` environment variable.
/// 2. `~/.local/share/stickies/storage.json` (on Linux).
/// 3. `./storage.json` (fallback).
pub fn db_path() -> PathBuf {
    std::env::var("STICKIES_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("stickies");
        p.push("storage.json");
        p
    })
}

/// Storage backed by a single JSON object on disk.
///
/// The whole file is rewritten on every `set`, like the snapshot it holds.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage file, treating a missing or unreadable file as empty.
    pub fn open(path: impl Into<PathBuf>) -> FileStorage {
        let path = path.into();
        let entries = read_entries(&path);
        debug!(path = %path.display(), keys = entries.len(), "opened storage");
        FileStorage { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let s = serde_json::to_string_pretty(&self.entries)?;
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        f.write_all(s.as_bytes())?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> BTreeMap<String, String> {
    if !path.exists() {
        return BTreeMap::new();
    }
    let mut f = match OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "storage file unreadable");
            return BTreeMap::new();
        }
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return BTreeMap::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "storage file is not a JSON object");
        BTreeMap::new()
    })
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Storage that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Loads all notes.
///
/// Returns an empty vector if the key is absent or its value does not parse.
pub fn load_notes(storage: &dyn Storage) -> Vec<StickyNote> {
    let Some(raw) = storage.get(NOTES_KEY) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(key = NOTES_KEY, error = %e, "discarding malformed notes");
        Vec::new()
    })
}

/// Saves the full note collection, replacing the previous snapshot.
pub fn save_notes(storage: &mut dyn Storage, notes: &[StickyNote]) -> Result<()> {
    let s = serde_json::to_string(notes)?;
    storage.set(NOTES_KEY, s)?;
    debug!(count = notes.len(), "saved notes");
    Ok(())
}

/// Loads the dark-mode flag, or `system_default` when unset or malformed.
pub fn load_dark_mode(storage: &dyn Storage, system_default: bool) -> bool {
    storage
        .get(DARK_MODE_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or(system_default)
}

pub fn save_dark_mode(storage: &mut dyn Storage, dark: bool) -> Result<()> {
    storage.set(DARK_MODE_KEY, serde_json::to_string(&dark)?)
}

/// Deletes every persisted key.
pub fn reset(storage: &mut dyn Storage) -> Result<()> {
    storage.remove(NOTES_KEY)?;
    storage.remove(DARK_MODE_KEY)
}
