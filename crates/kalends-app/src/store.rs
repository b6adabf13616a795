//! Event persistence -- load/save the full event list as a JSON blob.
//!
//! A missing or unparseable blob loads as an empty list; startup never fails
//! on bad data. Saves overwrite the whole snapshot.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use kalends_engine::Event;
use tracing::warn;

use crate::error::StoreError;

/// Full-snapshot persistence for the event list.
pub trait EventStore {
    /// The previously saved events, or an empty list when nothing usable is
    /// stored.
    fn load(&self) -> Vec<Event>;

    /// Overwrite the stored snapshot with `events`.
    fn save(&self, events: &[Event]) -> Result<(), StoreError>;
}

/// File-backed store holding the event list as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStore for JsonFileStore {
    fn load(&self) -> Vec<Event> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(events) => events,
            Err(err) => {
                warn!(
                    "corrupt event store at {}, starting empty: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn save(&self, events: &[Event]) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(events)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write a sibling temp file and rename it into place, so a crashed
        // write never leaves a truncated blob behind.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store for tests and embedders that manage their own blob.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw blob, exactly as a file would hold it.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(blob.into())),
        }
    }

    /// The raw stored blob, if anything has been saved.
    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl EventStore for MemoryStore {
    fn load(&self) -> Vec<Event> {
        let blob = self.blob.borrow();
        let Some(raw) = blob.as_deref() else {
            return Vec::new();
        };
        match serde_json::from_str(raw) {
            Ok(events) => events,
            Err(err) => {
                warn!("corrupt in-memory event blob, starting empty: {}", err);
                Vec::new()
            }
        }
    }

    fn save(&self, events: &[Event]) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(events)?;
        *self.blob.borrow_mut() = Some(blob);
        Ok(())
    }
}
