//! Workout history persistence.
//!
//! The whole history lives in one named slot as a single JSON blob: an
//! array of workout records, newest first. The slot is abstracted
//! behind [`HistorySlot`] so tests can swap the file for an in-memory
//! cell.
//!
//! Persistence failures never surface to callers. A missing or corrupt
//! slot loads as an empty history, and a failed write leaves the prior
//! persisted state untouched. Both are logged.

use crate::{Result, Workout};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Default file name for the history slot inside the data directory
pub const HISTORY_FILE_NAME: &str = "history.json";

/// A named slot in some persistent medium, holding one string blob
///
/// `read` returns `Ok(None)` when the slot has never been written.
pub trait HistorySlot {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, contents: &str) -> Result<()>;
}

/// File-backed slot with shared/exclusive locking and atomic replace
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional slot location inside a data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(HISTORY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySlot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        Ok(Some(contents))
    }

    /// Write by staging to a temp file in the same directory, then
    /// renaming over the slot, so a failed write can never leave a
    /// half-serialized history behind.
    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "history path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path)
            .map_err(|e| crate::Error::Io(e.error))?;

        tracing::debug!("Wrote history to {:?}", self.path);
        Ok(())
    }
}

/// In-memory slot for tests and fakes
#[derive(Default)]
pub struct MemorySlot {
    contents: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistorySlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self
            .contents
            .lock()
            .map_err(|_| crate::Error::Store("memory slot poisoned".into()))?
            .clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        *self
            .contents
            .lock()
            .map_err(|_| crate::Error::Store("memory slot poisoned".into()))? =
            Some(contents.to_string());
        Ok(())
    }
}

/// Ordered workout history over a backing slot
///
/// The newest workout is always at index 0. Every mutation re-saves the
/// full list before returning, so the store never holds unpersisted
/// state past a single call.
pub struct HistoryStore<S: HistorySlot> {
    slot: S,
}

impl<S: HistorySlot> HistoryStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Load the full history, newest first.
    ///
    /// An absent slot or an unreadable/corrupt blob loads as an empty
    /// list; an empty history is always a safe fallback.
    pub fn load(&self) -> Vec<Workout> {
        let blob = match self.slot.read() {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::debug!("No history slot yet, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read history: {}. Starting empty.", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Workout>>(&blob) {
            Ok(workouts) => workouts,
            Err(e) => {
                tracing::warn!("Failed to parse history: {}. Starting empty.", e);
                Vec::new()
            }
        }
    }

    /// Persist the given list as the entire history.
    ///
    /// Best-effort: a failed write is logged and the previously
    /// persisted state stays in place. No retry.
    pub fn save(&self, workouts: &[Workout]) {
        let blob = match serde_json::to_string(workouts) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("Failed to serialize history: {}", e);
                return;
            }
        };

        if let Err(e) = self.slot.write(&blob) {
            tracing::warn!("Failed to write history: {}", e);
        }
    }

    /// Prepend a workout and persist. Returns the updated list.
    pub fn insert_front(&self, workout: Workout) -> Vec<Workout> {
        let mut workouts = self.load();
        workouts.insert(0, workout);
        self.save(&workouts);
        workouts
    }

    /// Remove the workout with the given id and persist.
    ///
    /// A missing id is a no-op; relative order of the rest is kept.
    pub fn remove_by_id(&self, id: &str) -> Vec<Workout> {
        let mut workouts = self.load();
        let before = workouts.len();
        workouts.retain(|w| w.id != id);
        if workouts.len() == before {
            tracing::debug!("No workout with id {} to remove", id);
            return workouts;
        }
        self.save(&workouts);
        workouts
    }

    /// Drop every workout and persist the empty list.
    pub fn clear(&self) {
        self.save(&[]);
    }
}
