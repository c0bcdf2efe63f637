//! Slot storage for beatbook
//!
//! All persistent state lives under a single data directory, one JSON file
//! per named slot. A slot always holds a complete serialized collection;
//! writes replace the whole file atomically (temp file + rename) so a
//! reader never sees a partial collection.
//!
//! # Directory Structure
//!
//! ```text
//! <data_dir>/                   # platform data dir by default
//!   tasks.json                  # task collection slot
//!   <key>.json                  # any other named slot
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Application directory name used under the platform data dir
pub const APP_DIR: &str = "beatbook";

/// Storage manager for beatbook slots
#[derive(Debug, Clone)]
pub struct Storage {
    /// Root directory holding one JSON file per slot
    data_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at the given directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve the default platform data directory
    ///
    /// Falls back to a hidden directory under the current working directory
    /// when the platform provides no home (some CI sandboxes).
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", APP_DIR)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")))
    }

    /// Path to the storage root
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the JSON file backing a slot
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    /// Create the data directory if it does not exist yet
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Load the collection stored under `key`
    ///
    /// A missing file and a malformed payload both read as `None` so the
    /// caller can fall back to its default set; only I/O failures on an
    /// existing file surface as errors.
    pub fn load_slot<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(slot = key, %err, "discarding malformed slot");
                Ok(None)
            }
        }
    }

    /// Replace the collection stored under `key`
    pub fn save_slot<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_atomic(&self.slot_path(key), json.as_bytes())
    }

    /// Write data atomically using temp file + rename
    ///
    /// The file is either fully written or not at all; a crash mid-write
    /// leaves the previous slot contents intact.
    pub fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create temp file in same directory (for atomic rename)
        let temp_path = path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        // Atomic rename
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct Record {
        id: String,
        value: i32,
    }

    fn storage() -> (TempDir, Storage) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        (temp, storage)
    }

    #[test]
    fn slot_roundtrip() {
        let (_temp, storage) = storage();

        let records = vec![
            Record {
                id: "1".to_string(),
                value: 10,
            },
            Record {
                id: "2".to_string(),
                value: 20,
            },
        ];

        storage.save_slot("records", &records).unwrap();
        let loaded: Option<Vec<Record>> = storage.load_slot("records").unwrap();

        assert_eq!(loaded, Some(records));
    }

    #[test]
    fn missing_slot_reads_as_none() {
        let (_temp, storage) = storage();
        let loaded: Option<Vec<Record>> = storage.load_slot("absent").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_slot_reads_as_none() {
        let (_temp, storage) = storage();
        storage.init().unwrap();
        fs::write(storage.slot_path("records"), "{not json").unwrap();

        let loaded: Option<Vec<Record>> = storage.load_slot("records").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_replaces_prior_value() {
        let (_temp, storage) = storage();

        storage
            .save_slot(
                "records",
                &vec![Record {
                    id: "1".to_string(),
                    value: 10,
                }],
            )
            .unwrap();
        storage.save_slot("records", &Vec::<Record>::new()).unwrap();

        let loaded: Option<Vec<Record>> = storage.load_slot("records").unwrap();
        assert_eq!(loaded, Some(Vec::new()));
    }

    #[test]
    fn save_creates_data_dir_on_demand() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("nested/data"));

        storage.save_slot("records", &Vec::<Record>::new()).unwrap();
        assert!(storage.slot_path("records").exists());
    }
}
