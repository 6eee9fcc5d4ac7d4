// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed slot store: one `<key>.json` file per key under a data directory.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::db::{KeyValueStore, StorageError};

/// Durable slots stored as files in `data_dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|source| StorageError::Io {
            key: data_dir.display().to_string(),
            source,
        })?;

        tracing::info!(path = %data_dir.display(), "Opened file store");
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File path for a key. Keys are plain names, never paths.
    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        atomic_write(&path, value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Write to a sibling temp file, flush it to disk, then rename over the target.
fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_directory() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested").join("data");

        let store = FileStore::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.data_dir(), dir.as_path());
    }

    #[test]
    fn test_set_get_remove() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::open(temp.path()).unwrap();

        assert_eq!(store.get("workouts").unwrap(), None);

        store.set("workouts", "[]").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[]"));
        assert!(temp.path().join("workouts.json").exists());
        assert!(!temp.path().join("workouts.json.tmp").exists());

        store.set("workouts", "[1,2]").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[1,2]"));

        store.remove("workouts").unwrap();
        assert_eq!(store.get("workouts").unwrap(), None);
    }

    #[test]
    fn test_atomic_write_replaces_content_and_leaves_no_temp_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("workouts.json");
        fs::write(&path, "[\"old\"]").unwrap();

        atomic_write(&path, "[\"new\"]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[\"new\"]");
        assert!(!temp.path().join("workouts.json.tmp").exists());
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::open(temp.path()).unwrap();
        assert!(store.remove("workouts").is_ok());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::open(temp.path()).unwrap();

        for key in ["", "../escape", "a/b", "dot.key"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
