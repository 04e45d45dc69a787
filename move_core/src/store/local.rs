//! Local key-value persistence.
//!
//! The engine writes its whole snapshot under a single key on every
//! mutation. `FileStore` keeps one JSON file per key. Writers take an
//! exclusive lock on a `.lock` sidecar next to the record and replace the
//! record by rename, so readers never observe a half-written file.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Key the progress snapshot is stored under
pub const PROGRESS_KEY: &str = "workout-tracker-progress";

/// Durable key-value storage scoped to the running client
pub trait LocalStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key under a data directory
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }

    /// Sidecar file writers of `key` lock against each other
    pub fn lock_path_for(&self, key: &str) -> PathBuf {
        let mut path = self.path_for(key).into_os_string();
        path.push(".lock");
        PathBuf::from(path)
    }
}

impl LocalStore for FileStore {
    /// Read with a shared lock
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        let _ = file.unlock();
        read?;

        tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
        Ok(Some(contents))
    }

    /// Atomically writes the value by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path_for(key))?;
        lock.lock_exclusive()?;

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(&self.dir)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;
        lock.unlock()?;

        tracing::debug!("Saved {} to {:?}", key, path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| Error::Other("memory store lock poisoned".into()))
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set(PROGRESS_KEY, r#"{"streak":2}"#).unwrap();
        assert_eq!(
            store.get(PROGRESS_KEY).unwrap().as_deref(),
            Some(r#"{"streak":2}"#)
        );
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested"));
        assert!(store.get(PROGRESS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_atomic_save() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set(PROGRESS_KEY, "{}").unwrap();
        store.set(PROGRESS_KEY, r#"{"a":1}"#).unwrap();

        // Verify the record exists and no stray temp files remain
        let mut files: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        files.sort();
        assert_eq!(
            files,
            vec![
                std::ffi::OsString::from("workout-tracker-progress.json"),
                std::ffi::OsString::from("workout-tracker-progress.json.lock"),
            ]
        );
    }

    #[test]
    fn test_writer_waits_for_lock_holder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());
        store.set(PROGRESS_KEY, "{}").unwrap();

        let holder = File::open(store.lock_path_for(PROGRESS_KEY)).unwrap();
        holder.lock_exclusive().unwrap();

        let writer_store = store.clone();
        let writer = std::thread::spawn(move || writer_store.set(PROGRESS_KEY, r#"{"a":1}"#));

        std::thread::sleep(std::time::Duration::from_millis(200));
        assert_eq!(store.get(PROGRESS_KEY).unwrap().as_deref(), Some("{}"));

        holder.unlock().unwrap();
        writer.join().unwrap().unwrap();
        assert_eq!(store.get(PROGRESS_KEY).unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_keys_are_sanitized() {
        let store = FileStore::new("/data");
        assert_eq!(
            store.path_for("../etc/passwd"),
            PathBuf::from("/data/___etc_passwd.json")
        );
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
