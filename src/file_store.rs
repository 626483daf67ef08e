//! A [`KeyValueStore`] kept in a directory on disk.
//!
//! Every key is one file named `<escaped key>.kv` whose contents are the raw
//! value. Writes go through a temporary file in the same directory and are
//! moved into place atomically, so a reader sees either the old value or the
//! new one.
use std::{
    borrow::Cow,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use log::{debug, error, info, trace, warn};
use tempfile::NamedTempFile;
use tokio::task;
use walkdir::WalkDir;

use crate::{JournalError, KeyValueStore, Result};

const VALUE_EXTENSION: &str = "kv";

/// Directory-backed storage used by the command-line journal.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            debug!("Data directory does not exist, creating: {}", root.display());
            fs::create_dir_all(&root).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                JournalError::DirectoryError { path: root.clone() }
            })?;
        }
        info!("Opened file store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", escape_key(key), VALUE_EXTENSION))
    }
}

/// Makes a key safe to use as a file name.
fn escape_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

/// Recovers the key from a file stem. Stems that are not exactly what
/// [`escape_key`] would produce are rejected.
fn unescape_key(stem: &str) -> Option<String> {
    let key = urlencoding::decode(stem).ok().map(Cow::into_owned)?;
    (escape_key(&key) == stem).then_some(key)
}

fn join_error(e: task::JoinError) -> JournalError {
    JournalError::Storage {
        message: format!("storage task failed: {}", e),
    }
}

/// Replaces the file at `path` with `value` atomically.
fn write_atomically(path: &Path, value: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
        error!("Failed to create temporary file: {}", e);
        JournalError::Io(e)
    })?;

    temp_file.write_all(value.as_bytes()).map_err(|e| {
        error!("Failed to write to temporary file: {}", e);
        JournalError::Io(e)
    })?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| {
        error!("Failed to persist file {}: {}", path.display(), e.error);
        JournalError::Io(e.error)
    })?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                Err(JournalError::Io(e))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        trace!("Writing key {} to {}", key, path.display());
        let value = value.to_string();
        task::spawn_blocking(move || write_atomically(&path, &value))
            .await
            .map_err(join_error)?
    }

    async fn get_all_keys(&self) -> Result<Vec<String>> {
        let root = self.root.clone();
        task::spawn_blocking(move || -> Result<Vec<String>> {
            let mut keys = Vec::new();
            for entry in WalkDir::new(&root).min_depth(1).max_depth(1) {
                let entry = entry.map_err(|e| JournalError::Storage {
                    message: format!("failed to list {}: {}", root.display(), e),
                })?;
                let path = entry.path();
                if !entry.file_type().is_file()
                    || !path.extension().is_some_and(|ext| ext == VALUE_EXTENSION)
                {
                    continue;
                }
                match path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(unescape_key)
                {
                    Some(key) => keys.push(key),
                    None => warn!("Ignoring unrecognised file {}", path.display()),
                }
            }
            Ok(keys)
        })
        .await
        .map_err(join_error)?
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push((key.clone(), self.get(key).await?));
        }
        Ok(values)
    }

    async fn multi_remove(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            let path = self.path_for(key);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => trace!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    error!("Failed to remove {}: {}", path.display(), e);
                    return Err(JournalError::Io(e));
                }
            }
        }
        debug!("Removed {} keys from {}", keys.len(), self.root.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn setup() -> (TempDir, FileKvStore) {
        let tmp = TempDir::new().unwrap();
        let store = FileKvStore::open(tmp.path().join("data")).unwrap();
        (tmp, store)
    }

    #[test]
    fn escaping_round_trips() {
        for key in ["journal_2024-03-15", "a/b c", "héllo", "%41", "", "..", "x.kv"] {
            assert_eq!(unescape_key(&escape_key(key)).as_deref(), Some(key));
        }
        assert!(!escape_key("a/b").contains('/'));
    }

    #[test]
    fn non_canonical_stems_are_rejected() {
        assert_eq!(unescape_key("bad%Z1"), None);
        assert_eq!(unescape_key("bad%+1"), None);
        assert_eq!(unescape_key("a%2fb"), None);
        assert_eq!(unescape_key("a b"), None);
    }

    #[test]
    fn open_creates_missing_directory() {
        let (_tmp, store) = setup();
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn set_get_overwrite() {
        let (_tmp, store) = setup();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn lists_keys_with_unusual_characters() {
        let (_tmp, store) = setup();
        store.set("journal_2024-01-01", "a").await.unwrap();
        store.set("prefs/theme.dark", "b").await.unwrap();

        let mut keys = store.get_all_keys().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["journal_2024-01-01", "prefs/theme.dark"]);
    }

    #[tokio::test]
    async fn ignores_foreign_files() {
        let (_tmp, store) = setup();
        fs::write(store.root().join("notes.txt"), "hi").unwrap();
        fs::write(store.root().join("bad%Z1.kv"), "hi").unwrap();
        fs::write(store.root().join("bad%+1.kv"), "hi").unwrap();
        fs::create_dir(store.root().join("nested.kv")).unwrap();
        store.set("real", "1").await.unwrap();

        assert_eq!(store.get_all_keys().await.unwrap(), vec!["real".to_string()]);
    }

    #[tokio::test]
    async fn multi_remove_ignores_missing_keys() {
        let (_tmp, store) = setup();
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store
            .multi_remove(&["a".to_string(), "zzz".to_string()])
            .await
            .unwrap();
        assert_eq!(store.get_all_keys().await.unwrap(), vec!["b".to_string()]);
    }
}
