use super::traits::{KeyValueStore, validate_key};
use crate::error::PersistenceError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-backed store — one file per key as source of truth
///
/// Layout:
///   store/handloomDesigns       — JSON design array
///   store/weaverContactEmail    — plain email string
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    async fn ensure_root(&self) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        validate_key(key)?;
        match fs::read_to_string(self.entry_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        validate_key(key)?;
        self.ensure_root().await?;

        // Write beside the target and rename so readers never see a torn file.
        let path = self.entry_path(key);
        let tmp = self.root.join(format!(".{key}.tmp"));
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        validate_key(key)?;
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
