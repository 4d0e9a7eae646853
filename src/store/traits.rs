use crate::error::PersistenceError;
use async_trait::async_trait;

/// String-keyed persistence backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Backend name for logs and `status`.
    fn name(&self) -> &str;

    /// Read a value. A missing key is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Remove a key. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Keys are restricted to ASCII alphanumerics, `-` and `_` so they map
/// cleanly onto file names.
pub fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}
