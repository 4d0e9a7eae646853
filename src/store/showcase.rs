use super::traits::KeyValueStore;
use crate::catalog::Design;
use crate::error::PersistenceError;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DESIGNS_KEY: &str = "handloomDesigns";
pub const CONTACT_EMAIL_KEY: &str = "weaverContactEmail";

/// Everything read back at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub designs: Vec<Design>,
    pub contact_email: Option<String>,
}

/// Best-effort persistence of the catalog and the weaver contact.
///
/// Reads fail soft to empty defaults and writes only log on failure: the
/// in-memory state stays authoritative for the running session.
#[derive(Clone)]
pub struct ShowcaseStore {
    backend: Arc<dyn KeyValueStore>,
}

impl ShowcaseStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub async fn load(&self) -> PersistedState {
        PersistedState {
            designs: self.load_designs().await,
            contact_email: self.load_contact().await,
        }
    }

    async fn load_designs(&self) -> Vec<Design> {
        let raw = match self.backend.get(DESIGNS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key = DESIGNS_KEY, "could not read designs from store: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Design>>(&raw) {
            Ok(designs) => {
                debug!(count = designs.len(), "loaded designs from store");
                designs
            }
            Err(err) => {
                warn!(key = DESIGNS_KEY, "could not parse designs from store: {err}");
                Vec::new()
            }
        }
    }

    async fn load_contact(&self) -> Option<String> {
        match self.backend.get(CONTACT_EMAIL_KEY).await {
            Ok(value) => value.filter(|email| !email.trim().is_empty()),
            Err(err) => {
                warn!(key = CONTACT_EMAIL_KEY, "could not read contact email from store: {err}");
                None
            }
        }
    }

    /// Serialize and write the whole collection.
    pub async fn save_designs(&self, designs: &[Design]) {
        if let Err(err) = self.try_save_designs(designs).await {
            warn!(key = DESIGNS_KEY, "could not save designs to store: {err}");
        }
    }

    async fn try_save_designs(&self, designs: &[Design]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(designs)?;
        self.backend.set(DESIGNS_KEY, &json).await
    }

    /// Write the contact email, or remove the entry when `None`.
    pub async fn save_contact(&self, email: Option<&str>) {
        let result = match email {
            Some(email) => self.backend.set(CONTACT_EMAIL_KEY, email).await,
            None => self.backend.remove(CONTACT_EMAIL_KEY).await,
        };
        if let Err(err) = result {
            warn!(key = CONTACT_EMAIL_KEY, "could not save contact email to store: {err}");
        }
    }

    /// Drop both entries. Unlike the save paths this reports failure, since
    /// it is an explicit user action.
    pub async fn clear(&self) -> Result<(), PersistenceError> {
        self.backend.remove(DESIGNS_KEY).await?;
        self.backend.remove(CONTACT_EMAIL_KEY).await
    }
}
