use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Well-known slots the client keeps between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DraftKey {
    PendingReviewData,
    UserRole,
    HasCompletedOnboarding,
    AdminProfilePicture,
}

impl DraftKey {
    pub const ALL: [DraftKey; 4] = [
        DraftKey::PendingReviewData,
        DraftKey::UserRole,
        DraftKey::HasCompletedOnboarding,
        DraftKey::AdminProfilePicture,
    ];

    pub const fn storage_key(self) -> &'static str {
        match self {
            DraftKey::PendingReviewData => "pendingReviewData",
            DraftKey::UserRole => "userRole",
            DraftKey::HasCompletedOnboarding => "hasCompletedOnboarding",
            DraftKey::AdminProfilePicture => "adminProfilePicture",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("draft storage io failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("draft value could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("draft storage unavailable: {0}")]
    Unavailable(String),
}

/// String key/value storage with last-write-wins semantics.
pub trait DraftStore: Send + Sync {
    fn get(&self, key: DraftKey) -> Result<Option<String>, DraftError>;
    fn set(&self, key: DraftKey, value: String) -> Result<(), DraftError>;
    fn remove(&self, key: DraftKey) -> Result<(), DraftError>;
}

#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    values: Mutex<HashMap<DraftKey, String>>,
}

impl MemoryDraftStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<DraftKey, String>>, DraftError> {
        self.values
            .lock()
            .map_err(|_| DraftError::Unavailable("draft mutex poisoned".to_string()))
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, key: DraftKey) -> Result<Option<String>, DraftError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    fn set(&self, key: DraftKey, value: String) -> Result<(), DraftError> {
        self.lock()?.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: DraftKey) -> Result<(), DraftError> {
        self.lock()?.remove(&key);
        Ok(())
    }
}

/// One JSON object on disk, keyed by the storage names. Rewritten through a sibling temp file
/// on every change; an unreadable file is treated as empty and replaced on the next write.
#[derive(Debug)]
pub struct FileDraftStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, DraftError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(DraftError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(values) => Ok(values),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding unreadable draft file"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), DraftError> {
        let encoded = serde_json::to_string_pretty(values)?;
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DraftError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let staging = self.staging_path();
        fs::write(&staging, encoded).map_err(|source| DraftError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| DraftError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn update<F>(&self, change: F) -> Result<(), DraftError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _lock = self
            .guard
            .lock()
            .map_err(|_| DraftError::Unavailable("draft file lock poisoned".to_string()))?;
        let mut values = self.read_all()?;
        change(&mut values);
        self.write_all(&values)
    }
}

impl DraftStore for FileDraftStore {
    fn get(&self, key: DraftKey) -> Result<Option<String>, DraftError> {
        let _lock = self
            .guard
            .lock()
            .map_err(|_| DraftError::Unavailable("draft file lock poisoned".to_string()))?;
        Ok(self.read_all()?.remove(key.storage_key()))
    }

    fn set(&self, key: DraftKey, value: String) -> Result<(), DraftError> {
        self.update(|values| {
            values.insert(key.storage_key().to_string(), value);
        })
    }

    fn remove(&self, key: DraftKey) -> Result<(), DraftError> {
        self.update(|values| {
            values.remove(key.storage_key());
        })
    }
}
