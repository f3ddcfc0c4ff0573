//! Small key/value preference store with per-entry lifetimes.
//!
//! Values are stored as JSON. Session entries live only as long as the
//! store; the others are written to disk by `save` and expire after their
//! lifetime, at which point reads fall back to the caller's default.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Lifetime of the long-lived preferences: 400 days.
pub const LONG_LIFETIME_SECS: i64 = 60 * 60 * 24 * 400;

/// Errors from the preference store.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Failed to encode preference '{name}': {source}")]
    Encode {
        name: String,
        source: serde_json::Error,
    },

    #[error("Preference file {path} is not valid: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize preferences for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to access preference file: {0}")]
    Io(#[from] std::io::Error),
}

/// How long a stored preference stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Dropped when the store is dropped; never written to disk
    Session,
    /// Expires after the given number of seconds
    Seconds(i64),
    /// Expires after [`LONG_LIFETIME_SECS`]
    Long,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: serde_json::Value,
    /// Unix seconds; `None` for session entries
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,
}

impl StoredValue {
    fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Named preferences backed by an optional JSON file.
#[derive(Debug, Default)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, StoredValue>,
}

impl PreferenceStore {
    /// A store that is never persisted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the store from `path`. A missing file yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| PreferenceError::Corrupt {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), "preferences loaded");
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// Default location: `<data_dir>/tubekeys/prefs.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("tubekeys").join("prefs.json"))
    }

    /// Store `value` under `name` for the given lifetime.
    pub fn store<T: Serialize>(
        &mut self,
        name: &str,
        value: &T,
        lifetime: Lifetime,
    ) -> Result<(), PreferenceError> {
        let value = serde_json::to_value(value).map_err(|source| PreferenceError::Encode {
            name: name.to_string(),
            source,
        })?;
        let now = Utc::now().timestamp();
        let expires_at = match lifetime {
            Lifetime::Session => None,
            Lifetime::Seconds(secs) => Some(now.saturating_add(secs)),
            Lifetime::Long => Some(now.saturating_add(LONG_LIFETIME_SECS)),
        };
        self.entries
            .insert(name.to_string(), StoredValue { value, expires_at });
        Ok(())
    }

    /// Read `name`, falling back to `default` when missing, expired, or of
    /// the wrong shape.
    pub fn retrieve<T: DeserializeOwned>(&self, name: &str, default: T) -> T {
        let now = Utc::now().timestamp();
        match self.entries.get(name) {
            Some(stored) if !stored.is_expired(now) => {
                match serde_json::from_value(stored.value.clone()) {
                    Ok(value) => value,
                    Err(e) => {
                        warn!("preference '{}' has unexpected shape: {}", name, e);
                        default
                    }
                }
            }
            _ => default,
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Write persistent, unexpired entries to the backing file.
    pub fn save(&self) -> Result<(), PreferenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let now = Utc::now().timestamp();
        let persisted: BTreeMap<&String, &StoredValue> = self
            .entries
            .iter()
            .filter(|(_, v)| v.expires_at.is_some() && !v.is_expired(now))
            .collect();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&persisted).map_err(|source| {
            PreferenceError::Serialize {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(path, json)?;
        debug!(path = %path.display(), entries = persisted.len(), "preferences saved");
        Ok(())
    }
}
