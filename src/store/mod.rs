//! Persisted client-side state.
//!
//! Each store is a `Persisted<T>`: hydrated from a JSON file on startup and
//! written back on every change. Stores without a path live in memory only.

pub mod auth;
pub mod preferences;

use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::config::StorageConfig;

pub use auth::{AuthState, AuthStore};
pub use preferences::{Locale, Preferences, PreferencesStore, Theme};

pub const SESSION_FILE: &str = "session.json";
pub const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HOME environment variable not set")]
    MissingHome,

    #[error("State file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct Persisted<T> {
    path: Option<PathBuf>,
    state: T,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn in_memory() -> Self {
        Self::in_memory_with(T::default())
    }

    pub fn in_memory_with(state: T) -> Self {
        Self { path: None, state }
    }

    /// Load state from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn hydrate(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let state = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str(&content) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Discarding unreadable state file {}: {}", path.display(), e);
                    T::default()
                }
            }
        } else {
            T::default()
        };

        Ok(Self {
            path: Some(path),
            state,
        })
    }

    pub fn get(&self) -> &T {
        &self.state
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Apply a change and write it through
    pub fn update<R>(&mut self, change: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        let result = change(&mut self.state);
        self.save()?;
        Ok(result)
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.state = T::default();
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.state)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Directory holding the state files
pub fn config_dir(storage: &StorageConfig) -> Result<PathBuf, StoreError> {
    if let Some(dir) = &storage.config_dir {
        return Ok(dir.clone());
    }

    let home = std::env::var("HOME").map_err(|_| StoreError::MissingHome)?;
    Ok(PathBuf::from(home).join(".config").join("dragofactu"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("dragofactu-store-{}", uuid::Uuid::new_v4().simple()))
            .join(name)
    }

    #[test]
    fn test_update_writes_through_and_hydrate_reads_back() {
        let path = scratch_file("counter.json");

        let mut store = Persisted::<Counter>::hydrate(&path).unwrap();
        assert_eq!(store.get().value, 0);
        store.update(|c| c.value = 7).unwrap();

        let reloaded = Persisted::<Counter>::hydrate(&path).unwrap();
        assert_eq!(reloaded.get(), &Counter { value: 7 });
    }

    #[test]
    fn test_reset_persists_defaults() {
        let path = scratch_file("counter.json");

        let mut store = Persisted::<Counter>::hydrate(&path).unwrap();
        store.update(|c| c.value = 3).unwrap();
        store.reset().unwrap();

        let reloaded = Persisted::<Counter>::hydrate(&path).unwrap();
        assert_eq!(reloaded.get().value, 0);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let path = scratch_file("counter.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let store = Persisted::<Counter>::hydrate(&path).unwrap();
        assert_eq!(store.get().value, 0);
    }

    #[test]
    fn test_in_memory_store_never_touches_disk() {
        let mut store = Persisted::<Counter>::in_memory();
        store.update(|c| c.value += 1).unwrap();
        assert_eq!(store.get().value, 1);
        assert!(store.path().is_none());
    }

    #[test]
    fn test_config_dir_override() {
        let storage = StorageConfig {
            config_dir: Some(PathBuf::from("/tmp/dragofactu-test")),
        };
        assert_eq!(config_dir(&storage).unwrap(), PathBuf::from("/tmp/dragofactu-test"));
    }
}
