// File: ./src/storage.rs
// File-backed preference store.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the on-disk layout of PreferenceData require incrementing
// PREFERENCES_VERSION below.
use crate::context::AppContext;
use crate::prefs::PreferenceStore;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const PREFERENCES_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Default)]
struct PreferenceData {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Preferences persisted as JSON in the data directory.
///
/// Every access goes to disk under an exclusive lock, so several processes
/// can share one file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn open(ctx: &dyn AppContext) -> Result<Self> {
        Ok(Self::at(ctx.get_preferences_path()?))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_lock_path(file_path: &Path) -> PathBuf {
        file_path.with_extension("lock")
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    fn read_unlocked(&self) -> Result<PreferenceData> {
        if !self.path.exists() {
            return Ok(PreferenceData {
                version: PREFERENCES_VERSION,
                values: BTreeMap::new(),
            });
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences '{}'", self.path.display()))?;
        let data: PreferenceData = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse preferences '{}'", self.path.display()))?;
        if data.version != PREFERENCES_VERSION {
            log::info!(
                "Upgrading preferences from v{} to v{}",
                data.version,
                PREFERENCES_VERSION
            );
        }
        Ok(data)
    }

    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        Self::with_lock(&self.path, || {
            let mut data = self.read_unlocked()?;
            f(&mut data.values);
            data.version = PREFERENCES_VERSION;
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(&self.path, json)
        })
    }

    pub fn try_get(&self, key: &str) -> Result<Option<String>> {
        Self::with_lock(&self.path, || {
            Ok(self.read_unlocked()?.values.get(key).cloned())
        })
    }

    pub fn try_set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    pub fn try_remove(&self, key: &str) -> Result<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

// A broken preferences file must not take quick entry down with it: failures
// are logged and reads fall back to "unset".
impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        match self.try_get(key) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Failed to read preference '{}': {:#}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.try_set(key, value) {
            log::warn!("Failed to save preference '{}': {:#}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.try_remove(key) {
            log::warn!("Failed to remove preference '{}': {:#}", key, e);
        }
    }
}
