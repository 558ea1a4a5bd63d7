// File: ./src/prefs.rs
//! Key-value preference store consumed by the template processor.
use std::collections::HashMap;
use std::sync::Mutex;

/// Preference key holding the template line separator.
pub const SEPARATOR_KEY: &str = "template_separator";

/// A synchronous string map. Implementations decide where values live.
pub trait PreferenceStore: Send + Sync + std::fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let prefs = Self::new();
        prefs.set(key, value);
        prefs
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

pub type SharedPreferences = std::sync::Arc<dyn PreferenceStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let prefs = MemoryPreferences::with(SEPARATOR_KEY, "|");
        assert_eq!(prefs.get(SEPARATOR_KEY).as_deref(), Some("|"));
        prefs.remove(SEPARATOR_KEY);
        assert_eq!(prefs.get(SEPARATOR_KEY), None);
    }
}
