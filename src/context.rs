// File: ./src/context.rs
//! Where notedo keeps its files.
//!
//! Config and data live in two directories. `StandardContext` takes them from
//! the platform (`directories`) or from one override root; `TestContext`
//! puts both under a throwaway temp dir. Anything touching disk is handed a
//! `&dyn AppContext`.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

pub const ROOT_ENV_VAR: &str = "NOTEDO_ROOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    Config,
    Data,
}

impl DirKind {
    /// Subdirectory name used under an override root.
    fn subdir(self) -> &'static str {
        match self {
            DirKind::Config => "config",
            DirKind::Data => "data",
        }
    }
}

pub trait AppContext: Send + Sync + std::fmt::Debug {
    /// Location of `kind`; may not exist yet.
    fn locate(&self, kind: DirKind) -> Result<PathBuf>;

    fn get_dir(&self, kind: DirKind) -> Result<PathBuf> {
        let dir = self.locate(kind)?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        Ok(dir)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.get_dir(DirKind::Config)
    }

    fn get_data_dir(&self) -> Result<PathBuf> {
        self.get_dir(DirKind::Data)
    }

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    fn get_preferences_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join("preferences.json"))
    }
}

/// Platform directories, or `<root>/config` and `<root>/data` when a root
/// is given.
#[derive(Clone, Debug, Default)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    /// Takes the root from `NOTEDO_ROOT`; blank values are ignored.
    pub fn from_env() -> Self {
        let root = std::env::var(ROOT_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self::new(root)
    }

    pub fn override_root(&self) -> Option<&PathBuf> {
        self.override_root.as_ref()
    }
}

impl AppContext for StandardContext {
    fn locate(&self, kind: DirKind) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return Ok(root.join(kind.subdir()));
        }
        let dirs = ProjectDirs::from("org", "notedo", "notedo")
            .ok_or_else(|| anyhow!("No home directory"))?;
        Ok(match kind {
            DirKind::Config => dirs.config_dir().to_path_buf(),
            DirKind::Data => dirs.data_dir().to_path_buf(),
        })
    }
}

/// A unique temp root, deleted on drop.
#[derive(Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("notedo_test_{}", uuid::Uuid::new_v4()));
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn locate(&self, kind: DirKind) -> Result<PathBuf> {
        Ok(self.root.join(kind.subdir()))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
