// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::alias::{AliasDefinition, default_aliases, validate_definitions};
use crate::context::AppContext;
use crate::storage::FilePreferences;
use crate::template::FieldConfig;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_true() -> bool {
    true
}

fn default_alias_fields() -> Vec<String> {
    vec!["due".to_string(), "remind".to_string()]
}

fn default_template() -> FieldConfig {
    FieldConfig {
        exclude: vec!["id".to_string()],
        order: vec!["title".to_string(), "due".to_string()],
        ..Default::default()
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Quick-entry fields whose values are run through alias resolution.
    #[serde(default = "default_alias_fields")]
    pub alias_fields: Vec<String>,
    /// Store only the date part when `eod` lands on a date field.
    #[serde(default = "default_true")]
    pub date_only_due: bool,
    #[serde(default = "default_template")]
    pub template: FieldConfig,
    /// Custom alias list. Empty means the built-in aliases; a non-empty list
    /// replaces them entirely.
    #[serde(default)]
    pub aliases: Vec<AliasDefinition>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alias_fields: default_alias_fields(),
            date_only_due: true,
            template: default_template(),
            aliases: Vec::new(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        validate_definitions(&config.aliases).map_err(|e| {
            anyhow::anyhow!("Invalid aliases in config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }
        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }
        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        FilePreferences::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            FilePreferences::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// The alias list lookups should use.
    pub fn active_aliases(&self) -> &[AliasDefinition] {
        if self.aliases.is_empty() {
            default_aliases()
        } else {
            &self.aliases
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.active_aliases().len(), 7);
    }

    #[test]
    fn missing_error_detection() {
        assert!(Config::is_missing_config_error(&anyhow::anyhow!(
            "Config file not found"
        )));
        assert!(!Config::is_missing_config_error(&anyhow::anyhow!("boom")));
    }
}
