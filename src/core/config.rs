//! Run configuration: `restyle.json` merged over built-in defaults.
//!
//! Lookup order: an explicit `--config` path, then `restyle.json` in the
//! root being scanned, then the built-in dark-mode table.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::rewrite::{builtin_rules, RuleSet, RuleSpec};
use crate::utils::io;

pub const CONFIG_FILE_NAME: &str = "restyle.json";

/// Root configuration structure for restyle.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestyleConfig {
    /// File extensions to scan, with or without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Globs (root-relative, `/`-separated) for paths to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Ordered rewrite rules.
    #[serde(default = "builtin_rules")]
    pub rules: Vec<RuleSpec>,
}

impl Default for RestyleConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: Vec::new(),
            rules: builtin_rules(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["tsx".to_string()]
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces the configured extensions when non-empty.
    pub extensions: Vec<String>,
    /// Appended to the configured excludes.
    pub exclude: Vec<String>,
}

/// A resolved configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: RestyleConfig,
    /// `None` when built-in defaults were used.
    pub source: Option<PathBuf>,
}

impl RestyleConfig {
    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if !overrides.extensions.is_empty() {
            self.extensions = overrides.extensions.clone();
        }
        self.exclude.extend(overrides.exclude.iter().cloned());
        self
    }

    pub fn compile_rules(&self) -> Result<RuleSet> {
        RuleSet::compile(&self.rules)
    }
}

/// Parse a config document. `origin` is used for error reporting.
pub fn from_str(content: &str, origin: &str) -> Result<RestyleConfig> {
    serde_json::from_str(content).map_err(|e| Error::config_invalid_json(origin, e))
}

/// Load config from an explicit path, or discover `restyle.json` under `root`.
pub fn load(root: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = root.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return Ok(LoadedConfig {
                    config: RestyleConfig::default(),
                    source: None,
                });
            }
            candidate
        }
    };

    let display = path.display().to_string();
    let content = io::read_file(&path, &format!("read {}", display))?;
    let config = from_str(&content, &display)?;

    Ok(LoadedConfig {
        config,
        source: Some(path),
    })
}
