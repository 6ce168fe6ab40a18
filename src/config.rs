//! Project configuration
//!
//! An optional TOML file pointing at a user template catalog and project
//! skeleton, plus output preferences. Relative paths are taken relative to
//! the directory holding the config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::template::{TemplateError, TemplateStore};

/// Errors that can occur when loading or parsing a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Resolved configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodegenConfig {
    /// User catalog; its templates override built-ins of the same name
    pub catalog: Option<PathBuf>,
    /// Skeleton used when the output file does not exist yet
    pub skeleton: Option<PathBuf>,
    /// Keep `<output>.bak` when overwriting
    pub backup: bool,
}

#[derive(Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    templates: TomlTemplates,
    #[serde(default)]
    output: TomlOutput,
}

#[derive(Deserialize, Default)]
struct TomlTemplates {
    catalog: Option<PathBuf>,
    skeleton: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct TomlOutput {
    #[serde(default)]
    backup: bool,
}

impl CodegenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str(&content)?;
        Ok(match path.parent() {
            Some(dir) => config.relative_to(dir),
            None => config,
        })
    }

    /// Load config from a TOML string; paths are kept as written
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        Ok(CodegenConfig {
            catalog: parsed.templates.catalog,
            skeleton: parsed.templates.skeleton,
            backup: parsed.output.backup,
        })
    }

    /// Resolve relative paths against `dir`
    pub fn relative_to(mut self, dir: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { dir.join(p) } else { p };
        self.catalog = self.catalog.map(resolve);
        self.skeleton = self.skeleton.map(resolve);
        self
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    pub fn with_skeleton(mut self, path: impl Into<PathBuf>) -> Self {
        self.skeleton = Some(path.into());
        self
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Built-in catalog with the user catalog, if any, layered on top
    pub fn load_store(&self) -> Result<TemplateStore, TemplateError> {
        let store = TemplateStore::builtin();
        match &self.catalog {
            Some(path) => Ok(store.with_overrides(TemplateStore::from_file(path)?)),
            None => Ok(store),
        }
    }
}
