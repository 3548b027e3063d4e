//! Where the catalog lives on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "GALCAT_DATA_DIR";
/// Overrides the references file.
pub const REFERENCES_ENV: &str = "GALCAT_REFERENCES";

/// Paths handed to [`Database::open`](crate::catalog::Database::open).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory of per-galaxy JSON documents.
    pub data_dir: PathBuf,
    /// JSON array of bibliographic references.
    pub references_file: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            references_file: PathBuf::from("references.json"),
        }
    }
}

impl CatalogConfig {
    pub fn new(data_dir: impl Into<PathBuf>, references_file: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            references_file: references_file.into(),
        }
    }

    /// Defaults with the `GALCAT_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a JSON config file; keys it leaves out keep their defaults.
    /// Environment overrides still win.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: CatalogConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Config for a data directory picked at runtime: the references file is
    /// looked up next to it, then in its parent (the usual repo layout).
    pub fn for_data_dir(data_dir: &Path) -> Self {
        let name = Self::default().references_file;
        let beside = data_dir.join(&name);
        let references_file = match data_dir.parent() {
            Some(parent) if !beside.exists() => parent.join(&name),
            _ => beside,
        };
        Self::new(data_dir, references_file)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup(REFERENCES_ENV).filter(|v| !v.is_empty()) {
            self.references_file = PathBuf::from(file);
        }
        self
    }
}
