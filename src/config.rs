//! Renderer configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::entity::NameOrder;
use crate::humanize::Clock;
use crate::paths;
use crate::template::Catalog;

/// Settings for rendering and the preview tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale table overlaid on the bundled English catalog
    pub catalog_path: Option<PathBuf>,
    /// Person name order
    pub name_order: NameOrder,
    /// "24h" or "12h"
    pub clock: Clock,
    /// Tracing filter directives, used when RUST_LOG is unset
    pub log_filter: Option<String>,
}

impl Config {
    /// Load config from a TOML file, falling back to defaults when absent
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("config not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        tracing::info!("loaded config from {}", path.display());

        Ok(config)
    }

    /// Bundled English catalog, with overrides from `catalog_path` or the
    /// default overrides file when one exists
    pub fn catalog(&self) -> Result<Catalog> {
        let english = Catalog::english().context("bundled English catalog is invalid")?;

        let overrides = match &self.catalog_path {
            Some(path) => Some(path.clone()),
            None => Some(paths::catalog_path()).filter(|p| p.exists()),
        };

        match overrides {
            Some(path) => Ok(english.overlay(Catalog::load(&path)?)),
            None => Ok(english),
        }
    }
}
