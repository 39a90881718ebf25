//! Centralized path resolution for servicetext
//!
//! Follows XDG Base Directory Specification with 12-factor env var overrides.
//!
//! ## Directory Layout
//!
//! ```text
//! ~/.config/servicetext/       (XDG_CONFIG_HOME)
//! ├── config.toml
//! └── catalog.toml             (optional locale overrides)
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SERVICETEXT_CONFIG` | Config file | `~/.config/servicetext/config.toml` |
//! | `SERVICETEXT_CATALOG` | Catalog overrides | `~/.config/servicetext/catalog.toml` |

use std::path::PathBuf;

use tracing::info;

/// Get the XDG config directory for servicetext
///
/// Priority: `XDG_CONFIG_HOME` > `~/.config`
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("servicetext");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/servicetext");
    }

    // Last resort: current directory
    PathBuf::from(".")
}

/// Get the config file path
///
/// Priority: `SERVICETEXT_CONFIG` env var > `config_dir()/config.toml`
pub fn config_path() -> PathBuf {
    std::env::var("SERVICETEXT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| config_dir().join("config.toml"))
}

/// Get the default catalog overrides path
///
/// Priority: `SERVICETEXT_CATALOG` env var > `config_dir()/catalog.toml`
pub fn catalog_path() -> PathBuf {
    std::env::var("SERVICETEXT_CATALOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| config_dir().join("catalog.toml"))
}

/// Log resolved paths for discoverability
pub fn log_paths() {
    info!("config directory: {}", config_dir().display());
    info!("config: {}", config_path().display());
    info!("catalog overrides: {}", catalog_path().display());
}
