//! TOML configuration overrides for research turns.
//!
//! The file mirrors [`ResearchConfig`] with every field optional:
//!
//! ```toml
//! max_per_domain = 3
//!
//! [hybrid_weights]
//! dense = 0.7
//!
//! [trust_tiers]
//! authoritative = ["arxiv.org", "intranet.corp"]
//! ```

use std::path::{Path, PathBuf};

use scout_search::{ConfigOverride, ResearchConfig};

use crate::error::{HostError, Result};

/// Load a partial configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_override(path: &Path) -> Result<ConfigOverride> {
    let content = std::fs::read_to_string(path)?;
    parse_override(&content)
}

/// Parse a partial configuration from TOML text.
///
/// # Errors
///
/// Returns [`HostError::Config`] on malformed TOML or mistyped fields.
pub fn parse_override(content: &str) -> Result<ConfigOverride> {
    toml::from_str(content).map_err(|e| HostError::Config(e.to_string()))
}

/// Save a partial configuration as TOML, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be written or the override cannot
/// be serialized.
pub fn save_override(overrides: &ConfigOverride, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content =
        toml::to_string_pretty(overrides).map_err(|e| HostError::Config(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Build the effective configuration: defaults, plus the override file at
/// `path` when given. The result is validated.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the merged
/// configuration fails validation.
pub fn resolve_config(path: Option<&Path>) -> Result<ResearchConfig> {
    let base = ResearchConfig::default();
    let config = match path {
        Some(p) => {
            let overrides = load_override(p)?;
            tracing::debug!(path = %p.display(), "loaded config override");
            base.merged(&overrides)
        }
        None => base,
    };
    config.validate()?;
    Ok(config)
}

/// Returns the default override path: `~/.config/scout/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config).join("scout").join("config.toml")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home)
            .join(".config")
            .join("scout")
            .join("config.toml")
    } else {
        PathBuf::from("/tmp/scout-config/config.toml")
    }
}
