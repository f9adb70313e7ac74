//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/cathier/cathier.toml`
//! 3. Local config: `./.cathier.toml` or an explicit `--config` path
//! 4. Environment variables: `CATHIER_*` prefix

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::CascadeMode;

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".cathier.toml";

/// Unified configuration for cathier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// JSON document holding all categories
    pub data_file: PathBuf,
    /// How far an inactivation propagates
    pub cascade: CascadeMode,
    /// Reject creates whose parent id does not exist
    pub strict_parent: bool,
    /// Bound on every store lock acquisition, in milliseconds
    pub store_timeout_ms: u64,
    /// Warn when a list scan returns more categories than this
    pub list_soft_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            cascade: CascadeMode::Deep,
            strict_parent: false,
            store_timeout_ms: 5000,
            list_soft_limit: 10_000,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub cascade: Option<CascadeMode>,
    pub strict_parent: Option<bool>,
    pub store_timeout_ms: Option<u64>,
    pub list_soft_limit: Option<usize>,
}

/// Get the default data file (`<data dir>/categories.json`).
fn default_data_file() -> PathBuf {
    ProjectDirs::from("", "", "cathier")
        .map(|dirs| dirs.data_dir().join("categories.json"))
        .unwrap_or_else(|| PathBuf::from("~/.cathier/categories.json"))
}

/// Get the XDG config directory for cathier.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cathier").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("cathier.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Lock timeout as a `Duration`.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            cascade: overlay.cascade.unwrap_or(self.cascade),
            strict_parent: overlay.strict_parent.unwrap_or(self.strict_parent),
            store_timeout_ms: overlay.store_timeout_ms.unwrap_or(self.store_timeout_ms),
            list_soft_limit: overlay.list_soft_limit.unwrap_or(self.list_soft_limit),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Explicit local config file; `None` looks for `./.cathier.toml`
    ///
    /// A missing global or implicit local file is skipped; an explicit
    /// `local` path that does not exist is an error.
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        let local = match local {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => Some(PathBuf::from(LOCAL_CONFIG_FILE)).filter(|p| p.exists()),
        };
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load settings from explicit file layers, then apply env overrides.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(path) = global {
            debug!("loading global config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 3. Local config
        if let Some(path) = local {
            debug!("loading local config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.data_file = expand_path(&current.data_file);
        Ok(current)
    }

    /// Apply CATHIER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CATHIER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("cascade") {
            settings.cascade = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("CATHIER_CASCADE: {e}"),
            })?;
        }
        if let Ok(val) = config.get_bool("strict_parent") {
            settings.strict_parent = val;
        }
        if let Ok(val) = config.get_int("store_timeout_ms") {
            settings.store_timeout_ms = u64::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("CATHIER_STORE_TIMEOUT_MS must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_int("list_soft_limit") {
            settings.list_soft_limit =
                usize::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("CATHIER_LIST_SOFT_LIMIT must not be negative: {val}"),
                })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# cathier configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/cathier/cathier.toml
#   Local:  ./.cathier.toml (or --config <path>)
#   Env:    CATHIER_* environment variables

# JSON file holding all categories
# data_file = "~/.local/share/cathier/categories.json"

# Inactivation cascade: "deep" (all descendants) or "shallow" (direct children)
# cascade = "deep"

# Reject creates whose parent id does not exist
# strict_parent = false

# Maximum wait for the store lock, in milliseconds
# store_timeout_ms = 5000

# Warn when listing more categories than this
# list_soft_limit = 10000
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_overlay_when_merging_then_unset_fields_inherit() {
        let base = Settings::default();
        let overlay = RawSettings {
            cascade: Some(CascadeMode::Shallow),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.cascade, CascadeMode::Shallow);
        assert_eq!(merged.store_timeout_ms, base.store_timeout_ms);
        assert_eq!(merged.data_file, base.data_file);
    }

    #[test]
    fn given_template_when_parsing_then_yields_empty_overlay() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.data_file.is_none());
        assert!(raw.cascade.is_none());
    }
}
