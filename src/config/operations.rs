//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::CollaboratorConfig;
use crate::error::{ClipforgeError, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "CLIPFORGE_CONFIG";

/// Directory name under the platform config dir.
const CONFIG_DIR_NAME: &str = "clipforge";

/// File name of the config file.
const CONFIG_FILE_NAME: &str = "config.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ClipforgeError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, falling back to defaults when the file
    /// does not exist. A file that exists but does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ClipforgeError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ClipforgeError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `collaborator.command` must split into at least one word
    /// - `collaborator.timeout_seconds` must be positive
    /// - `collaborator.working_dir`, when set, must be non-empty
    pub fn validate(&self) -> Result<()> {
        self.collaborator.argv()?;

        if self.collaborator.timeout_seconds == 0 {
            return Err(ClipforgeError::UserError(
                "config validation failed: collaborator.timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        if let Some(dir) = &self.collaborator.working_dir {
            if dir.trim().is_empty() {
                return Err(ClipforgeError::UserError(
                    "config validation failed: collaborator.working_dir must not be empty \
                     (omit it to inherit the current directory)"
                        .to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Write this config to `path`, creating parent directories.
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn write_to<P: AsRef<Path>>(&self, path: P, force: bool) -> Result<()> {
        let path = path.as_ref();

        if path.exists() && !force {
            return Err(ClipforgeError::UserError(format!(
                "config file '{}' already exists.\n\n\
                 Re-run with --force to overwrite it.",
                path.display()
            )));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClipforgeError::UserError(format!(
                    "failed to create config directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        std::fs::write(path, self.to_yaml()?).map_err(|e| {
            ClipforgeError::UserError(format!(
                "failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Resolve which config file to use.
    ///
    /// Precedence: explicit `--config` path, then `$CLIPFORGE_CONFIG`, then
    /// `<config_dir>/clipforge/config.yaml`.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        Self::default_path()
    }

    /// Platform default config location.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                ClipforgeError::UserError(format!(
                    "could not determine the user config directory.\n\n\
                     Pass --config <path> or set {}.",
                    CONFIG_ENV_VAR
                ))
            })
    }
}

impl CollaboratorConfig {
    /// Split the command line into program and arguments.
    pub fn argv(&self) -> Result<Vec<String>> {
        let args = shell_words::split(&self.command).map_err(|e| {
            ClipforgeError::UserError(format!(
                "failed to parse collaborator command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.command, e
            ))
        })?;

        if args.is_empty() {
            return Err(ClipforgeError::UserError(
                "config validation failed: collaborator.command must not be empty".to_string(),
            ));
        }

        Ok(args)
    }
}
