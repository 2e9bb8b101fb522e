//! Configuration file discovery, loading and validation.

use crate::config::schema::{is_folder_name, SetupConfig};
use crate::error::{Result, SetupError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the install root holding teardownm's own files.
pub const CONFIG_DIR: &str = ".teardownm";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Default config location for an install root.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load a single config file and parse it into SetupConfig.
///
/// # Errors
///
/// Returns `Io` if the file can't be read.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SetupConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into SetupConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SetupConfig> {
    if content.trim().is_empty() {
        return Ok(SetupConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SetupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override, then validate it.
///
/// If `config_override` is provided that file must exist. Otherwise the
/// default location under `root` is used when present and the built-in
/// defaults when not.
pub fn load_config(root: &Path, config_override: Option<&Path>) -> Result<SetupConfig> {
    let config = match config_override {
        Some(path) => {
            tracing::debug!("Loading config from override {}", path.display());
            load_config_file(path)?
        }
        None => {
            let path = default_config_path(root);
            if path.is_file() {
                tracing::debug!("Loading config from {}", path.display());
                load_config_file(&path)?
            } else {
                tracing::debug!("No config at {}, using defaults", path.display());
                SetupConfig::default()
            }
        }
    };

    validate(&config)?;
    Ok(config)
}

/// Check values serde can't.
pub fn validate(config: &SetupConfig) -> Result<()> {
    let invalid = |message: String| Err(SetupError::ConfigValidationError { message });

    if config.sledge.repository.trim().is_empty() {
        return invalid("sledge.repository must not be empty".to_string());
    }

    if config.sledge.build_script.trim().is_empty() {
        return invalid("sledge.build_script must not be empty".to_string());
    }

    if !is_folder_name(&config.sledge.directory) {
        return invalid(format!(
            "sledge.directory must be a plain folder name under the install root, got '{}'",
            config.sledge.directory.display()
        ));
    }

    if !is_folder_name(&config.companion.directory) {
        return invalid(format!(
            "companion.directory must be a plain folder name under the install root, got '{}'",
            config.companion.directory.display()
        ));
    }

    if config.sledge.instances.is_empty() {
        return invalid("sledge.instances must name at least one folder".to_string());
    }

    let mut seen = HashSet::new();
    for name in &config.sledge.instances {
        if !is_folder_name(Path::new(name)) {
            return invalid(format!("sledge instance '{}' must be a plain folder name", name));
        }
        if !seen.insert(name.as_str()) {
            return invalid(format!("sledge instance '{}' is listed twice", name));
        }
    }

    Ok(())
}
