use std::fs;
use std::path::{Path, PathBuf};

use gemini_normalizer_types::{ConfigError, NormalizerConfig};

const CONFIG_DIR: &str = "gemini-normalizer";
const CONFIG_FILE: &str = "config.json";

/// Per-user config location, e.g. `~/.config/gemini-normalizer/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load and validate a config file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<NormalizerConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.display().to_string() });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::from_read_error(&e))?;
    let config: NormalizerConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    config.validate()?;

    tracing::debug!("Loaded normalizer config from {}", path.display());
    Ok(config)
}

/// Resolve the effective config.
///
/// An explicit path must exist. Without one, the per-user file is used when
/// present, otherwise built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<NormalizerConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(NormalizerConfig::default()),
    }
}

/// Save a config file atomically (temp file + rename).
pub fn save_config(path: &Path, config: &NormalizerConfig) -> Result<(), ConfigError> {
    config.validate()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::from_io_error(&e))?;
    }
    let temp_path = path.with_extension("json.tmp");

    let content = serde_json::to_string_pretty(config).map_err(|e| ConfigError::from_json_error(&e))?;

    // Atomic write
    fs::write(&temp_path, content).map_err(|e| ConfigError::from_io_error(&e))?;
    fs::rename(&temp_path, path).map_err(|e| ConfigError::from_io_error(&e))
}
