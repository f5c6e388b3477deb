//! TOML-based configuration for the host binary.
//!
//! Reads and writes [`HostConfig`] at the platform-appropriate location:
//! - Windows: `%APPDATA%\VddHost\config.toml`
//! - Linux/macOS: `~/.config/vdd-host/config.toml`
//!
//! Every field carries a `#[serde(default = ...)]` fallback, so a missing
//! file, an empty file, and a file from an older build all load cleanly.
//!
//! Only the log level and the adapter's diagnostic identity strings are
//! configurable.  The mode tables and the monitor count are compiled-in
//! constants; no configuration key can change them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vdd_core::EndpointDiagnostics;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level host configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HostConfig {
    #[serde(default)]
    pub host: HostSection,
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// General host behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostSection {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`,
    /// `"trace"`.  Overridden at runtime by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Diagnostic identity the adapter reports to OS telemetry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityConfig {
    #[serde(default = "default_friendly_name")]
    pub friendly_name: String,
    #[serde(default = "default_manufacturer")]
    pub manufacturer: String,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            friendly_name: default_friendly_name(),
            manufacturer: default_manufacturer(),
            model: default_model(),
        }
    }
}

impl IdentityConfig {
    /// The full diagnostics block for these identity strings, with the fixed
    /// capability markers filled in.
    pub fn diagnostics(&self) -> EndpointDiagnostics {
        EndpointDiagnostics::new(&self.friendly_name, &self.manufacturer, &self.model)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_friendly_name() -> String {
    "Virtual Display".to_string()
}

fn default_manufacturer() -> String {
    "Virtual Display Host Contributors".to_string()
}

fn default_model() -> String {
    "Virtual Display".to_string()
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Resolves the platform config file path.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the relevant environment
/// variable is unset.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    #[cfg(target_os = "windows")]
    let base = std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .map(|p| p.join("VddHost"));
    #[cfg(not(target_os = "windows"))]
    let base = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|p| p.join(".config").join("vdd-host"));

    base.map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the config, falling back to defaults when no file exists yet.
///
/// # Errors
///
/// Returns an error for unreadable or unparsable files; a merely *absent*
/// file is the normal first-run case and loads as [`HostConfig::default`].
pub fn load() -> Result<HostConfig, ConfigError> {
    let path = config_path()?;
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Ok(HostConfig::default());
        }
        Err(source) => return Err(ConfigError::Io { path, source }),
    };
    Ok(toml::from_str(&text)?)
}

/// Writes the config, creating the directory if needed.
pub fn save(config: &HostConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config)?;
    std::fs::write(&path, text).map_err(|source| ConfigError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_loads_every_default() {
        let config: HostConfig = toml::from_str("").expect("empty config must parse");
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.host.log_level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults_for_missing_fields() {
        let config: HostConfig = toml::from_str(
            r#"
            [identity]
            friendly_name = "Spare Monitor"
            "#,
        )
        .expect("partial config must parse");
        assert_eq!(config.identity.friendly_name, "Spare Monitor");
        assert_eq!(config.identity.model, default_model());
        assert_eq!(config.host.log_level, "info");
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let mut config = HostConfig::default();
        config.host.log_level = "debug".to_string();
        let text = toml::to_string_pretty(&config).expect("serialize");
        let reloaded: HostConfig = toml::from_str(&text).expect("reparse");
        assert_eq!(config, reloaded);
    }

    #[test]
    fn test_identity_config_expands_to_full_diagnostics() {
        let identity = IdentityConfig::default();
        let diag = identity.diagnostics();
        assert_eq!(diag.friendly_name, identity.friendly_name);
        assert_eq!(diag.firmware.major, 1);
    }
}
