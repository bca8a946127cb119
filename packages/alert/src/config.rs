//! TOML configuration for verification and the pre-submission gate.
//!
//! The shipped defaults live in `config/default.toml` and are embedded at
//! compile time. Any key missing from a user-supplied file falls back to its
//! default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pre_check::PreCheckThresholds;
use crate::verify::VerificationConfig;

/// Embedded default configuration.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Errors that can occur while loading or rendering configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`SafenetConfig`].
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered back to TOML.
    #[error("Failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Complete alert-handling configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafenetConfig {
    pub verification: VerificationConfig,
    pub pre_check: PreCheckThresholds,
}

impl SafenetConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML or has
    /// fields of the wrong type.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Parses the embedded default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the embedded file is malformed,
    /// which a unit test guards against.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_CONFIG_TOML)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Render`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;
    use crate::verify::FrequencyKey;

    #[test]
    fn embedded_matches_builtin_defaults() {
        let config = SafenetConfig::embedded().unwrap();
        assert_eq!(config, SafenetConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = SafenetConfig::from_toml(
            r#"
            [verification]
            frequency_key = "location"
            "#,
        )
        .unwrap();

        assert_eq!(config.verification.frequency_key, FrequencyKey::Location);
        assert_eq!(config.verification.frequency_limit, 3);
        assert_eq!(config.verification.allowed_types.len(), 4);
        assert_eq!(config.pre_check, PreCheckThresholds::default());
    }

    #[test]
    fn rejects_unknown_frequency_key() {
        let result = SafenetConfig::from_toml(
            r#"
            [verification]
            frequency_key = "phase_of_moon"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn render_round_trips() {
        let config = SafenetConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(SafenetConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("safenet.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[pre_check]\nmax_frequency = 5").unwrap();

        let config = SafenetConfig::load(&path).unwrap();
        assert_eq!(config.pre_check.max_frequency, 5);

        let missing = SafenetConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
