//! Configuration management for the card generator

use crate::{Error, Result, EXPORT_FILE_NAME, MAX_COUNT, MIN_COUNT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Card generator configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CardgenConfig {
    /// Directory CSV exports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// File name of the CSV export
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,

    /// Batch size used when the count is not given on the command line
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

impl Default for CardgenConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            export_file_name: default_export_file_name(),
            default_count: default_count(),
            log_json: false,
        }
    }
}

impl CardgenConfig {
    /// Load configuration from `CARDGEN_*` environment variables
    pub fn from_env() -> Result<Self> {
        let config: Self = envy::prefixed("CARDGEN_")
            .from_env()
            .map_err(|e| Error::Config(format!("Failed to parse environment variables: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.export_file_name.is_empty() {
            return Err(Error::Config("export_file_name cannot be empty".to_string()));
        }

        if self.export_file_name.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "export_file_name must be a bare file name, got '{}'",
                self.export_file_name
            )));
        }

        if !self.export_file_name.ends_with(".csv") {
            return Err(Error::Config("export_file_name must end in .csv".to_string()));
        }

        if !(MIN_COUNT..=MAX_COUNT).contains(&self.default_count) {
            return Err(Error::Config(format!(
                "default_count must be between {} and {}",
                MIN_COUNT, MAX_COUNT
            )));
        }

        Ok(())
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_export_file_name() -> String {
    EXPORT_FILE_NAME.to_string()
}

fn default_count() -> usize {
    crate::DEFAULT_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CardgenConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.export_file_name, "cards_export.csv");
        assert_eq!(config.default_count, 10);
    }

    #[test]
    fn test_config_from_env_map() {
        let vars = vec![
            ("CARDGEN_EXPORT_DIR".to_string(), "/tmp/cards".to_string()),
            ("CARDGEN_DEFAULT_COUNT".to_string(), "25".to_string()),
            ("CARDGEN_LOG_JSON".to_string(), "true".to_string()),
        ];
        let config: CardgenConfig = envy::prefixed("CARDGEN_").from_iter(vars).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("/tmp/cards"));
        assert_eq!(config.default_count, 25);
        assert!(config.log_json);
        assert_eq!(config.export_file_name, "cards_export.csv");
    }

    #[test]
    fn test_config_validation_failures() {
        let bad = [
            CardgenConfig { export_file_name: String::new(), ..Default::default() },
            CardgenConfig { export_file_name: "out/cards.csv".to_string(), ..Default::default() },
            CardgenConfig { export_file_name: "cards.txt".to_string(), ..Default::default() },
            CardgenConfig { default_count: 0, ..Default::default() },
            CardgenConfig { default_count: 101, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{:?}", config);
        }
    }
}
