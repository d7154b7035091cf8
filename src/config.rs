//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional JSON file,
//! then environment overrides, then whatever the command line sets through
//! the `with_*` builders.

use crate::codes::Language;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CONCURRENCY_THRESHOLD, ENV_LANGUAGE, ENV_WORKERS,
    sheet,
};
use crate::error::{DecoderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How an identifier column is located when the caller does not name one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetDetectionConfig {
    /// Data rows sampled when confirming a candidate column
    pub sample_rows: usize,

    /// Leftmost columns scanned when no header keyword matches
    pub scan_columns: usize,

    /// Header text hinting at an identifier column, matched case-insensitively
    pub header_keywords: Vec<String>,

    /// First data row (1-based) when the caller gives no start row
    pub first_data_row: usize,
}

impl Default for SheetDetectionConfig {
    fn default() -> Self {
        Self {
            sample_rows: sheet::DEFAULT_SAMPLE_ROWS,
            scan_columns: sheet::DEFAULT_SCAN_COLUMNS,
            header_keywords: sheet::DEFAULT_HEADER_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            first_data_row: sheet::DEFAULT_FIRST_DATA_ROW,
        }
    }
}

/// Global configuration for decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Label language for resolved names and descriptions
    pub language: Language,

    /// Worker count for concurrent batch decoding
    pub workers: usize,

    /// Batches smaller than this are decoded on the calling task
    pub concurrency_threshold: usize,

    /// Sheet column detection settings
    pub sheet: SheetDetectionConfig,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            workers: num_cpus::get().max(1),
            concurrency_threshold: DEFAULT_CONCURRENCY_THRESHOLD,
            sheet: SheetDetectionConfig::default(),
        }
    }
}

impl DecoderConfig {
    /// `<config_dir>/disaster-decoder/config.json`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a JSON config file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            DecoderError::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults → file → environment.
    ///
    /// An explicit path must exist; the default path is used only when present.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        let config = config.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable source (the process environment in production)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_LANGUAGE) {
            self.language = value
                .parse()
                .map_err(|e: String| DecoderError::configuration(format!("{}: {}", ENV_LANGUAGE, e)))?;
        }

        if let Some(value) = lookup(ENV_WORKERS) {
            self.workers = value.trim().parse().map_err(|_| {
                DecoderError::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_WORKERS, value
                ))
            })?;
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(DecoderError::configuration("workers must be at least 1"));
        }
        if self.sheet.sample_rows == 0 {
            return Err(DecoderError::configuration("sheet.sample_rows must be at least 1"));
        }
        if self.sheet.scan_columns == 0 {
            return Err(DecoderError::configuration("sheet.scan_columns must be at least 1"));
        }
        if self.sheet.first_data_row == 0 {
            return Err(DecoderError::configuration(
                "sheet.first_data_row is 1-based and must be at least 1",
            ));
        }
        if self.sheet.header_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(DecoderError::configuration(
                "sheet.header_keywords must contain at least one keyword",
            ));
        }
        Ok(())
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_concurrency_threshold(mut self, threshold: usize) -> Self {
        self.concurrency_threshold = threshold;
        self
    }

    pub fn with_sheet_detection(mut self, sheet: SheetDetectionConfig) -> Self {
        self.sheet = sheet;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = DecoderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.language, Language::Zh);
        assert!(config.workers >= 1);
        assert_eq!(config.sheet.sample_rows, 10);
        assert_eq!(config.sheet.first_data_row, 2);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"language": "en", "sheet": {{"sample_rows": 3}}}}"#).unwrap();

        let config = DecoderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.language, Language::En);
        assert_eq!(config.sheet.sample_rows, 3);
        assert_eq!(config.sheet.scan_columns, 10);
        assert_eq!(config.concurrency_threshold, DEFAULT_CONCURRENCY_THRESHOLD);
    }

    #[test]
    fn test_invalid_file_is_a_configuration_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"language": "fr"}}"#).unwrap();

        let err = DecoderConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, DecoderError::Configuration { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = DecoderConfig::load(Some(Path::new("/nonexistent/config.json"))).unwrap_err();
        assert!(matches!(err, DecoderError::Io(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_LANGUAGE, "en"), (ENV_WORKERS, "3")].into();
        let config = DecoderConfig::default()
            .with_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.language, Language::En);
        assert_eq!(config.workers, 3);

        let bad: HashMap<&str, &str> = [(ENV_WORKERS, "many")].into();
        assert!(
            DecoderConfig::default()
                .with_env_overrides(|key| bad.get(key).map(|v| v.to_string()))
                .is_err()
        );
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        assert!(DecoderConfig::default().with_workers(0).validate().is_err());

        let sheet = SheetDetectionConfig {
            header_keywords: vec![],
            ..SheetDetectionConfig::default()
        };
        assert!(
            DecoderConfig::default()
                .with_sheet_detection(sheet)
                .validate()
                .is_err()
        );
    }
}
