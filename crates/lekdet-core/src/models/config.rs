//! Configuration structures for extraction, windowing and ingest.

use serde::{Deserialize, Serialize};

use crate::error::LekdetError;
use crate::extract::MAX_CANDIDATES;

/// Main configuration for lekdet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LekdetConfig {
    /// Pattern extraction configuration.
    pub extraction: ExtractionConfig,

    /// Pre-draw window configuration.
    pub window: WindowConfig,

    /// Article retention configuration.
    pub retention: RetentionConfig,

    /// Supplemental analyzer configuration.
    pub analyzer: AnalyzerConfig,
}

/// Pattern extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum candidates kept per article.
    ///
    /// The extractor clamps this to [`MAX_CANDIDATES`]; only lower caps take effect.
    pub max_candidates: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_candidates: MAX_CANDIDATES,
        }
    }
}

/// Pre-draw attribution window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Length of the window preceding each draw, in days.
    pub window_days: u32,

    /// Nominal days of month on which draws happen.
    pub draw_days: Vec<u32>,

    /// Number of most recent draws used for history statistics.
    pub history_draws: usize,

    /// How many ranked candidates to display per draw.
    pub top_n: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_days: 15,
            draw_days: vec![1, 16],
            history_draws: 24,
            top_n: 10,
        }
    }
}

/// Article retention configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Articles ingested longer ago than this are purged.
    pub retention_days: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self { retention_days: 15 }
    }
}

/// Supplemental (generative AI) analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Call the analyzer during ingest.
    pub enabled: bool,

    /// Model name.
    pub model: String,

    /// Base URL of the generateContent API.
    pub endpoint: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: "gemini-1.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl LekdetConfig {
    /// Reject settings the window and retention logic cannot use.
    pub fn validate(&self) -> crate::Result<()> {
        if self.window.window_days == 0 {
            return Err(LekdetError::Config("window.window_days must be at least 1".to_string()));
        }
        if self.window.draw_days.is_empty() {
            return Err(LekdetError::Config("window.draw_days must not be empty".to_string()));
        }
        if let Some(day) = self.window.draw_days.iter().find(|d| !(1..=31).contains(*d)) {
            return Err(LekdetError::Config(format!(
                "window.draw_days contains {}, expected a day of month 1-31",
                day
            )));
        }
        if self.analyzer.timeout_secs == 0 {
            return Err(LekdetError::Config("analyzer.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: LekdetConfig =
            serde_json::from_str(r#"{ "window": { "window_days": 10 } }"#).unwrap();
        assert_eq!(config.window.window_days, 10);
        assert_eq!(config.window.draw_days, vec![1, 16]);
        assert_eq!(config.extraction.max_candidates, 10);
        assert!(!config.analyzer.enabled);
    }

    #[test]
    fn test_validate() {
        assert!(LekdetConfig::default().validate().is_ok());

        let mut config = LekdetConfig::default();
        config.window.window_days = 0;
        assert!(matches!(config.validate(), Err(LekdetError::Config(_))));

        let mut config = LekdetConfig::default();
        config.window.draw_days = vec![1, 32];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("32"));

        let mut config = LekdetConfig::default();
        config.window.draw_days.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LekdetConfig::default();
        config.retention.retention_days = 30;
        config.save(&path).unwrap();

        let loaded = LekdetConfig::from_file(&path).unwrap();
        assert_eq!(loaded.retention.retention_days, 30);
    }
}
