//! ODD Extractor Configuration Management
//!
//! Handles configuration from environment variables and TOML config
//! files, with defaults matching the reference deployment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main extractor configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Classifier keyword routing
    pub classifier: ClassifierConfig,

    /// Baseline record template
    pub template: TemplateConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ExtractorConfig {
    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file (missing sections fall back to defaults)
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        if let Ok(keywords) = std::env::var("ODD_VEHICLE_KEYWORDS") {
            self.classifier.vehicle_keywords = split_keywords(&keywords);
        }
        if let Ok(keywords) = std::env::var("ODD_WEATHER_KEYWORDS") {
            self.classifier.weather_keywords = split_keywords(&keywords);
        }

        if let Ok(id) = std::env::var("ODD_RECORD_ID") {
            self.template.odd_id = Some(id);
        }
        if let Ok(scene) = std::env::var("ODD_SCENE_TYPE") {
            self.template.scene_type = scene;
        }
        if let Ok(route) = std::env::var("ODD_ROUTE") {
            self.template.route = route;
        }

        if let Ok(level) = std::env::var("ODD_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(self)
    }
}

/// Comma-separated keyword list from an environment variable
fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Keyword routing for miscellaneous-label mentions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Substrings routing a miscellaneous mention to the Vehicle category
    pub vehicle_keywords: Vec<String>,

    /// Substrings routing a miscellaneous mention to the Environment category
    pub weather_keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            vehicle_keywords: vec!["car".into(), "vehicle".into(), "truck".into()],
            weather_keywords: vec!["weather".into(), "rain".into(), "sunny".into()],
        }
    }
}

/// Baseline values for the assembled record
///
/// Structural fields not listed here (vehicle pose, sensor calibration)
/// come from the record type defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Pinned record identifier; a fresh one is generated per assembly
    /// when unset
    pub odd_id: Option<String>,

    /// Scene identifier
    pub scene_type: String,

    /// Route name
    pub route: String,

    /// Illumination descriptor
    pub illumination: String,

    /// Weather descriptor
    pub weather: String,

    /// Road type descriptor
    pub road_type: String,

    /// Speed range descriptor
    pub speed_range: String,

    /// Traffic descriptor
    pub traffic: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            odd_id: None,
            scene_type: "scene-0655".to_string(),
            route: "boston-seaport".to_string(),
            illumination: "Unknown".to_string(),
            weather: "Unknown".to_string(),
            road_type: "Unknown".to_string(),
            speed_range: "Unknown".to_string(),
            traffic: "Unknown".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.template.scene_type, "scene-0655");
        assert_eq!(config.template.route, "boston-seaport");
        assert!(config.template.odd_id.is_none());
        assert_eq!(
            config.classifier.vehicle_keywords,
            vec!["car", "vehicle", "truck"]
        );
        assert_eq!(
            config.classifier.weather_keywords,
            vec!["weather", "rain", "sunny"]
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: ExtractorConfig = toml::from_str(
            r#"
            [template]
            scene_type = "scene-0103"
            weather = "Rain"
            "#,
        )
        .unwrap();

        assert_eq!(config.template.scene_type, "scene-0103");
        assert_eq!(config.template.weather, "Rain");
        // Untouched sections keep their defaults
        assert_eq!(config.template.route, "boston-seaport");
        assert_eq!(config.classifier.vehicle_keywords.len(), 3);
    }

    #[test]
    fn test_split_keywords() {
        assert_eq!(split_keywords("Car, SUV ,van"), vec!["car", "suv", "van"]);
        assert_eq!(split_keywords(""), Vec::<String>::new());
    }
}
