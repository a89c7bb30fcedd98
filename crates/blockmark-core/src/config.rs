use crate::error::ViewerError;
use crate::ordering::DEFAULT_SECTION_GAP;
use crate::selection::HighlightPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the extraction backend (serves `/extract` and `/proxy-pdf`).
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub service: ServiceConfig,
    pub highlight: HighlightPolicy,
    /// Vertical gap that splits sections of google-extracted blocks.
    pub section_gap: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            service: ServiceConfig::default(),
            highlight: HighlightPolicy::default(),
            section_gap: DEFAULT_SECTION_GAP,
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ViewerConfig, ViewerError> {
    let content = std::fs::read_to_string(path).map_err(|e| ViewerError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a JSON string read from `source`.
pub fn parse_config(json: &str, source: &Path) -> Result<ViewerConfig, ViewerError> {
    let config: ViewerConfig = serde_json::from_str(json).map_err(|e| ViewerError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ViewerConfig, ViewerError> {
    let config: ViewerConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ViewerConfig) -> Result<(), ViewerError> {
    let base = config.service.base_url.trim();
    if base.is_empty() {
        return Err(ViewerError::ConfigInvalid(
            "service.base_url must not be empty".into(),
        ));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ViewerError::ConfigInvalid(format!(
            "service.base_url '{}' must start with http:// or https://",
            base
        )));
    }

    if config.service.timeout_secs == 0 {
        return Err(ViewerError::ConfigInvalid(
            "service.timeout_secs must be greater than zero".into(),
        ));
    }

    if !config.section_gap.is_finite() || config.section_gap < 0.0 {
        return Err(ViewerError::ConfigInvalid(format!(
            "section_gap must be a non-negative number, got {}",
            config.section_gap
        )));
    }

    Ok(())
}
