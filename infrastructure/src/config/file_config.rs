//! File-based configuration (`snapquiz.toml`)

use crate::openrouter::protocol::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use snapquiz_application::ExecutionParams;
use std::time::Duration;

/// Default vision model used for transcript extraction.
pub const DEFAULT_VISION_MODEL: &str = "google/gemini-2.0-pro-exp-02-05:free";

/// Root configuration loaded from TOML files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider endpoint and credential settings.
    pub provider: FileProviderConfig,
    /// Model selection.
    pub models: FileModelsConfig,
    /// Answer-loop behavior.
    pub behavior: FileBehaviorConfig,
}

/// Provider configuration (`[provider]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the chat-completions API.
    pub base_url: String,
    /// Environment variable holding the API key (default: "OPENROUTER_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Optional `HTTP-Referer` attribution header.
    pub referer: Option<String>,
    /// Optional `X-Title` attribution header.
    pub app_title: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            api_key: None,
            referer: None,
            app_title: None,
        }
    }
}

/// Model selection (`[models]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Models to fan the question out to, in display order.
    pub selected: Vec<String>,
    /// Vision model used for transcript extraction.
    pub vision: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            vision: DEFAULT_VISION_MODEL.to_string(),
        }
    }
}

/// Answer-loop behavior (`[behavior]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Per-attempt timeout in seconds; omit to disable.
    pub timeout_secs: Option<u64>,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(60),
        }
    }
}

impl FileConfig {
    /// Resolve the API key: environment variable first, then the direct key.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.provider.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.provider.api_key.clone())
    }

    /// Execution parameters derived from the behavior section.
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_attempt_timeout(self.behavior.timeout_secs.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider.api_key_env, "OPENROUTER_API_KEY");
        assert!(config.models.selected.is_empty());
        assert_eq!(config.models.vision, DEFAULT_VISION_MODEL);
        assert_eq!(config.behavior.timeout_secs, Some(60));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [models]
            selected = ["vendor/m1", "vendor/m2"]
            "#,
        )
        .unwrap();

        assert_eq!(config.models.selected.len(), 2);
        assert_eq!(config.models.vision, DEFAULT_VISION_MODEL);
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_execution_params_timeout() {
        let mut config = FileConfig::default();
        config.behavior.timeout_secs = Some(10);
        assert_eq!(
            config.execution_params().attempt_timeout,
            Some(Duration::from_secs(10))
        );

        config.behavior.timeout_secs = None;
        assert!(config.execution_params().attempt_timeout.is_none());
    }
}
