//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider.api_key_env cannot be empty")]
    EmptyApiKeyEnv,

    #[error("provider.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("provider.api_version cannot be empty")]
    EmptyApiVersion,
}

/// Provider connection settings (`[provider]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key (default: "API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL of the generative-language API.
    pub base_url: String,
    /// API version path segment.
    pub api_version: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_version: "v1beta".to_string(),
        }
    }
}

impl FileProviderConfig {
    /// Resolve the credential: the direct key wins, then the env var.
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with an injectable
    /// environment lookup.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup(&self.api_key_env).filter(|key| !key.trim().is_empty()))
    }
}

/// Raw output configuration from TOML (`[output]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Draw the typing spinner and marker while a reply streams
    pub show_typing: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_typing: true,
        }
    }
}

/// Root configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub provider: FileProviderConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigValidationError::EmptyApiKeyEnv);
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.provider.api_version.trim().is_empty() {
            return Err(ConfigValidationError::EmptyApiVersion);
        }
        Ok(())
    }

    /// Copy with any direct API key masked, for display.
    pub fn redacted(&self) -> FileConfig {
        let mut config = self.clone();
        if config.provider.api_key.is_some() {
            config.provider.api_key = Some("<redacted>".to_string());
        }
        config
    }

    /// Render as TOML (key redacted).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.redacted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.provider.api_key_env, "API_KEY");
        assert!(config.output.show_typing);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [output]
            color = false
            "#,
        )
        .unwrap();
        assert!(!config.output.color);
        assert!(config.output.show_typing);
        assert_eq!(config.provider, FileProviderConfig::default());
    }

    #[test]
    fn test_validation_rejects_blank_fields() {
        let mut config = FileConfig::default();
        config.provider.api_key_env = " ".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyApiKeyEnv)
        );

        let mut config = FileConfig::default();
        config.provider.base_url = String::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyBaseUrl));
    }

    #[test]
    fn test_direct_key_wins_over_env() {
        let provider = FileProviderConfig {
            api_key: Some("direct".to_string()),
            ..Default::default()
        };
        let key = provider.resolve_api_key_with(|_| Some("from-env".to_string()));
        assert_eq!(key.as_deref(), Some("direct"));
    }

    #[test]
    fn test_env_key_looked_up_by_configured_name() {
        let provider = FileProviderConfig {
            api_key_env: "GEMINI_API_KEY".to_string(),
            ..Default::default()
        };
        let key = provider.resolve_api_key_with(|name| {
            assert_eq!(name, "GEMINI_API_KEY");
            Some("secret".to_string())
        });
        assert_eq!(key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_blank_keys_are_missing() {
        let provider = FileProviderConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(provider.resolve_api_key_with(|_| Some(String::new())), None);
        assert_eq!(provider.resolve_api_key_with(|_| None), None);
    }

    #[test]
    fn test_to_toml_redacts_key() {
        let mut config = FileConfig::default();
        config.provider.api_key = Some("super-secret".to_string());
        let rendered = config.to_toml().unwrap();
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
