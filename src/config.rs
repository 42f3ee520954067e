//! Configuration
//!
//! `config.toml` in the data directory. Every section and field has a
//! default, and a missing file means "all defaults" (offline stub provider).

use copilot_core::DEFAULT_PASSPHRASE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad TOML, wrong types, or an unknown provider name
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Model provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    OpenAi,
    Ollama,
    #[default]
    Stub,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
            Provider::Ollama => "ollama",
            Provider::Stub => "stub",
        }
    }
}

/// `[llm]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: Provider,
    /// API root; provider default when absent
    pub base_url: Option<String>,
    /// Model name; provider default when absent
    pub model: Option<String>,
    /// Literal key or `env:NAME`
    pub api_key: Option<String>,
    /// Ollama host
    pub host: String,
    /// Ollama port
    pub port: u16,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Stub,
            base_url: None,
            model: None,
            api_key: None,
            host: "127.0.0.1".to_string(),
            port: 11434,
        }
    }
}

/// `[sampling]` section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub content_temperature: f32,
    pub chat_temperature: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            content_temperature: 0.1,
            chat_temperature: 0.2,
        }
    }
}

/// `[admin]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub passphrase: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            passphrase: DEFAULT_PASSPHRASE.to_string(),
        }
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub sampling: SamplingConfig,
    pub admin: AdminConfig,
}

impl Config {
    /// Load from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            provider = config.llm.provider.as_str(),
            "config loaded"
        );
        Ok(config)
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("content_temperature", self.sampling.content_temperature),
            ("chat_temperature", self.sampling.chat_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "sampling.{} must be between 0.0 and 2.0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.provider, Provider::Stub);
        assert_eq!(config.llm.port, 11434);
        assert!((config.sampling.content_temperature - 0.1).abs() < f32::EPSILON);
        assert!((config.sampling.chat_temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.admin.passphrase, "Gentleman");
    }

    #[test]
    fn test_parse_full() {
        let config = Config::parse(
            r#"
[llm]
provider = "gemini"
model = "gemini-test"
api_key = "env:GEMINI_API_KEY"

[sampling]
content_temperature = 0.3

[admin]
passphrase = "open sesame"
"#,
        )
        .unwrap();

        assert_eq!(config.llm.provider, Provider::Gemini);
        assert_eq!(config.llm.model.as_deref(), Some("gemini-test"));
        assert_eq!(config.llm.base_url, None);
        assert!((config.sampling.content_temperature - 0.3).abs() < f32::EPSILON);
        assert!((config.sampling.chat_temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.admin.passphrase, "open sesame");
    }

    #[test]
    fn test_parse_openai_name() {
        let config = Config::parse("[llm]\nprovider = \"openai\"\n").unwrap();
        assert_eq!(config.llm.provider, Provider::OpenAi);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = Config::parse("[llm]\nprovider = \"glm\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_temperature_out_of_range() {
        let err = Config::parse("[sampling]\nchat_temperature = 5.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[llm]\nprovider = \"ollama\"\nport = 9999\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.llm.provider, Provider::Ollama);
        assert_eq!(config.llm.port, 9999);
        assert_eq!(config.llm.host, "127.0.0.1");
    }
}
