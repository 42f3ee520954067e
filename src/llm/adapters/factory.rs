//! Adapter Factory
//!
//! Creates LLM adapter instances from the `[llm]` config section.

use crate::config::{LlmConfig, Provider};
use crate::llm::adapters::gemini::{self, GeminiAdapter};
use crate::llm::adapters::ollama::{self, OllamaAdapter};
use crate::llm::adapters::openai::{self, OpenAiAdapter};
use crate::llm::adapters::stub::StubAdapter;
use crate::llm::adapters::{Adapter, AdapterError, Transport};
use tracing::debug;

/// Create adapter with the real HTTP transport
pub fn create_adapter(config: &LlmConfig) -> Result<Adapter, AdapterError> {
    create_adapter_with_transport(config, Transport::default())
}

/// Create adapter over a given transport (the stub ignores it)
pub fn create_adapter_with_transport(
    config: &LlmConfig,
    transport: Transport,
) -> Result<Adapter, AdapterError> {
    debug!(provider = config.provider.as_str(), "creating adapter");

    match config.provider {
        Provider::Stub => Ok(Adapter::Stub(StubAdapter::new())),
        Provider::Gemini => Ok(Adapter::Gemini(GeminiAdapter::with_transport(
            base_url_or(config, gemini::DEFAULT_BASE_URL),
            model_or(config, gemini::DEFAULT_MODEL),
            require_api_key(config)?,
            transport,
        ))),
        Provider::OpenAi => Ok(Adapter::OpenAi(OpenAiAdapter::with_transport(
            base_url_or(config, openai::DEFAULT_BASE_URL),
            model_or(config, openai::DEFAULT_MODEL),
            require_api_key(config)?,
            transport,
        ))),
        Provider::Ollama => Ok(Adapter::Ollama(OllamaAdapter::with_transport(
            config.host.clone(),
            config.port,
            model_or(config, ollama::DEFAULT_MODEL),
            transport,
        ))),
    }
}

fn base_url_or(config: &LlmConfig, default: &str) -> String {
    config
        .base_url
        .clone()
        .unwrap_or_else(|| default.to_string())
}

fn model_or(config: &LlmConfig, default: &str) -> String {
    config.model.clone().unwrap_or_else(|| default.to_string())
}

fn require_api_key(config: &LlmConfig) -> Result<String, AdapterError> {
    let raw = config.api_key.as_deref().ok_or_else(|| {
        AdapterError::Configuration(format!(
            "Missing 'api_key' for provider {}",
            config.provider.as_str()
        ))
    })?;

    let key = resolve_env_var(raw)?;
    if key.trim().is_empty() {
        return Err(AdapterError::Configuration("'api_key' is empty".to_string()));
    }
    Ok(key)
}

/// Resolve environment variable reference
///
/// If value starts with "env:", read from environment.
/// Otherwise return value as-is.
fn resolve_env_var(value: &str) -> Result<String, AdapterError> {
    match value.strip_prefix("env:") {
        Some(name) => std::env::var(name).map_err(|_| {
            AdapterError::Configuration(format!("Environment variable {} is not set", name))
        }),
        None => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::adapters::LlmAdapter;

    fn llm(provider: Provider) -> LlmConfig {
        LlmConfig {
            provider,
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_resolve_env_var_direct() {
        assert_eq!(resolve_env_var("direct_value").unwrap(), "direct_value");
    }

    #[test]
    fn test_resolve_env_var_reference() {
        std::env::set_var("STUDY_COPILOT_FACTORY_TEST_KEY", "test_value");
        assert_eq!(
            resolve_env_var("env:STUDY_COPILOT_FACTORY_TEST_KEY").unwrap(),
            "test_value"
        );
    }

    #[test]
    fn test_resolve_env_var_missing() {
        let err = resolve_env_var("env:STUDY_COPILOT_DEFINITELY_UNSET").unwrap_err();
        assert!(matches!(err, AdapterError::Configuration(_)));
    }

    #[test]
    fn test_factory_default_is_stub() {
        let adapter = create_adapter(&LlmConfig::default()).unwrap();
        assert_eq!(adapter.provider_name(), "stub");
    }

    #[test]
    fn test_factory_gemini() {
        let mut config = llm(Provider::Gemini);
        config.api_key = Some("key".to_string());
        let adapter = create_adapter(&config).unwrap();
        assert_eq!(adapter.provider_name(), "gemini");
        match adapter {
            Adapter::Gemini(a) => assert_eq!(a.model(), gemini::DEFAULT_MODEL),
            other => panic!("unexpected adapter {:?}", other),
        }
    }

    #[test]
    fn test_factory_openai_custom_base() {
        let mut config = llm(Provider::OpenAi);
        config.api_key = Some("sk-test".to_string());
        config.base_url = Some("http://localhost:8080/v1".to_string());
        match create_adapter(&config).unwrap() {
            Adapter::OpenAi(a) => {
                assert_eq!(a.base_url(), "http://localhost:8080/v1");
                assert_eq!(a.model(), openai::DEFAULT_MODEL);
            }
            other => panic!("unexpected adapter {:?}", other),
        }
    }

    #[test]
    fn test_factory_ollama_needs_no_key() {
        let adapter = create_adapter(&llm(Provider::Ollama)).unwrap();
        assert_eq!(adapter.provider_name(), "ollama");
    }

    #[test]
    fn test_factory_missing_key_returns_error() {
        let err = create_adapter(&llm(Provider::Gemini)).unwrap_err();
        assert!(matches!(err, AdapterError::Configuration(_)));
    }
}
