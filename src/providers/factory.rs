use crate::config::{AppConfig, ProviderConfig};
use crate::error::ChatError;
use crate::providers::{AzureOpenAIProvider, CompletionProvider, OpenAIProvider};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn CompletionProvider>, ChatError> {
        if !config.enabled {
            return Err(ChatError::Builder(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        let provider: Box<dyn CompletionProvider> = match provider_name {
            "azure_openai" => Box::new(AzureOpenAIProvider::new(config, timeout)?),
            "openai" => Box::new(OpenAIProvider::new(config, timeout)?),
            _ => {
                return Err(ChatError::Builder(format!(
                    "Unknown provider: {}",
                    provider_name
                )))
            }
        };
        Ok(provider)
    }

    /// Get the default provider from configuration
    ///
    /// A provider missing from the `providers` table is built from defaults,
    /// so environment credentials alone are enough.
    pub fn get_default_provider(
        config: &AppConfig,
    ) -> Result<Box<dyn CompletionProvider>, ChatError> {
        let provider_name = &config.default_provider;
        let provider_config = config
            .providers
            .get(provider_name)
            .cloned()
            .unwrap_or_default();

        Self::create(
            provider_name,
            &provider_config,
            Duration::from_secs(config.timeout),
        )
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["azure_openai", "openai"]
    }
}
