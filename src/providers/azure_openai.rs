use crate::config::ProviderConfig;
use crate::error::CompletionError;
use crate::providers::{read_chat_content, transport_error, CompletionProvider};
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

pub struct AzureOpenAIProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    deployment_name: String,
    api_version: String,
    temperature: f32,
    max_tokens: u32,
}

impl AzureOpenAIProvider {
    /// Create a new Azure OpenAI provider from configuration
    ///
    /// Each credential is taken from the config first and falls back to
    /// `AZURE_OPENAI_API_KEY`, `AZURE_OPENAI_ENDPOINT` and
    /// `AZURE_OPENAI_DEPLOYMENT`.
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, CompletionError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("AZURE_OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                CompletionError::MissingCredential(
                    "AZURE_OPENAI_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let endpoint = config
            .endpoint
            .clone()
            .or_else(|| std::env::var("AZURE_OPENAI_ENDPOINT").ok())
            .ok_or_else(|| {
                CompletionError::MissingCredential("Azure OpenAI endpoint is required".to_string())
            })?;

        let deployment_name = config
            .deployment_name
            .clone()
            .or_else(|| std::env::var("AZURE_OPENAI_DEPLOYMENT").ok())
            .ok_or_else(|| {
                CompletionError::MissingCredential(
                    "Azure OpenAI deployment_name is required".to_string(),
                )
            })?;

        let api_version = config
            .api_version
            .clone()
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(AzureOpenAIProvider {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            endpoint,
            deployment_name,
            api_version,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionProvider for AzureOpenAIProvider {
    fn provider_name(&self) -> &str {
        "azure_openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        // https://{endpoint}/openai/deployments/{deployment-name}/chat/completions?api-version={api-version}
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment_name,
            self.api_version
        );

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&json!({
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await
            .map_err(transport_error)?;

        let answer = read_chat_content(response).await?;
        info!(
            "Received {} characters from deployment '{}'",
            answer.chars().count(),
            self.deployment_name
        );
        Ok(answer)
    }
}
