mod azure_openai;
mod factory;
mod open_ai;

pub use azure_openai::AzureOpenAIProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;

use crate::error::CompletionError;
use async_trait::async_trait;
use log::debug;
use reqwest::Response;
use serde_json::Value;

/// Turns a prompt into a model-generated answer.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "azure_openai")
    fn provider_name(&self) -> &str;

    /// Send a single user message and return the answer text
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Map a transport failure, separating timeouts from other errors.
pub(crate) fn transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Http(err)
    }
}

/// Read a chat-completions response and pull out the first choice's content.
///
/// Both OpenAI and Azure OpenAI share this response shape, including the
/// `{"error": {"message": ...}}` body on failure.
pub(crate) async fn read_chat_content(response: Response) -> Result<String, CompletionError> {
    let status = response.status();
    let text = response.text().await.map_err(transport_error)?;
    debug!("{} {}", status, text);
    let body: Option<Value> = serde_json::from_str(&text).ok();

    if !status.is_success() {
        let message = body
            .as_ref()
            .and_then(|b| b["error"]["message"].as_str())
            .map(str::to_string)
            .unwrap_or(text);
        return Err(CompletionError::Api {
            status: status.as_u16(),
            message,
        });
    }

    body.as_ref()
        .and_then(|b| b["choices"][0]["message"]["content"].as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CompletionError::MalformedResponse(
                "Failed to extract content from response".to_string(),
            )
        })
}
