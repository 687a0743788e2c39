use std::time::Duration;

use log::{info, warn};

use crate::config::AppConfig;
use crate::error::{ChatError, Result};
use crate::estimate::{estimate_answer, EstimationOutcome, LookupTable, TableKind};
use crate::prompt::{compose_prompt, Question};
use crate::providers::{CompletionProvider, ProviderFactory};
use crate::session::Session;

/// Completion backends selectable from the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    AzureOpenAI,
    OpenAI,
}

impl Provider {
    /// Convert to provider name string used by the factory
    fn as_str(&self) -> &str {
        match self {
            Provider::AzureOpenAI => "azure_openai",
            Provider::OpenAI => "openai",
        }
    }
}

/// Asks a completion provider for recipes and estimates their ingredients.
pub struct RecipeChat {
    provider: Box<dyn CompletionProvider>,
    prices: LookupTable,
    calories: LookupTable,
    prompt_suffix: Option<String>,
}

impl RecipeChat {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_chat::RecipeChat;
    ///
    /// let builder = RecipeChat::builder();
    /// ```
    pub fn builder() -> RecipeChatBuilder {
        RecipeChatBuilder::default()
    }

    /// Build from loaded configuration with no overrides
    pub fn from_config(config: AppConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn table(&self, kind: TableKind) -> &LookupTable {
        match kind {
            TableKind::Price => &self.prices,
            TableKind::Calorie => &self.calories,
        }
    }

    /// Send one question and return the answer text.
    ///
    /// A provider failure is returned as [`ChatError::Completion`]; nothing
    /// is retried.
    pub async fn ask_question(&self, question: &Question) -> Result<String> {
        let prompt = compose_prompt(question, self.prompt_suffix.as_deref())?;
        info!(
            "Asking {} ({} servings, {})",
            self.provider.provider_name(),
            question.servings,
            question.difficulty
        );

        match self.provider.complete(&prompt).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                warn!("Completion failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Ask with the session's current selections and remember the answer.
    ///
    /// On failure the session keeps its previous answer.
    pub async fn ask(&self, session: &mut Session, text: &str) -> Result<String> {
        let question = Question::new(text.trim(), session.servings, session.difficulty);
        let answer = self.ask_question(&question).await?;
        session.record_answer(question, answer.clone());
        Ok(answer)
    }

    /// Estimate the session's last answer.
    ///
    /// Per-serving figures use the serving count the answer was requested for.
    pub fn estimate(&self, session: &Session, kind: TableKind) -> Result<EstimationOutcome> {
        let answer = session.last_answer().ok_or(ChatError::NoAnswer)?;
        let servings = session
            .last_question()
            .map(|q| q.servings)
            .unwrap_or(session.servings);
        Ok(self.estimate_text(answer, kind, Some(servings.get())))
    }

    /// Estimate arbitrary text, e.g. an ingredient list typed by hand.
    pub fn estimate_text(
        &self,
        text: &str,
        kind: TableKind,
        servings: Option<u32>,
    ) -> EstimationOutcome {
        estimate_answer(text, self.table(kind), servings)
    }
}

/// Builder for configuring a [`RecipeChat`]
#[derive(Default)]
pub struct RecipeChatBuilder {
    config: Option<AppConfig>,
    provider: Option<Provider>,
    provider_instance: Option<Box<dyn CompletionProvider>>,
    api_key: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    deployment_name: Option<String>,
    timeout: Option<Duration>,
    prices: Option<LookupTable>,
    calories: Option<LookupTable>,
    prompt_suffix: Option<String>,
}

impl RecipeChatBuilder {
    /// Start from a loaded configuration instead of the defaults
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Choose the completion backend
    ///
    /// # Example
    /// ```
    /// use recipe_chat::{Provider, RecipeChat};
    ///
    /// let builder = RecipeChat::builder()
    ///     .provider(Provider::OpenAI)
    ///     .api_key("your-api-key");
    /// ```
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use an already constructed provider, bypassing the factory
    pub fn provider_instance(mut self, provider: Box<dyn CompletionProvider>) -> Self {
        self.provider_instance = Some(provider);
        self
    }

    /// Set the API key for the provider
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the Azure OpenAI resource endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the Azure OpenAI deployment name
    pub fn deployment_name(mut self, name: impl Into<String>) -> Self {
        self.deployment_name = Some(name.into());
        self
    }

    /// Set a timeout for completion requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn price_table(mut self, table: LookupTable) -> Self {
        self.prices = Some(table);
        self
    }

    pub fn calorie_table(mut self, table: LookupTable) -> Self {
        self.calories = Some(table);
        self
    }

    /// Extra instruction appended to every prompt
    pub fn prompt_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.prompt_suffix = Some(suffix.into());
        self
    }

    /// Resolve the provider and tables
    ///
    /// # Errors
    /// Returns `ChatError` if:
    /// - the provider is unknown, disabled, or missing credentials
    /// - a configured lookup table cannot be read
    pub fn build(self) -> Result<RecipeChat> {
        let config = self.config.unwrap_or_default();

        let provider = match self.provider_instance {
            Some(provider) => provider,
            None => {
                let name = self
                    .provider
                    .as_ref()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_else(|| config.default_provider.clone());
                let mut provider_config = config.providers.get(&name).cloned().unwrap_or_default();

                if let Some(key) = self.api_key {
                    provider_config.api_key = Some(key);
                }
                if let Some(model) = self.model {
                    provider_config.model = model;
                }
                if let Some(endpoint) = self.endpoint {
                    provider_config.endpoint = Some(endpoint);
                }
                if let Some(deployment) = self.deployment_name {
                    provider_config.deployment_name = Some(deployment);
                }
                let timeout = self
                    .timeout
                    .unwrap_or_else(|| Duration::from_secs(config.timeout));

                ProviderFactory::create(&name, &provider_config, timeout)?
            }
        };

        let prices = match self.prices {
            Some(table) => table,
            None => LookupTable::load_or_builtin(config.tables.price.as_deref(), TableKind::Price)?,
        };
        let calories = match self.calories {
            Some(table) => table,
            None => LookupTable::load_or_builtin(
                config.tables.calorie.as_deref(),
                TableKind::Calorie,
            )?,
        };

        if prices.kind != TableKind::Price || calories.kind != TableKind::Calorie {
            return Err(ChatError::Builder(
                "Price and calorie tables were swapped".to_string(),
            ));
        }

        Ok(RecipeChat {
            provider,
            prices,
            calories,
            prompt_suffix: self.prompt_suffix.or(config.prompt.suffix),
        })
    }
}
