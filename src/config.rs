use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used when none is specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Prompt template options
    #[serde(default)]
    pub prompt: PromptConfig,
    /// Locations of external lookup tables
    #[serde(default)]
    pub tables: TablesConfig,
    /// Session behaviour
    #[serde(default)]
    pub session: SessionConfig,
}

/// Configuration for a specific completion provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o")
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    // Optional provider-specific fields
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Resource endpoint (Azure OpenAI)
    pub endpoint: Option<String>,
    /// Deployment name (Azure OpenAI)
    pub deployment_name: Option<String>,
    /// API version (Azure OpenAI)
    pub api_version: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
            endpoint: None,
            deployment_name: None,
            api_version: None,
        }
    }
}

/// Prompt template options
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PromptConfig {
    /// Extra instruction appended inside the parentheses of the prompt
    pub suffix: Option<String>,
}

/// Paths to lookup tables that replace the built-in ones
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TablesConfig {
    pub price: Option<String>,
    pub calorie: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Number of answer characters used as the favorite key
    #[serde(default = "default_favorite_key_chars")]
    pub favorite_key_chars: usize,
    /// Number of answer characters copied into the mail body
    #[serde(default = "default_mail_body_chars")]
    pub mail_body_chars: usize,
    /// Default mail recipient
    #[serde(default)]
    pub mail_to: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            favorite_key_chars: default_favorite_key_chars(),
            mail_body_chars: default_mail_body_chars(),
            mail_to: String::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            timeout: default_timeout(),
            prompt: PromptConfig::default(),
            tables: TablesConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "azure_openai".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    60
}

fn default_favorite_key_chars() -> usize {
    30
}

fn default_mail_body_chars() -> usize {
    1500
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_CHAT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_CHAT__PROVIDERS__AZURE_OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_CHAT__TABLES__PRICE
        .add_source(
            Environment::with_prefix("RECIPE_CHAT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
