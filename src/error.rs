use thiserror::Error;

/// Failures at the completion-provider boundary.
///
/// Every variant renders as a single human-readable message; callers show it
/// verbatim and never retry.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Transport-level failure (DNS, TLS, connection reset, body decoding)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response did not contain `choices[0].message.content`
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An API key, endpoint or deployment name is missing
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,
}

/// Errors that can occur while asking for a recipe or estimating it
#[derive(Error, Debug)]
pub enum ChatError {
    /// The completion provider failed
    #[error("{0}")]
    Completion(#[from] CompletionError),

    /// The question was empty after trimming
    #[error("Question cannot be empty")]
    EmptyQuestion,

    /// Serving count outside the selectable range
    #[error("Invalid serving count: {0} (choose 1 to 5)")]
    InvalidServings(u32),

    /// Rating outside 1..=5
    #[error("Invalid rating: {0} (choose 1 to 5)")]
    InvalidRating(u8),

    /// An action needs an answer but none has been received yet
    #[error("No answer yet. Ask a question first")]
    NoAnswer,

    /// A lookup table could not be loaded
    #[error("Lookup table error: {0}")]
    Table(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Error building an outbound link
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Reading input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Interactive prompt failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, ChatError>;
