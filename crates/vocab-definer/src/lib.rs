mod gemini;
mod prompt;

pub use gemini::GeminiDefiner;
pub use prompt::{DICTIONARY_PREAMBLE, build_prompt};

/// Definition provider interface
#[async_trait::async_trait]
pub trait Definer: Send + Sync {
    /// Ask the provider for a dictionary entry for `word`
    async fn define(&self, word: &str) -> Result<Definition, DefineError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Opaque formatted text, usually markdown, displayed as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub word: String,
    pub text: String,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DefineError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Empty response")]
    EmptyResponse,
}
