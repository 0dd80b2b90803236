//! Summary generation port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::directive::DirectivePrompt;

/// Summary generation errors
#[derive(Debug, Clone, Error)]
pub enum SummaryError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty summary response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for the text-generation collaborator that drafts the formal
/// directive document
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Draft a prose document from the drafting prompt.
    ///
    /// # Arguments
    /// * `prompt` - The deterministic drafting prompt built from the form
    ///
    /// # Returns
    /// The generated document text or an error. No retry is attempted.
    async fn summarize(&self, prompt: &DirectivePrompt) -> Result<String, SummaryError>;
}
