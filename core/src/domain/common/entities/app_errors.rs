use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("{0} not found")]
    ConfigMissing(String),

    #[error("Failed to parse request body as JSON: {0}")]
    RequestBodyInvalid(String),

    #[error("No response from Gemini API")]
    EmptyResponse,

    /// The extracted model text is not valid JSON. `raw` is kept for logs only.
    #[error("Failed to parse LLM response as JSON: {message}")]
    InvalidJson { message: String, raw: String },

    #[error("{0}")]
    ExternalServiceError(String),
}
