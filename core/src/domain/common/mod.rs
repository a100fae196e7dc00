use chrono::Utc;
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::common::entities::app_errors::CoreError;

pub mod entities;
pub mod services;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone, Debug)]
pub struct BuywiseConfig {
    pub llm: LLMConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Ask Gemini to enforce the analysis schema on its side.
    pub structured_output: bool,
}

impl LLMConfig {
    /// Validates the credential once at startup. A missing or blank key is fatal.
    pub fn new(
        gemini_api_key: Option<String>,
        gemini_model: String,
        gemini_base_url: String,
        structured_output: bool,
    ) -> Result<Self, CoreError> {
        let gemini_api_key = gemini_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| CoreError::ConfigMissing("GEMINI_API_KEY".to_string()))?;

        let gemini_model = if gemini_model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL.to_string()
        } else {
            gemini_model
        };

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_base_url: gemini_base_url.trim_end_matches('/').to_string(),
            structured_output,
        })
    }
}

pub fn generate_timestamp() -> Timestamp {
    let seconds = Utc::now().timestamp().try_into().unwrap_or(0);
    Timestamp::from_unix(NoContext, seconds, 0)
}

pub fn generate_uuid_v7() -> Uuid {
    Uuid::new_v7(generate_timestamp())
}
