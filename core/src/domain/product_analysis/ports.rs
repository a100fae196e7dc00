use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, product_analysis::entities::ProductRecord,
};

/// LLM Client trait for calling AI models
pub trait LLMClient: Send + Sync {
    /// Returns the model's raw reply text. An empty string means the model
    /// produced no text.
    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: Option<serde_json::Value>,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn model_name(&self) -> &str;
}

/// Service trait for product analysis business logic
pub trait ProductAnalysisService: Send + Sync {
    /// Sends a prompt to the model and returns the JSON text extracted from
    /// its reply, already checked to parse.
    fn invoke_model(&self, prompt: String)
    -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Builds the prompt for `record`, invokes the model and returns the
    /// analysis object as received.
    fn analyze_product(
        &self,
        record: ProductRecord,
    ) -> impl Future<Output = Result<serde_json::Value, CoreError>> + Send;
}
