use std::sync::Arc;

use crate::domain::product_analysis::ports::LLMClient;

/// Stateless service shared by every request handler.
#[derive(Debug)]
pub struct Service<LLM>
where
    LLM: LLMClient,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) structured_output: bool,
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, structured_output: bool) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            structured_output,
        }
    }

    pub fn model_name(&self) -> &str {
        self.llm_client.model_name()
    }
}

impl<LLM> Clone for Service<LLM>
where
    LLM: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            structured_output: self.structured_output,
        }
    }
}
