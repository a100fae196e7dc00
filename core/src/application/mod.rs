use crate::{
    domain::common::{BuywiseConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::llm::GeminiLLMClient,
};

pub type BuywiseService = Service<GeminiLLMClient>;

pub fn create_service(config: BuywiseConfig) -> Result<BuywiseService, CoreError> {
    let llm_client = GeminiLLMClient::from_config(&config.llm)?;

    tracing::info!("Gemini client configured with model {}", config.llm.gemini_model);

    Ok(Service::new(llm_client, config.llm.structured_output))
}
