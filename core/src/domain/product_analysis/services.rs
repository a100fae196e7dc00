use tracing::Instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    product_analysis::{
        entities::ProductRecord,
        helpers::{extract_valid_json, truncate_chars},
        ports::{LLMClient, ProductAnalysisService},
        prompt::build_prompt,
        schema::get_product_analysis_schema,
    },
};

impl<LLM> ProductAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn invoke_model(&self, prompt: String) -> Result<String, CoreError> {
        let response_schema = self.structured_output.then(get_product_analysis_schema);

        let raw_response = self
            .llm_client
            .generate_with_text(prompt, response_schema)
            .await
            .inspect_err(|e| {
                tracing::error!("Error calling {}: {}", self.llm_client.model_name(), e)
            })?;

        extract_valid_json(&raw_response).inspect_err(|e| {
            tracing::error!("Error in invoke_model: {}", e);
            tracing::error!("Raw response: {}", raw_response);
        })
    }

    async fn analyze_product(&self, record: ProductRecord) -> Result<serde_json::Value, CoreError> {
        let analysis_id = generate_uuid_v7();
        let span = tracing::info_span!("product_analysis", %analysis_id);

        async move {
            tracing::info!("Parsed data keys: {:?}", record.keys());

            // 1. Build prompt
            let prompt = build_prompt(&record);
            tracing::debug!("Built prompt (first 300 chars): {}...", truncate_chars(&prompt, 300));

            // 2. Call LLM and extract JSON
            let result_text = self.invoke_model(prompt).await?;
            tracing::info!("Gemini response: {}...", truncate_chars(&result_text, 200));

            // 3. Convert to JSON value
            serde_json::from_str(&result_text).map_err(|e| {
                tracing::error!("Raw response: {}", result_text);
                CoreError::InvalidJson {
                    message: e.to_string(),
                    raw: result_text.clone(),
                }
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Replays a canned reply and records what it was asked.
    struct StubLLMClient {
        reply: Result<String, CoreError>,
        prompts: Mutex<Vec<String>>,
        schemas: Mutex<Vec<Option<serde_json::Value>>>,
    }

    impl StubLLMClient {
        fn replying(reply: Result<&str, CoreError>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                prompts: Mutex::new(Vec::new()),
                schemas: Mutex::new(Vec::new()),
            }
        }
    }

    impl LLMClient for StubLLMClient {
        async fn generate_with_text(
            &self,
            prompt: String,
            response_schema: Option<serde_json::Value>,
        ) -> Result<String, CoreError> {
            self.prompts.lock().unwrap().push(prompt);
            self.schemas.lock().unwrap().push(response_schema);
            self.reply.clone()
        }

        fn model_name(&self) -> &str {
            "stub-model"
        }
    }

    fn analysis() -> serde_json::Value {
        json!({
            "sentiment_score": 0.8,
            "feature_quality_score": 0.9,
            "brand_reliability_score": 0.85,
            "rating_review_score": 0.88,
            "consistency_score": 0.82,
            "overall_score": 0.85,
            "decision": "BUY",
            "reason": "Solid phone.",
            "key_features": {"RAM": "8GB", "Storage": "128GB", "Battery": "5000mAh", "Display": "6.5 inch"},
            "pros": ["Fast", "Bright screen", "Good battery"],
            "cons": ["Heavy", "No charger"]
        })
    }

    fn record() -> ProductRecord {
        ProductRecord::from_slice(
            br#"{"title":"Phone X","brand":"Acme","reviews":["Great phone!"],"ratings":[5,4]}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_product_returns_model_object() {
        let reply = format!("```json\n{}\n```", analysis());
        let service = Service::new(StubLLMClient::replying(Ok(&reply)), false);

        let result = service.analyze_product(record()).await.unwrap();
        assert_eq!(result, analysis());

        let prompts = service.llm_client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Product Name: Phone X"));
        assert!(prompts[0].contains("Brand: Acme"));
        assert!(prompts[0].contains("- Great phone!"));
        assert!(prompts[0].contains("Average Rating from Reviews: 4.50/5.0"));
    }

    #[tokio::test]
    async fn test_invoke_model_handles_prefixed_reply() {
        let service = Service::new(StubLLMClient::replying(Ok(r#"Sure! {"a":1} done."#)), false);

        let json_text = service.invoke_model("prompt".to_string()).await.unwrap();
        assert_eq!(json_text, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_invoke_model_empty_reply() {
        let service = Service::new(StubLLMClient::replying(Ok("")), false);

        let err = service.invoke_model("prompt".to_string()).await.unwrap_err();
        assert_eq!(err, CoreError::EmptyResponse);
        assert!(err.to_string().contains("No response"));
    }

    #[tokio::test]
    async fn test_invoke_model_unparseable_reply() {
        let service = Service::new(StubLLMClient::replying(Ok("not json at all")), false);

        let err = service.invoke_model("prompt".to_string()).await.unwrap_err();
        match err {
            CoreError::InvalidJson { raw, .. } => assert_eq!(raw, "not json at all"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_model_propagates_client_error() {
        let service = Service::new(
            StubLLMClient::replying(Err(CoreError::ExternalServiceError(
                "LLM API returned error: 429 Too Many Requests - quota".to_string(),
            ))),
            false,
        );

        let err = service.analyze_product(record()).await.unwrap_err();
        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_structured_output_sends_schema() {
        let reply = analysis().to_string();
        let service = Service::new(StubLLMClient::replying(Ok(&reply)), true);

        service.analyze_product(record()).await.unwrap();

        let schemas = service.llm_client.schemas.lock().unwrap();
        assert_eq!(schemas[0], Some(get_product_analysis_schema()));
    }

    #[tokio::test]
    async fn test_plain_mode_sends_no_schema() {
        let reply = analysis().to_string();
        let service = Service::new(StubLLMClient::replying(Ok(&reply)), false);

        service.analyze_product(ProductRecord::default()).await.unwrap();

        let schemas = service.llm_client.schemas.lock().unwrap();
        assert_eq!(schemas[0], None);
    }
}
