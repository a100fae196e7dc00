use axum::extract::State;
use buywise_core::domain::product_analysis::{
    entities::{AnalysisResult, ProductRecord},
    helpers::truncate_chars,
    ports::ProductAnalysisService,
};
use bytes::Bytes;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "product-analysis",
    summary = "Analyze a product",
    description = "Accepts any JSON object describing one product, asks the LLM for a buy decision and returns its analysis as received.",
    responses(
        (status = 200, body = AnalysisResult),
        (status = 500, body = ApiErrorResponse)
    )
)]
pub async fn analyze_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response<serde_json::Value>, ApiError> {
    tracing::info!(
        "Received raw JSON: {}...",
        truncate_chars(&String::from_utf8_lossy(&body), 200)
    );

    let record = ProductRecord::from_slice(&body).map_err(|e| {
        tracing::error!("JSON Decode Error: {}", e);
        ApiError::from(e)
    })?;

    let result = state.service.analyze_product(record).await.map_err(|e| {
        tracing::error!("Error in analyze_product: {}", e);
        ApiError::from(e)
    })?;

    Ok(Response::OK(result))
}
