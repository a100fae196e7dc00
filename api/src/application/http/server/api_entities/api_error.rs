use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use buywise_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    #[schema(example = "Analysis failed: No response from Gemini API")]
    pub detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Malformed client bodies are reported as 500 as well; callers rely on it.
impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::RequestBodyInvalid(_) | CoreError::InvalidJson { .. } => {
                ApiError::InternalServerError(error.to_string())
            }
            CoreError::ConfigMissing(_)
            | CoreError::EmptyResponse
            | CoreError::ExternalServiceError(_) => {
                ApiError::InternalServerError(format!("Analysis failed: {}", error))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiErrorResponse {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
