use super::handlers::analyze_product::{__path_analyze_product, analyze_product};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze_product))]
pub struct ProductAnalysisApiDoc;

pub fn product_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/analyze", state.args.server.root_path),
        post(analyze_product),
    )
}
