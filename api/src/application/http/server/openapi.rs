use crate::application::http::{
    health::HealthApiDoc, product_analysis::router::ProductAnalysisApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Buywise API",
        description = "LLM-backed buy / not-buy analysis of e-commerce products"
    ),
    tags(
        (name = "product-analysis", description = "Product buy decision"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Full document with every route group merged in.
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut openapi = ApiDoc::openapi();
        openapi.merge(ProductAnalysisApiDoc::openapi());
        openapi.merge(HealthApiDoc::openapi());
        openapi
    }
}
