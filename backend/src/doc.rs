//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every REST endpoint and request/response schema; the
//! generated document feeds Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::FeedbackDraft;
use crate::inbound::http::feedback::{FeedbackResponse, FeedbackStatsResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feedback backend API",
        description = "Feedback ingestion, listing, aggregates, and tabular export."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::feedback::submit_feedback,
        crate::inbound::http::feedback::list_feedback,
        crate::inbound::http::feedback::feedback_stats,
        crate::inbound::http::export::export_feedback,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(FeedbackDraft, FeedbackResponse, FeedbackStatsResponse)),
    tags(
        (name = "feedback", description = "Ingestion, listing, and aggregates"),
        (name = "export", description = "Tabular downloads"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/feedback",
            "/api/feedback/stats",
            "/api/export",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }

    #[test]
    fn document_registers_the_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;

        assert!(schemas.contains_key("FeedbackDraft"));
        assert!(schemas.contains_key("FeedbackResponse"));
        assert!(schemas.contains_key("FeedbackStatsResponse"));
    }
}
