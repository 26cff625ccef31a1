//! Wire-level error payloads.
//!
//! Each endpoint has its own error body shape (the dashboard front end
//! depends on them), so the mapping from domain failures to responses lives
//! here rather than in a single envelope type:
//!
//! - ingestion: `422 {"message", "errors"}` / `500 {"message", "error"}`
//! - listing: `500` plain text
//! - export: `500 {"error", "details"}`

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use crate::domain::ValidationReport;
use crate::domain::ports::FeedbackRepositoryError;

/// 422 response naming every failed field.
pub(crate) fn validation_failed(report: &ValidationReport) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(json!({
        "message": "Validation error",
        "errors": report,
    }))
}

/// 500 response for a storage failure on the ingestion path.
pub(crate) fn storage_failed(error: &FeedbackRepositoryError) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "message": "Database error",
        "error": error.to_string(),
    }))
}

/// 500 plain-text response for the listing path.
pub(crate) fn listing_failed() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body("Internal Server Error")
}

/// 500 response for the export path; carries a best-effort diagnostic.
pub(crate) fn export_failed(details: &impl std::fmt::Display) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "error": "Failed to export feedback",
        "details": details.to_string(),
    }))
}

/// Turn actix's JSON extractor failures into a structured 400 instead of
/// the default opaque body.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = json!({
        "message": "Invalid JSON body",
        "error": err.to_string(),
    });
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
