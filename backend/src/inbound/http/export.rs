//! Export API handler.
//!
//! ```text
//! GET /api/export?format=csv|excel
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use tracing::error;

use crate::domain::export;
use crate::domain::export::ExportFormat;
use crate::inbound::http::error::export_failed;
use crate::inbound::http::state::HttpState;

/// Query parameters for the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// `csv` (default) or `excel`.
    pub format: Option<String>,
}

/// Download all stored records as a tabular file.
#[utoipa::path(
    get,
    path = "/api/export",
    params(
        ("format" = Option<String>, Query, description = "csv (default) or excel")
    ),
    responses(
        (status = 200, description = "File attachment in the selected format"),
        (status = 500, description = "Storage or encoding failure")
    ),
    tags = ["export"],
    operation_id = "exportFeedback"
)]
#[get("/export")]
pub async fn export_feedback(
    state: web::Data<HttpState>,
    query: web::Query<ExportQuery>,
) -> HttpResponse {
    let format = ExportFormat::from_query(query.format.as_deref());

    let records = match state.feedback.list_newest_first().await {
        Ok(records) => records,
        Err(storage_error) => {
            error!(error = %storage_error, "export load failed");
            return export_failed(&storage_error);
        }
    };

    match export::render(&records, format) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(format.content_type())
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", format.filename()),
            ))
            .body(bytes),
        Err(encode_error) => {
            error!(error = %encode_error, "export encoding failed");
            export_failed(&encode_error)
        }
    }
}
