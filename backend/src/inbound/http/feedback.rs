//! Feedback API handlers.
//!
//! ```text
//! POST /api/feedback        Submit one feedback record
//! GET  /api/feedback        List all records, newest first
//! GET  /api/feedback/stats  Dashboard aggregates
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Feedback, FeedbackDraft, FeedbackStats};
use crate::inbound::http::error::{listing_failed, storage_failed, validation_failed};
use crate::inbound::http::state::HttpState;

/// One stored record as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    /// System-generated identifier.
    pub id: Uuid,
    /// Submitter name.
    pub name: String,
    /// Contact address; `null` when the submitter left it blank.
    pub email: Option<String>,
    /// Free-text comment.
    pub message: String,
    /// Star rating in 1..=5.
    pub rating: u8,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Last modification time; equals `createdAt` in practice.
    pub updated_at: String,
}

impl From<Feedback> for FeedbackResponse {
    fn from(record: Feedback) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            message: record.message,
            rating: record.rating.get(),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

/// Dashboard aggregates as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStatsResponse {
    /// Total number of stored records.
    pub total_feedback: u64,
    /// Mean rating, 0 when no records exist.
    pub average_rating: f64,
    /// Records created within the last seven days.
    pub recent_feedback: u64,
}

impl From<FeedbackStats> for FeedbackStatsResponse {
    fn from(stats: FeedbackStats) -> Self {
        Self {
            total_feedback: stats.total,
            average_rating: stats.average_rating,
            recent_feedback: stats.recent,
        }
    }
}

/// Validate and persist one submission.
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = FeedbackDraft,
    responses(
        (status = 200, description = "Stored record", body = FeedbackResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Validation failure naming each offending field"),
        (status = 500, description = "Storage failure")
    ),
    tags = ["feedback"],
    operation_id = "submitFeedback"
)]
#[post("/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    payload: web::Json<FeedbackDraft>,
) -> HttpResponse {
    match payload.into_inner().validate() {
        Err(report) => {
            debug!(fields = ?report.fields().collect::<Vec<_>>(), "submission failed validation");
            validation_failed(&report)
        }
        Ok(submission) => match state.feedback.insert(submission).await {
            Ok(record) => HttpResponse::Ok().json(FeedbackResponse::from(record)),
            Err(storage_error) => {
                error!(error = %storage_error, "feedback insert failed");
                storage_failed(&storage_error)
            }
        },
    }
}

/// List all stored records, newest first.
#[utoipa::path(
    get,
    path = "/api/feedback",
    responses(
        (status = 200, description = "Records ordered newest first", body = [FeedbackResponse]),
        (status = 500, description = "Storage failure (plain text)")
    ),
    tags = ["feedback"],
    operation_id = "listFeedback"
)]
#[get("/feedback")]
pub async fn list_feedback(state: web::Data<HttpState>) -> HttpResponse {
    match state.feedback.list_newest_first().await {
        Ok(records) => {
            let body: Vec<FeedbackResponse> =
                records.into_iter().map(FeedbackResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(storage_error) => {
            error!(error = %storage_error, "feedback listing failed");
            listing_failed()
        }
    }
}

/// Dashboard aggregates over the full record set.
#[utoipa::path(
    get,
    path = "/api/feedback/stats",
    responses(
        (status = 200, description = "Aggregates", body = FeedbackStatsResponse),
        (status = 500, description = "Storage failure")
    ),
    tags = ["feedback"],
    operation_id = "feedbackStats"
)]
#[get("/feedback/stats")]
pub async fn feedback_stats(state: web::Data<HttpState>) -> HttpResponse {
    match state.feedback.list_newest_first().await {
        Ok(records) => {
            let stats = FeedbackStats::from_records(&records, Utc::now());
            HttpResponse::Ok().json(FeedbackStatsResponse::from(stats))
        }
        Err(storage_error) => {
            error!(error = %storage_error, "feedback stats failed");
            storage_failed(&storage_error)
        }
    }
}
