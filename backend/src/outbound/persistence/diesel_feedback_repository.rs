//! PostgreSQL-backed [`FeedbackRepository`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::feedback::{Feedback, NewFeedback, Rating};
use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError};

use super::models::{FeedbackRow, NewFeedbackRow};
use super::pool::{DbPool, PoolError};
use super::schema::feedback;

/// Diesel adapter for the feedback storage port.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Create a repository backed by the given pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to the port's error type.
fn map_pool_error(error: PoolError) -> FeedbackRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            FeedbackRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to the port's error type, logging the specifics at
/// debug level so diagnostics never leak raw database detail to clients.
fn map_diesel_error(error: diesel::result::Error) -> FeedbackRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            FeedbackRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            FeedbackRepositoryError::query("database constraint violation")
        }
        DieselError::DatabaseError(_, _) => FeedbackRepositoryError::query("database error"),
        DieselError::NotFound => FeedbackRepositoryError::query("record not found"),
        _ => FeedbackRepositoryError::query("database error"),
    }
}

/// Convert a database row to the domain entity.
fn row_to_feedback(row: FeedbackRow) -> Result<Feedback, FeedbackRepositoryError> {
    let rating = Rating::try_from(i64::from(row.rating))
        .map_err(|_| FeedbackRepositoryError::query("stored rating out of range"))?;
    Ok(Feedback {
        id: row.id,
        name: row.name,
        email: row.email,
        message: row.message,
        rating,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn insert(&self, submission: NewFeedback) -> Result<Feedback, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewFeedbackRow {
            id: Uuid::new_v4(),
            name: &submission.name,
            email: submission.email.as_deref(),
            message: &submission.message,
            rating: i16::from(submission.rating.get()),
        };

        let stored: FeedbackRow = diesel::insert_into(feedback::table)
            .values(&new_row)
            .returning(FeedbackRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_feedback(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FeedbackRow> = feedback::table
            .order(feedback::created_at.desc())
            .select(FeedbackRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_feedback).collect()
    }
}
