//! Storage port for feedback records.
//!
//! The domain only ever inserts and reads whole records; there is no update
//! or delete operation anywhere in the system, so the port does not offer
//! one.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::feedback::{Feedback, NewFeedback};

/// Failures surfaced by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackRepositoryError {
    /// The backing store could not be reached.
    #[error("storage connection failed: {message}")]
    Connection {
        /// Adapter-provided diagnostic.
        message: String,
    },
    /// The store rejected or failed the operation.
    #[error("storage query failed: {message}")]
    Query {
        /// Adapter-provided diagnostic.
        message: String,
    },
}

impl FeedbackRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for persisting and reading feedback records.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist one validated submission and return the stored record,
    /// including its generated id and timestamps.
    async fn insert(&self, submission: NewFeedback) -> Result<Feedback, FeedbackRepositoryError>;

    /// All stored records ordered by creation time, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Feedback>, FeedbackRepositoryError>;
}

/// In-memory repository used by tests and database-less runs.
///
/// Ids and timestamps are assigned at insert, matching the behaviour of the
/// PostgreSQL adapter closely enough for handler tests.
#[derive(Debug, Default)]
pub struct FixtureFeedbackRepository {
    records: Mutex<Vec<Feedback>>,
}

impl FixtureFeedbackRepository {
    /// Create an empty fixture repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Feedback>>, FeedbackRepositoryError> {
        self.records
            .lock()
            .map_err(|_| FeedbackRepositoryError::query("fixture store poisoned"))
    }
}

#[async_trait]
impl FeedbackRepository for FixtureFeedbackRepository {
    async fn insert(&self, submission: NewFeedback) -> Result<Feedback, FeedbackRepositoryError> {
        let now = Utc::now();
        let record = Feedback {
            id: Uuid::new_v4(),
            name: submission.name,
            email: submission.email,
            message: submission.message,
            rating: submission.rating,
            created_at: now,
            updated_at: now,
        };
        self.lock()?.push(record.clone());
        Ok(record)
    }

    async fn list_newest_first(&self) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let mut records = self.lock()?.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::Rating;
    use rstest::rstest;

    fn submission(name: &str, rating: u8) -> NewFeedback {
        NewFeedback {
            name: name.to_owned(),
            email: None,
            message: "long enough message".to_owned(),
            rating: Rating::try_from(i64::from(rating)).expect("test rating in range"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_id_and_matching_timestamps() {
        let repo = FixtureFeedbackRepository::new();
        let stored = repo.insert(submission("Ada", 4)).await.expect("insert");

        assert!(!stored.id.is_nil());
        assert_eq!(stored.created_at, stored.updated_at);
        assert_eq!(stored.name, "Ada");
    }

    #[rstest]
    #[tokio::test]
    async fn listing_returns_newest_first() {
        let repo = FixtureFeedbackRepository::new();
        for name in ["first", "second", "third"] {
            repo.insert(submission(name, 3)).await.expect("insert");
        }

        let listed = repo.list_newest_first().await.expect("list");
        assert_eq!(listed.len(), 3);
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[rstest]
    fn error_constructors_carry_the_message() {
        let conn = FeedbackRepositoryError::connection("refused");
        let query = FeedbackRepositoryError::query("syntax");
        assert!(conn.to_string().contains("refused"));
        assert!(query.to_string().contains("syntax"));
    }
}
