//! Ports: traits the domain depends on, implemented by outbound adapters.

mod feedback_repository;

pub use feedback_repository::{
    FeedbackRepository, FeedbackRepositoryError, FixtureFeedbackRepository,
};
