//! PostgreSQL persistence adapter.

mod diesel_feedback_repository;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_feedback_repository::DieselFeedbackRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
