//! Shared HTTP adapter state.
//!
//! Handlers receive their dependencies through `actix_web::web::Data`, so
//! they depend only on the domain port and stay testable without a
//! database.

use std::sync::Arc;

use crate::domain::ports::FeedbackRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Storage port backing every endpoint.
    pub feedback: Arc<dyn FeedbackRepository>,
}

impl HttpState {
    /// Construct state around a repository implementation.
    #[must_use]
    pub fn new(feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { feedback }
    }
}
