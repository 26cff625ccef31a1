//! Transport-agnostic core: entities, validation, filtering, export
//! encoding, and the storage port.

pub mod export;
pub mod feedback;
pub mod filter;
pub mod ports;

pub use export::{ExportError, ExportFormat};
pub use feedback::{Feedback, FeedbackDraft, FeedbackStats, NewFeedback, Rating, ValidationReport};
pub use filter::{filter_feedback, RatingBucket};
