//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod export;
pub mod feedback;
pub mod health;
pub mod state;

pub use error::json_error_handler;
