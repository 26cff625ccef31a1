//! Feedback-collection backend.
//!
//! An HTML form posts ratings and comments to the ingestion endpoint, which
//! validates and persists them to PostgreSQL; the dashboard lists the stored
//! records, shows aggregates, and downloads the full set as CSV or XLSX.
//!
//! Layout follows a ports-and-adapters split: [`domain`] owns entities,
//! validation, and export encoding; [`inbound`] maps HTTP onto the domain;
//! [`outbound`] implements the storage port with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use middleware::Trace;
