//! Server crate for the event packager.
//!
//! Holds the orchestrator that fetches a catalog snapshot and runs the
//! packager off the async executor, plus the transport-agnostic
//! request/response envelope.

pub mod envelope;
pub mod orchestrator;

pub use envelope::{ErrorBody, ErrorCode, RecommendRequest, RecommendResponse};
pub use orchestrator::PackageOrchestrator;
