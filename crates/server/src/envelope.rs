//! Transport-agnostic request/response envelope.
//!
//! Mirrors the `/recommend` contract: the request carries the categories
//! (also accepted as `services`), budget and date; the response is either
//! `{"packages": [...]}` or `{"error": {...}}` with a stable code per failure.

use catalog::Category;
use packager::{Package, PackageRequest, PackagerError};
use serde::{Deserialize, Serialize};

/// Incoming request as it arrives over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(alias = "services")]
    pub categories: Vec<Category>,
    pub budget: f64,
    pub date: String,
}

impl RecommendRequest {
    /// Validate into the packager's request type
    pub fn into_package_request(self) -> Result<PackageRequest, PackagerError> {
        PackageRequest::new(self.categories, self.budget, self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyCatalog,
    NoEligibleOfferings,
    NoAffordableCombination,
    UpstreamFailure,
    InvalidRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    /// Categories without eligible offerings (`NO_ELIGIBLE_OFFERINGS` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<Category>>,
}

impl From<&PackagerError> for ErrorBody {
    fn from(err: &PackagerError) -> Self {
        let (code, message, missing) = match err {
            PackagerError::EmptyCatalog => (
                ErrorCode::EmptyCatalog,
                "No services are available in the system".to_string(),
                None,
            ),
            PackagerError::NoEligibleOfferings { missing } => (
                ErrorCode::NoEligibleOfferings,
                format!("No services available for: {}", missing.join(", ")),
                Some(missing.clone()),
            ),
            PackagerError::NoAffordableCombination { .. } => (
                ErrorCode::NoAffordableCombination,
                "No combination fits your budget".to_string(),
                None,
            ),
            // The cause is for operators (logged by the orchestrator), not clients
            PackagerError::UpstreamFailure(_) => (
                ErrorCode::UpstreamFailure,
                "The service catalog is currently unavailable".to_string(),
                None,
            ),
            PackagerError::InvalidRequest(reason) => {
                (ErrorCode::InvalidRequest, reason.clone(), None)
            }
        };

        Self {
            code,
            message,
            missing,
        }
    }
}

/// Response body: packages on success, a structured error otherwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendResponse {
    Packages { packages: Vec<Package> },
    Error { error: ErrorBody },
}

impl RecommendResponse {
    pub fn from_result(result: Result<Vec<Package>, PackagerError>) -> Self {
        match result {
            Ok(packages) => Self::Packages { packages },
            Err(err) => Self::Error {
                error: ErrorBody::from(&err),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
