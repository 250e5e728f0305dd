//! Core trait for the identity creation service.
//!
//! The wizard hands the selected type and collected metadata to a
//! [`SubmissionAdapter`] and reacts to the outcome.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use squid_identity::{CreatedIdentity, IdentityType, SubidentityMetadata};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Errors that are not business outcomes.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Service could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Service answered with something unusable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Anything else
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Business outcome of a creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionResult {
    /// Identity was created
    Created { identity: CreatedIdentity },
    /// Service refused the request
    Rejected {
        error: String,
        #[serde(default)]
        validation_errors: Vec<String>,
    },
}

impl SubmissionResult {
    pub fn rejected(error: impl Into<String>) -> Self {
        Self::Rejected {
            error: error.into(),
            validation_errors: Vec::new(),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Creates subidentities.
#[async_trait]
pub trait SubmissionAdapter: Send + Sync {
    /// Create a subidentity of the given type.
    async fn submit(
        &self,
        identity_type: IdentityType,
        metadata: &SubidentityMetadata,
    ) -> Result<SubmissionResult, AdapterError>;
}
