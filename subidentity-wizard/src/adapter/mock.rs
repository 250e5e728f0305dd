//! Mock creation service for testing.

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use squid_identity::{CreatedIdentity, IdentityType, SubidentityMetadata};

use super::traits::*;

/// What the mock answers.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Create an identity from the submitted metadata
    Create,
    /// Business rejection
    Reject {
        error: String,
        validation_errors: Vec<String>,
    },
    /// Transport failure
    Fail(String),
}

/// Mock adapter for testing.
///
/// Configurable outcome, call recording and an optional gate that holds each
/// submission until released.
pub struct MockSubmissionAdapter {
    outcome: MockOutcome,
    parent_id: Option<String>,
    gate: Option<Arc<Notify>>,
    call_count: AtomicU32,
    last_call: Mutex<Option<(IdentityType, SubidentityMetadata)>>,
}

impl MockSubmissionAdapter {
    /// Adapter that creates identities.
    pub fn new() -> Self {
        Self {
            outcome: MockOutcome::Create,
            parent_id: None,
            gate: None,
            call_count: AtomicU32::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Adapter that rejects with a message.
    pub fn rejecting(error: impl Into<String>) -> Self {
        Self::new().with_outcome(MockOutcome::Reject {
            error: error.into(),
            validation_errors: Vec::new(),
        })
    }

    /// Adapter whose transport fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new().with_outcome(MockOutcome::Fail(message.into()))
    }

    /// Set the outcome.
    pub fn with_outcome(mut self, outcome: MockOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Parent recorded on created identities.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Hold every submission until the gate is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Get the number of times submit was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The arguments of the most recent call.
    pub fn last_call(&self) -> Option<(IdentityType, SubidentityMetadata)> {
        match self.last_call.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn create(&self, identity_type: IdentityType, metadata: &SubidentityMetadata) -> CreatedIdentity {
        let id = uuid::Uuid::new_v4().to_string();
        let digest = Sha256::digest(format!("{}:{}:{}", identity_type.label(), metadata.name, id));

        CreatedIdentity {
            did: format!("did:squid:{}", &hex::encode(digest)[..32]),
            id,
            name: metadata.name.trim().to_string(),
            identity_type,
            parent_id: self.parent_id.clone(),
            privacy_level: metadata
                .privacy_level
                .unwrap_or(identity_type.rule().visibility),
            created_at: Utc::now(),
        }
    }
}

impl Default for MockSubmissionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionAdapter for MockSubmissionAdapter {
    async fn submit(
        &self,
        identity_type: IdentityType,
        metadata: &SubidentityMetadata,
    ) -> Result<SubmissionResult, AdapterError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.last_call.lock() {
            Ok(mut guard) => *guard = Some((identity_type, metadata.clone())),
            Err(poisoned) => *poisoned.into_inner() = Some((identity_type, metadata.clone())),
        }

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.outcome {
            MockOutcome::Create => Ok(SubmissionResult::Created {
                identity: self.create(identity_type, metadata),
            }),
            MockOutcome::Reject {
                error,
                validation_errors,
            } => Ok(SubmissionResult::Rejected {
                error: error.clone(),
                validation_errors: validation_errors.clone(),
            }),
            MockOutcome::Fail(message) => Err(AdapterError::Network(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squid_identity::PrivacyLevel;

    fn metadata() -> SubidentityMetadata {
        SubidentityMetadata {
            name: " Builders Guild ".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mock_creates() {
        let adapter = MockSubmissionAdapter::new().with_parent("root-1");
        assert_eq!(adapter.call_count(), 0);

        let result = adapter.submit(IdentityType::Dao, &metadata()).await.unwrap();
        let SubmissionResult::Created { identity } = result else {
            panic!("expected created identity");
        };

        assert_eq!(identity.name, "Builders Guild");
        assert!(identity.did.starts_with("did:squid:"));
        assert_eq!(identity.parent_id.as_deref(), Some("root-1"));
        assert_eq!(identity.privacy_level, PrivacyLevel::Public);
        assert_eq!(adapter.call_count(), 1);
        assert_eq!(adapter.last_call().map(|(t, _)| t), Some(IdentityType::Dao));
    }

    #[tokio::test]
    async fn test_mock_rejects() {
        let adapter = MockSubmissionAdapter::rejecting("Name exists");
        let result = adapter.submit(IdentityType::Aid, &metadata()).await.unwrap();
        assert_eq!(result, SubmissionResult::rejected("Name exists"));
    }

    #[tokio::test]
    async fn test_mock_fails() {
        let adapter = MockSubmissionAdapter::failing("connection reset");
        let result = adapter.submit(IdentityType::Aid, &metadata()).await;
        assert!(matches!(result, Err(AdapterError::Network(_))));
    }
}
