//! Audit trail of submission attempts.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use squid_identity::IdentityType;

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Identity created
    Created { identity_id: String },
    /// Service rejected the request
    Rejected { error: String },
    /// Adapter failed unexpectedly
    Failed { error: String },
    /// Review validation stopped the submission before the adapter
    Invalid { fields: Vec<String> },
}

/// One submission attempt.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// Unique request ID
    pub request_id: String,
    pub identity_type: Option<IdentityType>,
    pub name: String,
    /// `None` while the adapter call is pending
    pub outcome: Option<SubmissionOutcome>,
    pub requested_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_ms: Option<u64>,
}

/// Submission log, newest first.
pub struct SubmissionAuditLog {
    entries: Arc<RwLock<VecDeque<AuditEntry>>>,
    max_entries: usize,
}

impl SubmissionAuditLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            max_entries,
        }
    }

    /// Log a submission attempt (before calling the adapter).
    pub async fn log_attempt(&self, identity_type: Option<IdentityType>, name: &str) -> String {
        let entry = AuditEntry {
            request_id: uuid::Uuid::new_v4().to_string(),
            identity_type,
            name: name.to_string(),
            outcome: None,
            requested_at: Utc::now(),
            completed_at: None,
            duration_ms: None,
        };
        let request_id = entry.request_id.clone();

        let mut entries = self.entries.write().await;
        entries.push_front(entry);
        while entries.len() > self.max_entries {
            entries.pop_back();
        }

        request_id
    }

    /// Record how an attempt ended.
    pub async fn log_outcome(&self, request_id: &str, outcome: SubmissionOutcome) {
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.iter_mut().find(|e| e.request_id == request_id) {
            let now = Utc::now();
            entry.duration_ms = Some((now - entry.requested_at).num_milliseconds().max(0) as u64);
            entry.completed_at = Some(now);
            entry.outcome = Some(outcome);
        }
    }

    /// Get recent entries.
    pub async fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        entries.iter().take(limit).cloned().collect()
    }

    pub async fn get(&self, request_id: &str) -> Option<AuditEntry> {
        let entries = self.entries.read().await;
        entries.iter().find(|e| e.request_id == request_id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl Default for SubmissionAuditLog {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_attempt_and_outcome() {
        let log = SubmissionAuditLog::default();
        let id = log.log_attempt(Some(IdentityType::Dao), "Builders Guild").await;

        let entry = log.get(&id).await.unwrap();
        assert!(entry.outcome.is_none());

        log.log_outcome(
            &id,
            SubmissionOutcome::Rejected {
                error: "Name exists".to_string(),
            },
        )
        .await;

        let entry = log.get(&id).await.unwrap();
        assert!(matches!(entry.outcome, Some(SubmissionOutcome::Rejected { .. })));
        assert!(entry.completed_at.is_some());
        assert!(entry.duration_ms.is_some());
    }

    #[tokio::test]
    async fn test_pruning_keeps_newest() {
        let log = SubmissionAuditLog::new(2);
        log.log_attempt(None, "one").await;
        log.log_attempt(None, "two").await;
        log.log_attempt(None, "three").await;

        let recent = log.recent(10).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "three");
        assert_eq!(recent[1].name, "two");
    }
}
