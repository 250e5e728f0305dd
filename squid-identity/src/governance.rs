//! Governance records attached to a subidentity.
//!
//! - **DAO link**: the DAO that governs a DAO or Enterprise identity
//! - **Parental consent**: guardian details and consent state for a Consentida

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Governance configuration collected by the governance step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GovernanceConfig {
    Dao(DaoLink),
    ParentalConsent(ParentalConsent),
}

impl GovernanceConfig {
    pub fn as_dao(&self) -> Option<&DaoLink> {
        match self {
            Self::Dao(link) => Some(link),
            _ => None,
        }
    }

    pub fn as_parental_consent(&self) -> Option<&ParentalConsent> {
        match self {
            Self::ParentalConsent(consent) => Some(consent),
            _ => None,
        }
    }
}

/// Link to the governing DAO.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct DaoLink {
    /// DAO ID
    pub dao_id: String,
    /// DAO display name
    pub dao_name: Option<String>,
}

impl DaoLink {
    pub fn new(dao_id: impl Into<String>) -> Self {
        Self {
            dao_id: dao_id.into(),
            dao_name: None,
        }
    }
}

/// Relationship between a guardian and the minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum GuardianRelationship {
    Parent,
    LegalGuardian,
    Other,
}

/// Guardian details and consent state.
///
/// Consent counts as collected only once `consent_date` is set; a request
/// alone is not enough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ParentalConsent {
    pub guardian_name: String,
    pub guardian_email: String,
    pub relationship: Option<GuardianRelationship>,
    /// When consent was requested from the guardian
    pub consent_requested_at: Option<DateTime<Utc>>,
    /// When the guardian gave consent
    pub consent_date: Option<DateTime<Utc>>,
}

impl ParentalConsent {
    /// Create a record with guardian details and no consent yet.
    pub fn new(
        guardian_name: impl Into<String>,
        guardian_email: impl Into<String>,
        relationship: GuardianRelationship,
    ) -> Self {
        Self {
            guardian_name: guardian_name.into(),
            guardian_email: guardian_email.into(),
            relationship: Some(relationship),
            consent_requested_at: None,
            consent_date: None,
        }
    }

    /// Record that consent was requested.
    pub fn mark_requested(&mut self, at: DateTime<Utc>) {
        self.consent_requested_at = Some(at);
    }

    /// Record that the guardian consented.
    pub fn mark_collected(&mut self, at: DateTime<Utc>) {
        if self.consent_requested_at.is_none() {
            self.consent_requested_at = Some(at);
        }
        self.consent_date = Some(at);
    }

    /// Set the consent date (builder form).
    pub fn with_consent(mut self, at: DateTime<Utc>) -> Self {
        self.mark_collected(at);
        self
    }

    pub fn is_requested(&self) -> bool {
        self.consent_requested_at.is_some()
    }

    pub fn is_collected(&self) -> bool {
        self.consent_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_not_collection() {
        let mut consent = ParentalConsent::new("Ana", "ana@example.com", GuardianRelationship::Parent);
        consent.mark_requested(Utc::now());
        assert!(consent.is_requested());
        assert!(!consent.is_collected());

        consent.mark_collected(Utc::now());
        assert!(consent.is_collected());
    }

    #[test]
    fn test_config_accessors() {
        let config = GovernanceConfig::Dao(DaoLink::new("dao-1"));
        assert_eq!(config.as_dao().map(|l| l.dao_id.as_str()), Some("dao-1"));
        assert!(config.as_parental_consent().is_none());
    }

    #[test]
    fn test_tagged_serialization() {
        let config = GovernanceConfig::Dao(DaoLink::new("dao-1"));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["kind"], "dao");
        assert_eq!(json["dao_id"], "dao-1");
    }
}
