//! Qonsent privacy profiles.
//!
//! The profile itself is owned by the Qonsent service; this is the shape the
//! wizard collects before submission.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::PrivacyLevel;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Data categories covered by a default profile.
pub const DATA_CATEGORIES: [&str; 4] = ["profile", "activity", "connections", "content"];

/// Profile sections covered by default visibility rules.
pub const PROFILE_SECTIONS: [&str; 3] = ["identity", "activity", "membership"];

/// Sharing rule for one data category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct DataSharingRule {
    pub enabled: bool,
    pub level: PrivacyLevel,
}

/// Privacy/consent profile for a subidentity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct QonsentConfig {
    /// Qonsent profile ID
    pub profile_id: String,
    /// Sharing rules keyed by data category
    pub data_sharing: BTreeMap<String, DataSharingRule>,
    /// Visibility keyed by profile section
    pub visibility_rules: BTreeMap<String, PrivacyLevel>,
}

impl QonsentConfig {
    /// Build a fully populated default profile for a privacy level.
    ///
    /// Sharing is enabled only for public and DAO-only identities.
    pub fn for_privacy_level(level: PrivacyLevel) -> Self {
        let enabled = matches!(level, PrivacyLevel::Public | PrivacyLevel::DaoOnly);

        let data_sharing = DATA_CATEGORIES
            .iter()
            .map(|category| (category.to_string(), DataSharingRule { enabled, level }))
            .collect();

        let visibility_rules = PROFILE_SECTIONS
            .iter()
            .map(|section| (section.to_string(), level))
            .collect();

        Self {
            profile_id: format!("qonsent-{}", uuid::Uuid::new_v4()),
            data_sharing,
            visibility_rules,
        }
    }

    /// Whether every part of the profile is populated.
    pub fn is_complete(&self) -> bool {
        !self.profile_id.trim().is_empty()
            && !self.data_sharing.is_empty()
            && !self.visibility_rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_complete() {
        let config = QonsentConfig::for_privacy_level(PrivacyLevel::Private);
        assert!(config.is_complete());
        assert_eq!(config.data_sharing.len(), DATA_CATEGORIES.len());
        assert!(config.data_sharing.values().all(|rule| !rule.enabled));
        assert!(config
            .visibility_rules
            .values()
            .all(|level| *level == PrivacyLevel::Private));
    }

    #[test]
    fn test_public_profile_shares() {
        let config = QonsentConfig::for_privacy_level(PrivacyLevel::Public);
        assert!(config.data_sharing.values().all(|rule| rule.enabled));
    }

    #[test]
    fn test_empty_profile_is_incomplete() {
        assert!(!QonsentConfig::default().is_complete());
    }
}
