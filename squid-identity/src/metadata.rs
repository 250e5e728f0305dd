//! Subidentity metadata accumulated across the wizard steps.

use serde::{Deserialize, Serialize};

use crate::governance::GovernanceConfig;
use crate::privacy::QonsentConfig;
use crate::types::PrivacyLevel;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Form data for a new subidentity, built up step by step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SubidentityMetadata {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Avatar URL or content hash
    pub avatar: Option<String>,
    pub governance_config: Option<GovernanceConfig>,
    pub privacy_level: Option<PrivacyLevel>,
    pub qonsent_config: Option<QonsentConfig>,
}

impl SubidentityMetadata {
    /// Shallow-merge a patch: fields present in the patch overwrite, the rest stay.
    pub fn apply(&mut self, patch: MetadataPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(governance_config) = patch.governance_config {
            self.governance_config = governance_config;
        }
        if let Some(privacy_level) = patch.privacy_level {
            self.privacy_level = privacy_level;
        }
        if let Some(qonsent_config) = patch.qonsent_config {
            self.qonsent_config = qonsent_config;
        }
    }
}

/// Partial update for [`SubidentityMetadata`].
///
/// The outer `Option` says whether the field is part of the patch; for
/// optional fields the inner `Option` is the new value, so `Some(None)` clears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub avatar: Option<Option<String>>,
    pub governance_config: Option<Option<GovernanceConfig>>,
    pub privacy_level: Option<Option<PrivacyLevel>>,
    pub qonsent_config: Option<Option<QonsentConfig>>,
}

impl MetadataPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(Some(avatar.into()));
        self
    }

    pub fn clear_avatar(mut self) -> Self {
        self.avatar = Some(None);
        self
    }

    pub fn governance(mut self, config: GovernanceConfig) -> Self {
        self.governance_config = Some(Some(config));
        self
    }

    pub fn clear_governance(mut self) -> Self {
        self.governance_config = Some(None);
        self
    }

    pub fn privacy_level(mut self, level: PrivacyLevel) -> Self {
        self.privacy_level = Some(Some(level));
        self
    }

    pub fn clear_privacy_level(mut self) -> Self {
        self.privacy_level = Some(None);
        self
    }

    pub fn qonsent(mut self, config: QonsentConfig) -> Self {
        self.qonsent_config = Some(Some(config));
        self
    }

    pub fn clear_qonsent(mut self) -> Self {
        self.qonsent_config = Some(None);
        self
    }

    /// Whether the patch touches no field.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patches_merge() {
        let mut metadata = SubidentityMetadata::default();
        metadata.apply(MetadataPatch::new().name("X"));
        metadata.apply(MetadataPatch::new().description("Y"));

        assert_eq!(metadata.name, "X");
        assert_eq!(metadata.description.as_deref(), Some("Y"));
    }

    #[test]
    fn test_clear_optional_field() {
        let mut metadata = SubidentityMetadata::default();
        metadata.apply(MetadataPatch::new().description("temp").avatar("ipfs://a"));
        metadata.apply(MetadataPatch::new().clear_description());

        assert!(metadata.description.is_none());
        assert_eq!(metadata.avatar.as_deref(), Some("ipfs://a"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(MetadataPatch::new().is_empty());
        assert!(!MetadataPatch::new().tags(["a"]).is_empty());
    }
}
