//! Core identity types.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs so the wizard host renders exactly the shapes validated here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Kinds of identity in the sQuid ecosystem.
///
/// Every kind except `Root` can be created as a subidentity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum IdentityType {
    /// The root identity of a person
    Root,
    /// DAO-governed collective identity
    Dao,
    /// Business identity operating under a DAO
    Enterprise,
    /// Minor's identity controlled by a guardian
    Consentida,
    /// Anonymous identity
    Aid,
}

impl IdentityType {
    /// Kinds that can be created through the subidentity wizard.
    pub fn creatable() -> [Self; 4] {
        [Self::Dao, Self::Enterprise, Self::Consentida, Self::Aid]
    }

    /// Whether this kind can be created as a subidentity.
    pub fn is_creatable(&self) -> bool {
        !matches!(self, Self::Root)
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Dao => "DAO",
            Self::Enterprise => "Enterprise",
            Self::Consentida => "Consentida",
            Self::Aid => "AID",
        }
    }
}

impl std::fmt::Display for IdentityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Authority that controls an identity's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum GovernanceType {
    /// The identity governs itself
    #[serde(rename = "self")]
    SelfGoverned,
    /// A DAO governs the identity
    Dao,
    /// A parent or guardian governs the identity
    Parent,
}

/// Visibility tier of an identity's profile and activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    Public,
    DaoOnly,
    Private,
    Anonymous,
}

impl PrivacyLevel {
    /// All levels from most to least visible.
    pub fn all() -> [Self; 4] {
        [Self::Public, Self::DaoOnly, Self::Private, Self::Anonymous]
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::DaoOnly => "DAO only",
            Self::Private => "Private",
            Self::Anonymous => "Anonymous",
        }
    }
}

/// KYC verification state of an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    #[default]
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
}

impl KycStatus {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// The identity currently acting in the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ActiveIdentity {
    /// Identity ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Kind of identity
    pub identity_type: IdentityType,
    /// KYC verification state
    pub kyc_status: KycStatus,
}

impl ActiveIdentity {
    /// Create a root identity with the given KYC status.
    pub fn root(id: impl Into<String>, name: impl Into<String>, kyc_status: KycStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            identity_type: IdentityType::Root,
            kyc_status,
        }
    }

    /// Whether this identity may create subidentities at all.
    pub fn can_create_subidentities(&self) -> bool {
        self.identity_type.rule().can_create_subidentities
    }
}

/// Identity record returned by the creation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CreatedIdentity {
    /// Identity ID
    pub id: String,
    /// Decentralized identifier
    pub did: String,
    /// Display name
    pub name: String,
    /// Kind of identity
    pub identity_type: IdentityType,
    /// Parent identity, if any
    pub parent_id: Option<String>,
    /// Assigned privacy level
    pub privacy_level: PrivacyLevel,
    /// When the identity was created
    pub created_at: DateTime<Utc>,
}
