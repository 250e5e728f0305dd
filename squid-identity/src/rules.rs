//! Per-type governance and visibility rules.

use serde::{Deserialize, Serialize};

use crate::types::{GovernanceType, IdentityType, PrivacyLevel};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Immutable rule set attached to each identity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct TypeRule {
    /// Who controls the identity
    pub governed_by: GovernanceType,
    /// Default visibility tier
    pub visibility: PrivacyLevel,
    /// Whether the creator must have approved KYC
    pub kyc_required: bool,
    /// Whether identities of this type may create their own subidentities
    pub can_create_subidentities: bool,
}

const ROOT_RULE: TypeRule = TypeRule {
    governed_by: GovernanceType::SelfGoverned,
    visibility: PrivacyLevel::Public,
    kyc_required: false,
    can_create_subidentities: true,
};

const DAO_RULE: TypeRule = TypeRule {
    governed_by: GovernanceType::Dao,
    visibility: PrivacyLevel::Public,
    kyc_required: true,
    can_create_subidentities: true,
};

const ENTERPRISE_RULE: TypeRule = TypeRule {
    governed_by: GovernanceType::Dao,
    visibility: PrivacyLevel::Public,
    kyc_required: true,
    can_create_subidentities: false,
};

const CONSENTIDA_RULE: TypeRule = TypeRule {
    governed_by: GovernanceType::Parent,
    visibility: PrivacyLevel::Private,
    kyc_required: false,
    can_create_subidentities: false,
};

const AID_RULE: TypeRule = TypeRule {
    governed_by: GovernanceType::SelfGoverned,
    visibility: PrivacyLevel::Anonymous,
    kyc_required: true,
    can_create_subidentities: false,
};

impl IdentityType {
    /// The rule set for this type.
    pub fn rule(&self) -> &'static TypeRule {
        match self {
            Self::Root => &ROOT_RULE,
            Self::Dao => &DAO_RULE,
            Self::Enterprise => &ENTERPRISE_RULE,
            Self::Consentida => &CONSENTIDA_RULE,
            Self::Aid => &AID_RULE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governance_by_type() {
        assert_eq!(IdentityType::Dao.rule().governed_by, GovernanceType::Dao);
        assert_eq!(IdentityType::Enterprise.rule().governed_by, GovernanceType::Dao);
        assert_eq!(IdentityType::Consentida.rule().governed_by, GovernanceType::Parent);
        assert_eq!(IdentityType::Aid.rule().governed_by, GovernanceType::SelfGoverned);
    }

    #[test]
    fn test_kyc_and_nesting() {
        assert!(IdentityType::Dao.rule().kyc_required);
        assert!(!IdentityType::Consentida.rule().kyc_required);
        assert!(IdentityType::Root.rule().can_create_subidentities);
        assert!(!IdentityType::Aid.rule().can_create_subidentities);
        assert_eq!(IdentityType::Aid.rule().visibility, PrivacyLevel::Anonymous);
    }
}
