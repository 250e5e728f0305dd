//! sQuid identity model
//!
//! Types shared by everything that creates or displays subidentities:
//!
//! - **Identity types**: Root, DAO, Enterprise, Consentida and AID, each with an
//!   immutable [`TypeRule`] (governance, default visibility, KYC, nesting)
//! - **Governance records**: DAO links and parental consent
//! - **Privacy**: privacy levels and Qonsent profiles
//! - **Metadata**: the subidentity form record and partial patches over it
//! - **Collaborators**: [`DaoDirectory`] and [`ActiveIdentityProvider`]
//!
//! # Example
//!
//! ```
//! use squid_identity::{GovernanceType, IdentityType};
//!
//! let rule = IdentityType::Consentida.rule();
//! assert_eq!(rule.governed_by, GovernanceType::Parent);
//! assert!(!rule.kyc_required);
//! ```

pub mod directory;
pub mod governance;
pub mod metadata;
pub mod privacy;
pub mod provider;
pub mod rules;
pub mod types;

// Re-export main types
pub use directory::{DaoDirectory, DaoFilter, DaoInfo, DirectoryError, InMemoryDaoDirectory};
pub use governance::{DaoLink, GovernanceConfig, GuardianRelationship, ParentalConsent};
pub use metadata::{MetadataPatch, SubidentityMetadata};
pub use privacy::{DataSharingRule, QonsentConfig};
pub use provider::{ActiveIdentityProvider, StaticIdentityProvider};
pub use rules::TypeRule;
pub use types::*;
