//! Error types for the wizard.
//!
//! Field validation problems are data ([`ValidationErrors`]) shown next to the
//! form; [`WizardError`] covers operations the controller refuses to perform.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field keys used in [`ValidationErrors`].
pub mod fields {
    pub const TYPE: &str = "type";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const TAGS: &str = "tags";
    pub const GOVERNANCE: &str = "governance";
    pub const PRIVACY_LEVEL: &str = "privacy_level";
    pub const QONSENT: &str = "qonsent";
    pub const KYC: &str = "kyc";
    pub const GENERAL: &str = "general";
}

/// Messages keyed by field. Empty means the step passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// Append messages from another set, keeping per-field order.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// First message of the first field, for summaries.
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().flatten().next().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Error types for wizard operations.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A submission is in flight
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// Submission is only possible from the review step
    #[error("Cannot submit from step {0:?}; review first")]
    NotAtReview(crate::step::WizardStep),

    /// Operation needs a selected identity type
    #[error("No identity type selected")]
    NoTypeSelected,

    /// No DAO directory was configured
    #[error("No DAO directory configured")]
    NoDirectory,

    /// DAO directory failed
    #[error("Directory error: {0}")]
    Directory(#[from] squid_identity::DirectoryError),
}

impl From<regex::Error> for WizardError {
    fn from(err: regex::Error) -> Self {
        Self::Config(format!("invalid pattern: {}", err))
    }
}

/// Result type for wizard operations.
pub type Result<T> = std::result::Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_order() {
        let mut errors = ValidationErrors::new();
        errors.add(fields::GOVERNANCE, "first");
        errors.add(fields::GOVERNANCE, "second");
        assert_eq!(
            errors.get(fields::GOVERNANCE),
            Some(&["first".to_string(), "second".to_string()][..])
        );
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationErrors::new();
        a.add(fields::NAME, "name");
        let mut b = ValidationErrors::new();
        b.add(fields::NAME, "again");
        b.add(fields::KYC, "kyc");

        a.merge(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.get(fields::NAME).map(|m| m.len()), Some(2));
        assert!(a.contains(fields::KYC));
    }

    #[test]
    fn test_serializes_as_map() {
        let mut errors = ValidationErrors::new();
        errors.add(fields::TYPE, "Identity type is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["type"][0], "Identity type is required");
    }
}
