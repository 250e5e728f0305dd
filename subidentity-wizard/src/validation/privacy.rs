//! Privacy step.

use squid_identity::SubidentityMetadata;

use crate::errors::{fields, ValidationErrors};

pub(super) fn validate(metadata: &SubidentityMetadata) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if metadata.privacy_level.is_none() {
        errors.add(fields::PRIVACY_LEVEL, "Privacy level is required");
    }

    match &metadata.qonsent_config {
        None => errors.add(fields::QONSENT, "Qonsent profile is required"),
        Some(config) => {
            if config.profile_id.trim().is_empty() {
                errors.add(fields::QONSENT, "Qonsent profile ID is required");
            }
            if config.data_sharing.is_empty() {
                errors.add(fields::QONSENT, "Data sharing rules are required");
            }
            if config.visibility_rules.is_empty() {
                errors.add(fields::QONSENT, "Visibility rules are required");
            }
        }
    }

    errors
}
