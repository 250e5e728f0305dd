//! Governance step, resolved from the selected type's rule.

use regex::Regex;

use squid_identity::{GovernanceType, ParentalConsent, SubidentityMetadata};

use super::ValidationContext;
use crate::errors::{fields, ValidationErrors};

pub(super) fn validate(
    context: &ValidationContext,
    email_pattern: &Regex,
    metadata: &SubidentityMetadata,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    // Without a type there is no rule; type selection reports that.
    let Some(identity_type) = context.selected_type else {
        return errors;
    };

    match identity_type.rule().governed_by {
        GovernanceType::SelfGoverned => {}
        GovernanceType::Dao => {
            let linked = metadata
                .governance_config
                .as_ref()
                .and_then(|config| config.as_dao())
                .map(|link| !link.dao_id.trim().is_empty())
                .unwrap_or(false);
            if !linked {
                errors.add(
                    fields::GOVERNANCE,
                    "DAO selection is required for DAO-governed identities",
                );
            }
        }
        GovernanceType::Parent => {
            match metadata
                .governance_config
                .as_ref()
                .and_then(|config| config.as_parental_consent())
            {
                Some(consent) => check_consent(consent, email_pattern, &mut errors),
                None => errors.add(
                    fields::GOVERNANCE,
                    "Parental consent information is required",
                ),
            }
        }
    }

    errors
}

fn check_consent(consent: &ParentalConsent, email_pattern: &Regex, errors: &mut ValidationErrors) {
    if consent.guardian_name.trim().is_empty() {
        errors.add(fields::GOVERNANCE, "Guardian name is required");
    }

    let email = consent.guardian_email.trim();
    if email.is_empty() {
        errors.add(fields::GOVERNANCE, "Guardian email is required");
    } else if !email_pattern.is_match(email) {
        errors.add(fields::GOVERNANCE, "Guardian email must be a valid email address");
    }

    if consent.relationship.is_none() {
        errors.add(fields::GOVERNANCE, "Guardian relationship is required");
    }

    if !consent.is_collected() {
        if consent.is_requested() {
            errors.add(
                fields::GOVERNANCE,
                "Parental consent was requested but has not been collected yet",
            );
        } else {
            errors.add(
                fields::GOVERNANCE,
                "Parental consent must be collected before continuing",
            );
        }
    }
}
