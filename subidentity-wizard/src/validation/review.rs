//! Review step: re-runs every earlier step and adds the KYC requirement.
//!
//! Reaching Review does not prove the earlier steps still hold, so the final
//! check goes through the same per-step validators instead of a separate rule set.

use squid_identity::SubidentityMetadata;

use super::{StepValidator, ValidationContext};
use crate::errors::{fields, ValidationErrors};
use crate::step::WizardStep;

pub(super) fn validate(
    validator: &StepValidator,
    context: &ValidationContext,
    metadata: &SubidentityMetadata,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for step in WizardStep::Review.preceding() {
        errors.merge(validator.validate(*step, context, metadata));
    }

    // Governance may already have added it when KYC gates that step.
    if !errors.contains(fields::KYC) {
        errors.merge(kyc_errors(context));
    }

    errors
}

/// KYC error for types that need it when the actor is not approved.
pub(super) fn kyc_errors(context: &ValidationContext) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(identity_type) = context.selected_type {
        if identity_type.rule().kyc_required && !context.kyc_approved() {
            errors.add(
                fields::KYC,
                format!("KYC verification is required to create {} identities", identity_type),
            );
        }
    }

    errors
}
