//! Step validators.
//!
//! Each step has a pure validator producing [`ValidationErrors`] from the
//! accumulated metadata and a [`ValidationContext`]:
//!
//! - **Type selection**: a creatable type is chosen by an identity allowed to nest
//! - **Basic info**: name, description and tag limits
//! - **Governance**: DAO link or parental consent, per the type's rule
//! - **Privacy**: privacy level and a complete Qonsent profile
//! - **Review**: every step above again, plus the KYC requirement

mod basic_info;
mod governance;
mod privacy;
mod review;
mod type_selection;

use regex::Regex;
use tracing::debug;

use squid_identity::{ActiveIdentity, IdentityType, SubidentityMetadata};

use crate::config::{ValidationLimits, WizardConfig};
use crate::errors::{Result, ValidationErrors, WizardError};
use crate::step::WizardStep;

/// Inputs besides the metadata that validation depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Type chosen at the first step
    pub selected_type: Option<IdentityType>,
    /// Identity creating the subidentity
    pub actor: Option<ActiveIdentity>,
}

impl ValidationContext {
    pub fn new(selected_type: Option<IdentityType>, actor: Option<ActiveIdentity>) -> Self {
        Self {
            selected_type,
            actor,
        }
    }

    /// Whether the acting identity has approved KYC. No actor means not approved.
    pub fn kyc_approved(&self) -> bool {
        self.actor
            .as_ref()
            .map(|actor| actor.kyc_status.is_approved())
            .unwrap_or(false)
    }
}

/// Validates wizard steps with compiled patterns.
#[derive(Debug, Clone)]
pub struct StepValidator {
    limits: ValidationLimits,
    name_pattern: Regex,
    email_pattern: Regex,
    kyc_gates_governance: bool,
}

impl StepValidator {
    /// Build from configuration. Fails on invalid patterns or limits.
    pub fn new(config: &WizardConfig) -> Result<Self> {
        let limits = config.limits.clone();
        if limits.name_min > limits.name_max {
            return Err(WizardError::Config(format!(
                "name_min ({}) exceeds name_max ({})",
                limits.name_min, limits.name_max
            )));
        }

        Ok(Self {
            name_pattern: Regex::new(&limits.name_pattern)?,
            email_pattern: Regex::new(&limits.email_pattern)?,
            limits,
            kyc_gates_governance: config.kyc_gates_governance,
        })
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validate one step.
    pub fn validate(
        &self,
        step: WizardStep,
        context: &ValidationContext,
        metadata: &SubidentityMetadata,
    ) -> ValidationErrors {
        let errors = match step {
            WizardStep::TypeSelection => type_selection::validate(context),
            WizardStep::BasicInfo => basic_info::validate(&self.limits, &self.name_pattern, metadata),
            WizardStep::Governance => {
                let mut errors = governance::validate(context, &self.email_pattern, metadata);
                if self.kyc_gates_governance {
                    errors.merge(review::kyc_errors(context));
                }
                errors
            }
            WizardStep::Privacy => privacy::validate(metadata),
            WizardStep::Review => review::validate(self, context, metadata),
        };

        if !errors.is_empty() {
            debug!(step = ?step, fields = errors.len(), "Step validation failed");
        }
        errors
    }
}
