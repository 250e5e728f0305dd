//! Wizard state owned by the controller.

use serde::{Deserialize, Serialize};

use squid_identity::{IdentityType, SubidentityMetadata};

use crate::errors::ValidationErrors;
use crate::step::WizardStep;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Where the wizard is in its lifecycle.
///
/// Submitting and failed submissions both sit at Review; navigating while
/// submitting has no representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "stage", content = "detail", rename_all = "snake_case")]
pub enum WizardStage {
    /// Editing a step
    Navigating(WizardStep),
    /// Waiting on the submission adapter
    Submitting,
    /// Last submission failed; still at Review
    Failed(String),
}

impl WizardStage {
    /// The step shown to the user.
    pub fn step(&self) -> WizardStep {
        match self {
            Self::Navigating(step) => *step,
            Self::Submitting | Self::Failed(_) => WizardStep::Review,
        }
    }
}

impl Default for WizardStage {
    fn default() -> Self {
        Self::Navigating(WizardStep::first())
    }
}

/// Complete wizard state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct WizardState {
    pub stage: WizardStage,
    pub selected_type: Option<IdentityType>,
    pub metadata: SubidentityMetadata,
    #[cfg_attr(feature = "typescript", ts(type = "Record<string, Array<string>>"))]
    pub validation_errors: ValidationErrors,
}

impl WizardState {
    pub fn current_step(&self) -> WizardStep {
        self.stage.step()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.stage, WizardStage::Submitting)
    }

    /// Message of the last failed submission, if the wizard is in that state.
    pub fn failure(&self) -> Option<&str> {
        match &self.stage {
            WizardStage::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Drop a failed-submission marker, staying at Review.
    pub fn clear_failure(&mut self) {
        if let WizardStage::Failed(_) = self.stage {
            self.stage = WizardStage::Navigating(WizardStep::Review);
        }
    }

    /// Back to a fresh wizard.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
