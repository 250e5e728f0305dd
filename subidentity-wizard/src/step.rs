//! Wizard steps in navigation order.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// The five wizard steps. Order is navigation order; no step is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    TypeSelection,
    BasicInfo,
    Governance,
    Privacy,
    Review,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [Self; 5] = [
        Self::TypeSelection,
        Self::BasicInfo,
        Self::Governance,
        Self::Privacy,
        Self::Review,
    ];

    pub fn first() -> Self {
        Self::TypeSelection
    }

    pub fn last() -> Self {
        Self::Review
    }

    /// Zero-based position.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The following step, `None` at Review.
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The preceding step, `None` at TypeSelection.
    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Steps before this one.
    pub fn preceding(&self) -> &'static [Self] {
        &Self::ALL[..self.index()]
    }

    /// Heading shown by the step renderer.
    pub fn title(&self) -> &'static str {
        match self {
            Self::TypeSelection => "Select Identity Type",
            Self::BasicInfo => "Basic Information",
            Self::Governance => "Governance Setup",
            Self::Privacy => "Privacy Configuration",
            Self::Review => "Review & Confirm",
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::first()
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert_eq!(WizardStep::TypeSelection.next(), Some(WizardStep::BasicInfo));
        assert_eq!(WizardStep::Privacy.next(), Some(WizardStep::Review));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::TypeSelection.previous(), None);
        assert_eq!(WizardStep::Review.previous(), Some(WizardStep::Privacy));
    }

    #[test]
    fn test_preceding() {
        assert!(WizardStep::TypeSelection.preceding().is_empty());
        assert_eq!(
            WizardStep::Review.preceding(),
            &[
                WizardStep::TypeSelection,
                WizardStep::BasicInfo,
                WizardStep::Governance,
                WizardStep::Privacy,
            ]
        );
    }
}
