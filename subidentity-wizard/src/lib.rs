//! Subidentity Creation Wizard
//!
//! The headless core of the sQuid subidentity wizard: five ordered steps,
//! each validated before the user may advance, ending in a submission to an
//! injected creation service.
//!
//! - Step validators are pure functions of the metadata and selected type
//! - The controller owns all state; renderers only read it and send patches
//! - Creation, notifications and the acting identity are injected traits
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           SubidentityWizard             │
//! │  (owns WizardState, handles user input) │
//! └────────────────────┬────────────────────┘
//!                      │
//!      ┌───────────────┼───────────────┐
//!      ▼               ▼               ▼
//! ┌──────────┐  ┌─────────────┐  ┌────────────┐
//! │   Step   │  │ Submission  │  │ WizardHost │
//! │ Validator│  │  Adapter    │  │ (toasts,   │
//! │          │  │             │  │  close)    │
//! └──────────┘  └─────────────┘  └────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! let wizard = SubidentityWizard::new(adapter, host, identities)?;
//! wizard.select_type(IdentityType::Dao).await?;
//! wizard.go_to_next_step().await?;
//! wizard.update_metadata(MetadataPatch::new().name("Builders Guild")).await?;
//! ```

pub mod adapter;
pub mod audit;
pub mod config;
pub mod controller;
pub mod errors;
pub mod host;
pub mod state;
pub mod step;
pub mod validation;

// Re-export main types
pub use adapter::{AdapterError, MockOutcome, MockSubmissionAdapter, SubmissionAdapter, SubmissionResult};
pub use audit::{AuditEntry, SubmissionAuditLog, SubmissionOutcome};
pub use config::{ValidationLimits, WizardConfig};
pub use controller::{SubidentityWizard, SubmitOutcome};
pub use errors::{fields, Result, ValidationErrors, WizardError};
pub use host::{HostEvent, Notification, NotificationVariant, RecordingHost, WizardHost};
pub use state::{WizardStage, WizardState};
pub use step::WizardStep;
pub use validation::{StepValidator, ValidationContext};
