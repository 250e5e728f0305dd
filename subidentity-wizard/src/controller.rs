//! SubidentityWizard - the wizard controller.
//!
//! Owns the [`WizardState`], runs the step validators on forward transitions
//! and on submit, and drives the submission adapter and host callbacks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::{debug, error, info, warn};

use squid_identity::{
    ActiveIdentityProvider, CreatedIdentity, DaoDirectory, DaoFilter, DaoInfo, DaoLink,
    GovernanceConfig, IdentityType, MetadataPatch, PrivacyLevel, QonsentConfig,
    SubidentityMetadata,
};

use crate::adapter::{SubmissionAdapter, SubmissionResult};
use crate::audit::{SubmissionAuditLog, SubmissionOutcome};
use crate::config::WizardConfig;
use crate::errors::{fields, Result, ValidationErrors, WizardError};
use crate::host::{Notification, WizardHost};
use crate::state::{WizardStage, WizardState};
use crate::step::WizardStep;
use crate::validation::{StepValidator, ValidationContext};

const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred while creating the identity. Please try again.";

/// Result of [`SubidentityWizard::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Identity created; the wizard has been reset and closed
    Created(CreatedIdentity),
    /// Review validation failed; the adapter was not called
    Invalid(ValidationErrors),
    /// The service rejected the request
    Rejected {
        error: String,
        validation_errors: Vec<String>,
    },
    /// The adapter failed unexpectedly
    Failed(String),
}

/// Controller for the subidentity creation wizard.
///
/// All handles take `&self`; state sits behind an async lock so the host can
/// read `is_submitting()` while a submission is pending. Mutating calls made
/// during a submission fail with [`WizardError::SubmissionInProgress`].
pub struct SubidentityWizard {
    /// Configuration
    config: WizardConfig,
    /// Compiled step validators
    validator: StepValidator,
    /// Wizard state
    state: Arc<RwLock<WizardState>>,
    /// Creation service
    adapter: Arc<dyn SubmissionAdapter>,
    /// Host callbacks
    host: Arc<dyn WizardHost>,
    /// Acting identity
    identities: Arc<dyn ActiveIdentityProvider>,
    /// DAO lookup for the governance step
    directory: Option<Arc<dyn DaoDirectory>>,
    /// Submission audit log
    audit: Arc<SubmissionAuditLog>,
    /// Bumped on every reset so late submission results can tell the wizard was closed
    session: AtomicU64,
}

impl SubidentityWizard {
    /// Create a wizard with default configuration.
    pub fn new(
        adapter: Arc<dyn SubmissionAdapter>,
        host: Arc<dyn WizardHost>,
        identities: Arc<dyn ActiveIdentityProvider>,
    ) -> Result<Self> {
        let config = WizardConfig::default();
        Ok(Self {
            validator: StepValidator::new(&config)?,
            audit: Arc::new(SubmissionAuditLog::new(config.max_audit_entries)),
            config,
            state: Arc::new(RwLock::new(WizardState::default())),
            adapter,
            host,
            identities,
            directory: None,
            session: AtomicU64::new(0),
        })
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: WizardConfig) -> Result<Self> {
        self.validator = StepValidator::new(&config)?;
        self.audit = Arc::new(SubmissionAuditLog::new(config.max_audit_entries));
        self.config = config;
        Ok(self)
    }

    /// Set the DAO directory used by the governance step.
    pub fn with_directory(mut self, directory: Arc<dyn DaoDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn audit(&self) -> &SubmissionAuditLog {
        &self.audit
    }

    // ---- read-only views ----

    /// Copy of the whole state.
    pub async fn snapshot(&self) -> WizardState {
        self.state.read().await.clone()
    }

    pub async fn current_step(&self) -> WizardStep {
        self.state.read().await.current_step()
    }

    pub async fn is_submitting(&self) -> bool {
        self.state.read().await.is_submitting()
    }

    pub async fn selected_type(&self) -> Option<IdentityType> {
        self.state.read().await.selected_type
    }

    pub async fn metadata(&self) -> SubidentityMetadata {
        self.state.read().await.metadata.clone()
    }

    pub async fn validation_errors(&self) -> ValidationErrors {
        self.state.read().await.validation_errors.clone()
    }

    // ---- navigation ----

    /// Validate the current step and advance when it passes.
    ///
    /// Returns the step the wizard is on afterwards. At Review the step never
    /// changes, but errors are still refreshed.
    pub async fn go_to_next_step(&self) -> Result<WizardStep> {
        let mut state = self.state.write().await;
        ensure_idle(&state)?;

        let current = state.current_step();
        let context = self.context(&state);
        let errors = self.validator.validate(current, &context, &state.metadata);

        if !errors.is_empty() {
            debug!(step = ?current, fields = ?errors.fields().collect::<Vec<_>>(), "Staying on step");
            state.validation_errors = errors;
            return Ok(current);
        }

        state.validation_errors.clear();
        if let Some(next) = current.next() {
            state.stage = WizardStage::Navigating(next);
            debug!(from = ?current, to = ?next, "Advanced step");
        } else {
            state.clear_failure();
        }
        Ok(state.current_step())
    }

    /// Step back without validating. Metadata and errors are kept.
    pub async fn go_to_previous_step(&self) -> Result<WizardStep> {
        let mut state = self.state.write().await;
        ensure_idle(&state)?;

        let current = state.current_step();
        if let Some(previous) = current.previous() {
            state.stage = WizardStage::Navigating(previous);
            debug!(from = ?current, to = ?previous, "Went back");
        }
        Ok(state.current_step())
    }

    // ---- form data ----

    /// Choose the identity type.
    ///
    /// Pre-fills the privacy level with the type's default visibility when the
    /// user has not picked one yet.
    pub async fn select_type(&self, identity_type: IdentityType) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_idle(&state)?;

        state.clear_failure();
        state.selected_type = Some(identity_type);
        if state.metadata.privacy_level.is_none() {
            state.metadata.privacy_level = Some(identity_type.rule().visibility);
        }
        debug!(identity_type = ?identity_type, "Selected identity type");
        Ok(())
    }

    /// Shallow-merge a patch into the metadata. Does not validate.
    pub async fn update_metadata(&self, patch: MetadataPatch) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_idle(&state)?;

        state.clear_failure();
        state.metadata.apply(patch);
        Ok(())
    }

    /// Search the DAO directory.
    pub async fn search_daos(&self, filter: &DaoFilter) -> Result<Vec<DaoInfo>> {
        let directory = self.directory.as_ref().ok_or(WizardError::NoDirectory)?;
        Ok(directory.list_daos(filter).await?)
    }

    /// Link a DAO as the governing body.
    pub async fn select_dao(&self, dao: &DaoInfo) -> Result<()> {
        let config = GovernanceConfig::Dao(DaoLink {
            dao_id: dao.id.clone(),
            dao_name: Some(dao.name.clone()),
        });
        self.update_metadata(MetadataPatch::new().governance(config)).await
    }

    /// Set the privacy level, creating a default Qonsent profile if none exists.
    pub async fn apply_privacy_level(&self, level: PrivacyLevel) -> Result<()> {
        let mut state = self.state.write().await;
        ensure_idle(&state)?;

        state.clear_failure();
        state.metadata.privacy_level = Some(level);
        if state.metadata.qonsent_config.is_none() {
            state.metadata.qonsent_config = Some(QonsentConfig::for_privacy_level(level));
        }
        Ok(())
    }

    // ---- lifecycle ----

    /// Validate everything and hand the record to the submission adapter.
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        let (identity_type, metadata, session) = {
            let mut state = self.state.write().await;
            ensure_idle(&state)?;

            let step = state.current_step();
            if step != WizardStep::Review {
                return Err(WizardError::NotAtReview(step));
            }

            let context = self.context(&state);
            let errors = self
                .validator
                .validate(WizardStep::Review, &context, &state.metadata);

            if !errors.is_empty() {
                state.validation_errors = errors.clone();
                drop(state);
                return Ok(self.reject_invalid(errors).await);
            }

            let identity_type = state.selected_type.ok_or(WizardError::NoTypeSelected)?;
            state.validation_errors.clear();
            state.stage = WizardStage::Submitting;
            (
                identity_type,
                state.metadata.clone(),
                self.session.load(Ordering::SeqCst),
            )
        };

        let request_id = if self.config.audit_enabled {
            Some(self.audit.log_attempt(Some(identity_type), &metadata.name).await)
        } else {
            None
        };

        info!(
            request_id = ?request_id,
            identity_type = ?identity_type,
            "Submitting subidentity"
        );

        let result = self.adapter.submit(identity_type, &metadata).await;

        let (outcome, audit_outcome) = match result {
            Ok(SubmissionResult::Created { identity }) => {
                info!(
                    request_id = ?request_id,
                    identity_id = %identity.id,
                    "Subidentity created"
                );

                self.host.on_identity_created(&identity);
                self.host.notify(Notification::success(
                    "Identity Created",
                    format!("{} has been created successfully.", identity.name),
                ));
                if self.reset_session(session).await {
                    self.host.on_close();
                } else {
                    warn!(request_id = ?request_id, "Wizard was closed while submitting");
                }

                let audit_outcome = SubmissionOutcome::Created {
                    identity_id: identity.id.clone(),
                };
                (SubmitOutcome::Created(identity), audit_outcome)
            }
            Ok(SubmissionResult::Rejected {
                error,
                validation_errors,
            }) => {
                warn!(request_id = ?request_id, error = %error, "Submission rejected");

                if let Some(mut state) = self.session_state(session).await {
                    state.stage = WizardStage::Failed(error.clone());
                    for message in &validation_errors {
                        state.validation_errors.add(fields::GENERAL, message.clone());
                    }
                }
                self.host
                    .notify(Notification::destructive("Creation Failed", error.clone()));

                let audit_outcome = SubmissionOutcome::Rejected {
                    error: error.clone(),
                };
                (
                    SubmitOutcome::Rejected {
                        error,
                        validation_errors,
                    },
                    audit_outcome,
                )
            }
            Err(err) => {
                error!(request_id = ?request_id, error = %err, "Unexpected submission failure");

                if let Some(mut state) = self.session_state(session).await {
                    state.stage = WizardStage::Failed(UNEXPECTED_ERROR_MESSAGE.to_string());
                }
                self.host.notify(Notification::destructive(
                    "Unexpected Error",
                    UNEXPECTED_ERROR_MESSAGE,
                ));

                let message = err.to_string();
                let audit_outcome = SubmissionOutcome::Failed {
                    error: message.clone(),
                };
                (SubmitOutcome::Failed(message), audit_outcome)
            }
        };

        if let Some(request_id) = request_id {
            self.audit.log_outcome(&request_id, audit_outcome).await;
        }

        Ok(outcome)
    }

    /// Reset and close, whatever the current state.
    pub async fn close(&self) {
        self.reset().await;
        debug!("Wizard closed");
        self.host.on_close();
    }

    async fn reset(&self) {
        let mut state = self.state.write().await;
        self.session.fetch_add(1, Ordering::SeqCst);
        state.reset();
    }

    /// Reset only if no other reset happened since `session` was read.
    async fn reset_session(&self, session: u64) -> bool {
        let mut state = self.state.write().await;
        if self
            .session
            .compare_exchange(session, session + 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }
        state.reset();
        true
    }

    /// Write access to the state, unless the wizard was reset since `session`.
    async fn session_state(&self, session: u64) -> Option<RwLockWriteGuard<'_, WizardState>> {
        let state = self.state.write().await;
        if self.session.load(Ordering::SeqCst) != session {
            warn!("Wizard was closed while submitting");
            return None;
        }
        Some(state)
    }

    async fn reject_invalid(&self, errors: ValidationErrors) -> SubmitOutcome {
        warn!(fields = ?errors.fields().collect::<Vec<_>>(), "Submission blocked by validation");

        self.host.notify(Notification::destructive(
            "Validation Error",
            errors
                .first_message()
                .unwrap_or("Please fix the errors before submitting."),
        ));

        if self.config.audit_enabled {
            let state = self.state.read().await;
            let request_id = self
                .audit
                .log_attempt(state.selected_type, &state.metadata.name)
                .await;
            drop(state);
            self.audit
                .log_outcome(
                    &request_id,
                    SubmissionOutcome::Invalid {
                        fields: errors.fields().map(String::from).collect(),
                    },
                )
                .await;
        }

        SubmitOutcome::Invalid(errors)
    }

    fn context(&self, state: &WizardState) -> ValidationContext {
        ValidationContext::new(state.selected_type, self.identities.active_identity())
    }
}

fn ensure_idle(state: &WizardState) -> Result<()> {
    if state.is_submitting() {
        warn!("Rejected wizard operation during submission");
        return Err(WizardError::SubmissionInProgress);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MockSubmissionAdapter;
    use crate::host::RecordingHost;
    use squid_identity::{ActiveIdentity, KycStatus, StaticIdentityProvider};

    fn wizard(adapter: MockSubmissionAdapter) -> (SubidentityWizard, Arc<RecordingHost>) {
        let host = Arc::new(RecordingHost::new());
        let identities = Arc::new(StaticIdentityProvider::new(ActiveIdentity::root(
            "root-1",
            "Alice",
            KycStatus::Approved,
        )));
        let wizard = SubidentityWizard::new(Arc::new(adapter), host.clone(), identities).unwrap();
        (wizard, host)
    }

    #[tokio::test]
    async fn test_type_required_to_advance() {
        let (wizard, _) = wizard(MockSubmissionAdapter::new());

        assert_eq!(wizard.go_to_next_step().await.unwrap(), WizardStep::TypeSelection);
        assert!(wizard.validation_errors().await.contains(fields::TYPE));

        wizard.select_type(IdentityType::Aid).await.unwrap();
        assert_eq!(wizard.go_to_next_step().await.unwrap(), WizardStep::BasicInfo);
        assert!(wizard.validation_errors().await.is_empty());
    }

    #[tokio::test]
    async fn test_select_type_prefills_privacy() {
        let (wizard, _) = wizard(MockSubmissionAdapter::new());
        wizard.select_type(IdentityType::Consentida).await.unwrap();
        assert_eq!(wizard.metadata().await.privacy_level, Some(PrivacyLevel::Private));

        // An explicit choice is kept
        wizard.select_type(IdentityType::Dao).await.unwrap();
        assert_eq!(wizard.metadata().await.privacy_level, Some(PrivacyLevel::Private));
    }

    #[tokio::test]
    async fn test_submit_only_from_review() {
        let (wizard, _) = wizard(MockSubmissionAdapter::new());
        assert!(matches!(
            wizard.submit().await,
            Err(WizardError::NotAtReview(WizardStep::TypeSelection))
        ));
    }

    #[tokio::test]
    async fn test_search_without_directory() {
        let (wizard, _) = wizard(MockSubmissionAdapter::new());
        assert!(matches!(
            wizard.search_daos(&DaoFilter::default()).await,
            Err(WizardError::NoDirectory)
        ));
    }

    #[tokio::test]
    async fn test_apply_privacy_level_keeps_existing_profile() {
        let (wizard, _) = wizard(MockSubmissionAdapter::new());
        wizard.apply_privacy_level(PrivacyLevel::Public).await.unwrap();
        let first = wizard.metadata().await.qonsent_config.unwrap();

        wizard.apply_privacy_level(PrivacyLevel::Anonymous).await.unwrap();
        let metadata = wizard.metadata().await;
        assert_eq!(metadata.privacy_level, Some(PrivacyLevel::Anonymous));
        assert_eq!(metadata.qonsent_config.unwrap().profile_id, first.profile_id);
    }

    #[tokio::test]
    async fn test_stale_session_does_not_reset() {
        let (wizard, _) = wizard(MockSubmissionAdapter::new());
        let session = wizard.session.load(Ordering::SeqCst);

        wizard.close().await;
        wizard.select_type(IdentityType::Aid).await.unwrap();

        assert!(!wizard.reset_session(session).await);
        assert!(wizard.session_state(session).await.is_none());
        assert_eq!(wizard.selected_type().await, Some(IdentityType::Aid));

        let current = wizard.session.load(Ordering::SeqCst);
        assert!(wizard.reset_session(current).await);
        assert_eq!(wizard.snapshot().await, WizardState::default());
        assert!(!wizard.reset_session(current).await);
    }

    #[tokio::test]
    async fn test_close_resets() {
        let (wizard, host) = wizard(MockSubmissionAdapter::new());
        wizard.select_type(IdentityType::Aid).await.unwrap();
        wizard.update_metadata(MetadataPatch::new().name("Shadow")).await.unwrap();
        wizard.go_to_next_step().await.unwrap();

        wizard.close().await;

        assert_eq!(wizard.snapshot().await, WizardState::default());
        assert_eq!(host.close_count(), 1);
    }
}
