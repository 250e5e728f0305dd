//! Callbacks into the application hosting the wizard.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use squid_identity::CreatedIdentity;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Visual style of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    #[default]
    Default,
    Success,
    Destructive,
}

/// Toast shown by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Success,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Host side of the wizard.
///
/// While the wizard reports `is_submitting()`, the host keeps navigation and
/// field controls disabled.
pub trait WizardHost: Send + Sync {
    /// Called once per successful submission.
    fn on_identity_created(&self, identity: &CreatedIdentity);

    /// The wizard should be closed.
    fn on_close(&self);

    /// Show a notification.
    fn notify(&self, notification: Notification);
}

/// A callback received by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    IdentityCreated(CreatedIdentity),
    Closed,
    Notified(Notification),
}

/// Host that records every callback, for tests and headless use.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: HostEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }

    /// All events in order.
    pub fn events(&self) -> Vec<HostEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn created(&self) -> Vec<CreatedIdentity> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::IdentityCreated(identity) => Some(identity),
                _ => None,
            })
            .collect()
    }

    pub fn close_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, HostEvent::Closed))
            .count()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::Notified(notification) => Some(notification),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl WizardHost for RecordingHost {
    fn on_identity_created(&self, identity: &CreatedIdentity) {
        self.push(HostEvent::IdentityCreated(identity.clone()));
    }

    fn on_close(&self) {
        self.push(HostEvent::Closed);
    }

    fn notify(&self, notification: Notification) {
        self.push(HostEvent::Notified(notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host() {
        let host = RecordingHost::new();
        host.notify(Notification::destructive("Error", "Name exists"));
        host.on_close();

        assert_eq!(host.events().len(), 2);
        assert_eq!(host.close_count(), 1);
        assert_eq!(
            host.notifications()[0].variant,
            NotificationVariant::Destructive
        );
        assert!(host.created().is_empty());

        host.clear();
        assert!(host.events().is_empty());
    }
}
