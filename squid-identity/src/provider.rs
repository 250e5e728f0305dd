//! Access to the identity acting in the host application.

use std::sync::RwLock;

use crate::types::{ActiveIdentity, KycStatus};

/// Read-only source of the active identity.
pub trait ActiveIdentityProvider: Send + Sync {
    /// The acting identity, if one is signed in.
    fn active_identity(&self) -> Option<ActiveIdentity>;
}

/// Provider holding a single identity that tests or hosts can swap.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    identity: RwLock<Option<ActiveIdentity>>,
}

impl StaticIdentityProvider {
    pub fn new(identity: ActiveIdentity) -> Self {
        Self {
            identity: RwLock::new(Some(identity)),
        }
    }

    /// Provider with no signed-in identity.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Replace the active identity.
    pub fn set(&self, identity: Option<ActiveIdentity>) {
        match self.identity.write() {
            Ok(mut guard) => *guard = identity,
            Err(poisoned) => *poisoned.into_inner() = identity,
        }
    }

    /// Update the KYC status of the active identity, if any.
    pub fn set_kyc_status(&self, status: KycStatus) {
        let mut guard = match self.identity.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(identity) = guard.as_mut() {
            identity.kyc_status = status;
        }
    }
}

impl ActiveIdentityProvider for StaticIdentityProvider {
    fn active_identity(&self) -> Option<ActiveIdentity> {
        match self.identity.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider() {
        let provider = StaticIdentityProvider::new(ActiveIdentity::root(
            "root-1",
            "Alice",
            KycStatus::Pending,
        ));
        assert_eq!(
            provider.active_identity().map(|i| i.kyc_status),
            Some(KycStatus::Pending)
        );

        provider.set_kyc_status(KycStatus::Approved);
        assert!(provider.active_identity().unwrap().kyc_status.is_approved());

        provider.set(None);
        assert!(provider.active_identity().is_none());
    }

    #[test]
    fn test_signed_out() {
        assert!(StaticIdentityProvider::signed_out().active_identity().is_none());
    }
}
