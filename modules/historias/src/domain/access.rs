//! Session-and-role resolution gate.
//!
//! Two distinct policies guard protected functionality. The standard gate
//! denies without side effects and lazily creates a profile for a
//! first-seen principal. The elevated gate (the admin dashboard) performs
//! no lazy creation and revokes the session outright when the caller is
//! not an admin. Every failure path collapses to `Denied`.

use std::sync::Arc;

use docstore::SessionStore;
use tracing::{instrument, warn};

use crate::contract::model::{Profile, Role};
use crate::domain::profiles::ProfileService;

/// Verdict of one resolution. `Pending` is the pre-settlement state a
/// caller holds while a resolution is in flight; both resolve operations
/// settle to `Allowed` or `Denied` and never return `Pending`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessState {
    Pending,
    Allowed(Profile),
    Denied,
}

impl AccessState {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessState::Allowed(_))
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            AccessState::Allowed(profile) => Some(profile),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AccessResolver {
    sessions: Arc<dyn SessionStore>,
    profiles: ProfileService,
}

impl AccessResolver {
    pub fn new(sessions: Arc<dyn SessionStore>, profiles: ProfileService) -> Self {
        Self { sessions, profiles }
    }

    /// Standard gate. With `required = None` any resolvable profile is
    /// allowed; otherwise the resolved role must be in the required set.
    /// A first-seen principal gets a `user` profile as part of
    /// resolution.
    #[instrument(name = "historias.access.resolve", skip(self, required))]
    pub async fn resolve(&self, required: Option<&[Role]>) -> AccessState {
        let principal = match self.sessions.current_principal().await {
            Ok(Some(principal)) => principal,
            Ok(None) => return AccessState::Denied,
            Err(e) => {
                warn!(error = %e, "session lookup failed; denying");
                return AccessState::Denied;
            }
        };

        let profile = match self.profiles.ensure_profile(&principal).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "profile resolution failed; denying");
                return AccessState::Denied;
            }
        };

        match required {
            None => AccessState::Allowed(profile),
            Some(roles) if roles.contains(&profile.role) => AccessState::Allowed(profile),
            Some(_) => AccessState::Denied,
        }
    }

    /// Elevated gate for the admin dashboard: lookup only, no lazy
    /// creation. A principal without an admin profile is logged out, not
    /// merely refused.
    #[instrument(name = "historias.access.resolve_elevated", skip(self))]
    pub async fn resolve_elevated(&self) -> AccessState {
        let principal = match self.sessions.current_principal().await {
            Ok(Some(principal)) => principal,
            Ok(None) => return AccessState::Denied,
            Err(e) => {
                warn!(error = %e, "session lookup failed; denying");
                return AccessState::Denied;
            }
        };

        let profile = match self.profiles.lookup_profile(&principal.id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                self.revoke_session().await;
                return AccessState::Denied;
            }
            Err(e) => {
                warn!(error = %e, "profile lookup failed; denying");
                return AccessState::Denied;
            }
        };

        if profile.role == Role::Admin {
            AccessState::Allowed(profile)
        } else {
            self.revoke_session().await;
            AccessState::Denied
        }
    }

    /// Best-effort revocation; the verdict is Denied either way.
    async fn revoke_session(&self) {
        if let Err(e) = self.sessions.end_session().await {
            warn!(error = %e, "session revocation failed");
        }
    }
}
