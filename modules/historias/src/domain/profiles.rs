use std::sync::Arc;

use docstore::Principal;
use tracing::{debug, info, instrument};

use crate::contract::model::{NewProfile, Profile, Role};
use crate::domain::error::DomainError;
use crate::domain::repo::ProfilesRepository;

/// Domain service for profile management. Depends only on the repository
/// port, not on infra types.
#[derive(Clone)]
pub struct ProfileService {
    repo: Arc<dyn ProfilesRepository>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfilesRepository>) -> Self {
        Self { repo }
    }

    /// Pure read: the profile bound to a principal, if any.
    #[instrument(name = "historias.profiles.lookup", skip(self))]
    pub async fn lookup_profile(
        &self,
        principal_id: &str,
    ) -> Result<Option<Profile>, DomainError> {
        self.repo
            .find_by_principal(principal_id)
            .await
            .map_err(|e| DomainError::store(e.to_string()))
    }

    /// Idempotent create-if-absent. A principal seen for the first time
    /// gets a profile with the default `user` role. Two contexts racing
    /// here both observe "no profile"; the store's uniqueness constraint
    /// on `principal_id` resolves that race, not this method.
    #[instrument(name = "historias.profiles.ensure", skip(self, principal), fields(principal_id = %principal.id))]
    pub async fn ensure_profile(&self, principal: &Principal) -> Result<Profile, DomainError> {
        if let Some(existing) = self.lookup_profile(&principal.id).await? {
            return Ok(existing);
        }

        let full_name = if principal.name.trim().is_empty() {
            principal.email.clone()
        } else {
            principal.name.clone()
        };

        info!("creating profile for first-seen principal");
        self.repo
            .insert(NewProfile {
                principal_id: principal.id.clone(),
                full_name,
                role: Role::User,
            })
            .await
            .map_err(|e| DomainError::store(e.to_string()))
    }

    /// Flip a profile between `user` and `admin`.
    #[instrument(name = "historias.profiles.toggle_role", skip(self))]
    pub async fn toggle_role(&self, profile_id: &str) -> Result<Profile, DomainError> {
        let profile = self
            .repo
            .find_by_id(profile_id)
            .await
            .map_err(|e| DomainError::store(e.to_string()))?
            .ok_or_else(|| DomainError::profile_not_found(profile_id))?;

        let next = profile.role.toggled();
        debug!(from = profile.role.as_str(), to = next.as_str(), "toggling role");
        self.repo
            .set_role(profile_id, next)
            .await
            .map_err(|e| DomainError::store(e.to_string()))
    }

    #[instrument(name = "historias.profiles.delete", skip(self))]
    pub async fn delete_profile(&self, profile_id: &str) -> Result<(), DomainError> {
        let deleted = self
            .repo
            .delete(profile_id)
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;
        if !deleted {
            return Err(DomainError::profile_not_found(profile_id));
        }
        info!("profile deleted");
        Ok(())
    }

    #[instrument(name = "historias.profiles.list", skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        self.repo
            .list()
            .await
            .map_err(|e| DomainError::store(e.to_string()))
    }
}
