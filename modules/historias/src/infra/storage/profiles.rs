//! Document-store adapter for the profiles port.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use docstore::{DocumentStore, Query, StoreError};
use serde_json::Value;

use crate::contract::model::{NewProfile, Profile, Role};
use crate::domain::repo::ProfilesRepository;
use crate::infra::storage::mapper;

pub struct DocProfilesRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl DocProfilesRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl ProfilesRepository for DocProfilesRepository {
    async fn find_by_principal(&self, principal_id: &str) -> anyhow::Result<Option<Profile>> {
        let list = self
            .store
            .list_documents(
                &self.collection,
                &[Query::equal("principal_id", principal_id), Query::limit(1)],
            )
            .await
            .context("profile lookup failed")?;
        list.documents
            .into_iter()
            .next()
            .map(mapper::profile_from_document)
            .transpose()
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Profile>> {
        match self.store.get_document(&self.collection, id).await {
            Ok(doc) => Ok(Some(mapper::profile_from_document(doc)?)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e).context("profile fetch failed"),
        }
    }

    async fn insert(&self, new_profile: NewProfile) -> anyhow::Result<Profile> {
        let body = mapper::profile_to_document(&new_profile)?;
        let doc = self
            .store
            .create_document(&self.collection, body)
            .await
            .context("profile creation failed")?;
        mapper::profile_from_document(doc)
    }

    async fn set_role(&self, id: &str, role: Role) -> anyhow::Result<Profile> {
        let mut payload = docstore::Document::new();
        payload.insert(
            "role".to_string(),
            Value::String(role.as_str().to_string()),
        );
        let doc = self
            .store
            .update_document(&self.collection, id, payload)
            .await
            .context("role update failed")?;
        mapper::profile_from_document(doc)
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        match self.store.delete_document(&self.collection, id).await {
            Ok(()) => Ok(true),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e).context("profile deletion failed"),
        }
    }

    async fn list(&self) -> anyhow::Result<Vec<Profile>> {
        let list = self
            .store
            .list_documents(&self.collection, &[Query::limit(100)])
            .await
            .context("profile listing failed")?;
        list.documents
            .into_iter()
            .map(mapper::profile_from_document)
            .collect()
    }
}
