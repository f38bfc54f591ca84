//! Document-store adapter for the records port.
//!
//! Compiled predicates pass through unchanged; this adapter owns only the
//! document mapping and the collection name.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use docstore::{Document, DocumentStore, Query, StoreError};

use crate::contract::model::{ClinicalRecord, SearchResults, StoredRecord};
use crate::domain::repo::RecordsRepository;
use crate::infra::storage::mapper;

pub struct DocRecordsRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl DocRecordsRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl RecordsRepository for DocRecordsRepository {
    async fn search(&self, queries: &[Query]) -> anyhow::Result<SearchResults> {
        let list = self
            .store
            .list_documents(&self.collection, queries)
            .await
            .context("record search failed")?;
        let records = list
            .documents
            .into_iter()
            .map(mapper::record_from_document)
            .collect::<anyhow::Result<Vec<StoredRecord>>>()?;
        Ok(SearchResults {
            records,
            total: list.total,
        })
    }

    async fn find_by_document_number(&self, number: &str) -> anyhow::Result<Vec<StoredRecord>> {
        let list = self
            .store
            .list_documents(
                &self.collection,
                &[Query::equal("document_number", number)],
            )
            .await
            .context("duplicate-identity probe failed")?;
        list.documents
            .into_iter()
            .map(mapper::record_from_document)
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<StoredRecord>> {
        match self.store.get_document(&self.collection, id).await {
            Ok(doc) => Ok(Some(mapper::record_from_document(doc)?)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e).context("record fetch failed"),
        }
    }

    async fn insert(&self, record: ClinicalRecord) -> anyhow::Result<StoredRecord> {
        let body = mapper::record_to_document(&record)?;
        let doc = self
            .store
            .create_document(&self.collection, body)
            .await
            .context("record creation failed")?;
        mapper::record_from_document(doc)
    }

    async fn update(&self, id: &str, payload: Document) -> anyhow::Result<StoredRecord> {
        let doc = self
            .store
            .update_document(&self.collection, id, payload)
            .await
            .context("record update failed")?;
        mapper::record_from_document(doc)
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        match self.store.delete_document(&self.collection, id).await {
            Ok(()) => Ok(true),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e).context("record deletion failed"),
        }
    }
}
