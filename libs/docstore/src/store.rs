//! Capability traits for the remote store: documents, sessions and blobs.
//!
//! Every trait is object-safe and `Send + Sync` so services can hold them
//! as `Arc<dyn ...>` ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::page::DocumentList;
use crate::Query;

/// A document body: a flat JSON object map. Store-assigned metadata
/// (id, timestamps) lives on [`StoredDocument`], never inside the body.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A document as returned by the store: body plus assigned envelope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: Document,
}

/// An authenticated identity, opaque outside the session store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Password credential for a first-party session.
#[derive(Clone, Debug)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {id}")]
    NotFound { id: String },

    #[error("unauthorized")]
    Unauthorized,

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("store backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Constrained query capability over document collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Execute the predicate list against a collection. Non-pagination
    /// predicates combine conjunctively; `total` reports all matches
    /// before limit/offset.
    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentList, StoreError>;

    /// Load one document by its store-assigned id.
    async fn get_document(&self, collection: &str, id: &str)
        -> Result<StoredDocument, StoreError>;

    /// Create a document; the store assigns the id and timestamps.
    async fn create_document(
        &self,
        collection: &str,
        data: Document,
    ) -> Result<StoredDocument, StoreError>;

    /// Merge the given fields into an existing document.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Document,
    ) -> Result<StoredDocument, StoreError>;

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Session capability: at most one authenticated principal per client
/// context.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The currently authenticated principal, if any.
    async fn current_principal(&self) -> Result<Option<Principal>, StoreError>;

    /// Authenticate with a password credential and open a session.
    async fn begin_session(&self, credential: Credential) -> Result<Principal, StoreError>;

    /// Hand off to a federated identity provider. The store redirects to
    /// one of the given locations; no principal is returned inline.
    async fn begin_federated_session(
        &self,
        provider: &str,
        success_redirect: Url,
        failure_redirect: Url,
    ) -> Result<(), StoreError>;

    /// Revoke the current session. Idempotent.
    async fn end_session(&self) -> Result<(), StoreError>;
}

/// Blob capability for attached files.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError>;

    async fn download_url(&self, bucket: &str, file_id: &str) -> Result<Url, StoreError>;
}
