//! In-process store implementation.
//!
//! Executes the same constrained predicate set as the remote store over
//! insertion-ordered collections. Used as the store double in tests and
//! for local development; not a durability layer.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use url::Url;
use uuid::Uuid;

use crate::page::DocumentList;
use crate::store::{
    BlobStore, Credential, Document, DocumentStore, Principal, SessionStore, StoreError,
    StoredDocument,
};
use crate::Query;

/// Window size applied when a query carries no `Limit` predicate.
const DEFAULT_LIMIT: u64 = 25;

struct Account {
    password: String,
    principal: Principal,
}

pub struct MemoryStore {
    endpoint: Url,
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
    accounts: RwLock<HashMap<String, Account>>,
    session: RwLock<Option<Principal>>,
    blobs: RwLock<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            endpoint: Url::parse("memory://local/").expect("static endpoint"),
            collections: RwLock::new(HashMap::new()),
            accounts: RwLock::new(HashMap::new()),
            session: RwLock::new(None),
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Register an account that `begin_session` can authenticate.
    pub fn register_account(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Principal {
        let email = email.into();
        let principal = Principal {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.clone(),
        };
        self.accounts.write().insert(
            email,
            Account {
                password: password.into(),
                principal: principal.clone(),
            },
        );
        principal
    }

    /// Number of documents currently held in a collection, ignoring any
    /// window bounds. Test observability helper.
    pub fn collection_len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentList, StoreError> {
        let collections = self.collections.read();
        let docs = collections.get(collection).map_or(&[][..], Vec::as_slice);

        let mut limit = DEFAULT_LIMIT;
        let mut offset = 0u64;
        for q in queries {
            match q {
                Query::Limit(n) => limit = *n,
                Query::Offset(n) => offset = *n,
                _ => {}
            }
        }

        let matched: Vec<&StoredDocument> = docs
            .iter()
            .filter(|d| queries.iter().all(|q| q.is_satisfied_by(&d.data)))
            .collect();
        let total = matched.len() as u64;

        let documents = matched
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(DocumentList { documents, total })
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<StoredDocument, StoreError> {
        self.collections
            .read()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn create_document(
        &self,
        collection: &str,
        data: Document,
    ) -> Result<StoredDocument, StoreError> {
        let now = Utc::now();
        let doc = StoredDocument {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            data,
        };
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Document,
    ) -> Result<StoredDocument, StoreError> {
        let mut collections = self.collections.write();
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(id))?;
        let doc = docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        for (k, v) in data {
            doc.data.insert(k, v);
        }
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(id))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn current_principal(&self) -> Result<Option<Principal>, StoreError> {
        Ok(self.session.read().clone())
    }

    async fn begin_session(&self, credential: Credential) -> Result<Principal, StoreError> {
        let accounts = self.accounts.read();
        let account = accounts
            .get(&credential.email)
            .ok_or(StoreError::Unauthorized)?;
        if account.password != credential.password {
            return Err(StoreError::Unauthorized);
        }
        let principal = account.principal.clone();
        drop(accounts);
        *self.session.write() = Some(principal.clone());
        Ok(principal)
    }

    async fn begin_federated_session(
        &self,
        _provider: &str,
        _success_redirect: Url,
        _failure_redirect: Url,
    ) -> Result<(), StoreError> {
        // A federated handoff needs a browser round-trip; there is nothing
        // to redirect to in-process.
        Err(StoreError::backend(
            "federated sessions are not available in the in-process store",
        ))
    }

    async fn end_session(&self) -> Result<(), StoreError> {
        *self.session.write() = None;
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn upload(
        &self,
        bucket: &str,
        _file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.blobs
            .write()
            .entry(bucket.to_string())
            .or_default()
            .insert(id.clone(), bytes);
        Ok(id)
    }

    async fn download_url(&self, bucket: &str, file_id: &str) -> Result<Url, StoreError> {
        let known = self
            .blobs
            .read()
            .get(bucket)
            .is_some_and(|b| b.contains_key(file_id));
        if !known {
            return Err(StoreError::not_found(file_id));
        }
        self.endpoint
            .join(&format!("buckets/{bucket}/files/{file_id}/download"))
            .map_err(|e| StoreError::backend(e.to_string()))
    }
}
