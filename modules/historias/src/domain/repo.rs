use async_trait::async_trait;
use docstore::{Document, Query};

use crate::contract::model::{ClinicalRecord, NewProfile, Profile, Role, SearchResults, StoredRecord};

/// Port for profile persistence. Object-safe and async-friendly via
/// `async_trait`.
#[async_trait]
pub trait ProfilesRepository: Send + Sync {
    /// Load the profile bound to a principal, if one exists.
    async fn find_by_principal(&self, principal_id: &str) -> anyhow::Result<Option<Profile>>;
    /// Load a profile by its own id.
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Profile>>;
    /// Persist a new profile; the store assigns the id.
    async fn insert(&self, new_profile: NewProfile) -> anyhow::Result<Profile>;
    /// Overwrite the role of an existing profile.
    async fn set_role(&self, id: &str, role: Role) -> anyhow::Result<Profile>;
    /// Delete by id. Returns true if a profile was removed.
    async fn delete(&self, id: &str) -> anyhow::Result<bool>;
    /// All profiles, bounded by the store's listing window.
    async fn list(&self) -> anyhow::Result<Vec<Profile>>;
}

/// Port for record persistence. The compiled predicate list passes through
/// unchanged; the adapter owns only the document mapping.
#[async_trait]
pub trait RecordsRepository: Send + Sync {
    /// Execute compiled predicates; returns the window plus the
    /// store-reported total.
    async fn search(&self, queries: &[Query]) -> anyhow::Result<SearchResults>;
    /// All records sharing a document number (the duplicate-identity probe).
    async fn find_by_document_number(&self, number: &str) -> anyhow::Result<Vec<StoredRecord>>;
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<StoredRecord>>;
    /// Persist a fully-formed record; the service stamps provenance.
    async fn insert(&self, record: ClinicalRecord) -> anyhow::Result<StoredRecord>;
    /// Merge an already-sanitized field map into a record.
    async fn update(&self, id: &str, payload: Document) -> anyhow::Result<StoredRecord>;
    /// Delete by id. Returns true if a record was removed.
    async fn delete(&self, id: &str) -> anyhow::Result<bool>;
}
