use async_trait::async_trait;
use url::Url;

use docstore::{Document, PageRequest};

use crate::contract::error::HistoriasError;
use crate::contract::model::{
    NewRecord, Profile, SearchFilters, SearchResults, Stats, StoredRecord,
};

/// Public API trait for the historias module that the UI layer consumes.
#[async_trait]
pub trait HistoriasApi: Send + Sync {
    /// Register a new admission record. `created_by` carries the acting
    /// principal's id into the record's provenance.
    async fn create_record(
        &self,
        created_by: Option<String>,
        new_record: NewRecord,
    ) -> Result<StoredRecord, HistoriasError>;

    /// Search records with the sparse filter set and a bounded window.
    async fn search_records(
        &self,
        filters: SearchFilters,
        page: PageRequest,
    ) -> Result<SearchResults, HistoriasError>;

    /// Load one record by id.
    async fn get_record(&self, id: &str) -> Result<StoredRecord, HistoriasError>;

    /// Apply an edited field map to a record. Unknown and system-owned
    /// keys are dropped before anything reaches the store.
    async fn update_record(
        &self,
        id: &str,
        edited: Document,
    ) -> Result<StoredRecord, HistoriasError>;

    /// Hard-delete a record. Reserved for privileged callers; the access
    /// gate is the caller's responsibility.
    async fn delete_record(&self, id: &str) -> Result<(), HistoriasError>;

    /// Reporting statistics over the configured window.
    async fn stats(&self) -> Result<Stats, HistoriasError>;

    /// Download location for an attached PDF.
    async fn pdf_download_url(&self, file_id: &str) -> Result<Url, HistoriasError>;

    /// All profiles, for the elevated dashboard.
    async fn list_profiles(&self) -> Result<Vec<Profile>, HistoriasError>;

    /// Flip a profile between `user` and `admin`.
    async fn toggle_role(&self, profile_id: &str) -> Result<Profile, HistoriasError>;

    /// Remove a profile.
    async fn delete_profile(&self, profile_id: &str) -> Result<(), HistoriasError>;
}
