use async_trait::async_trait;
use url::Url;

use docstore::{Document, PageRequest};

use crate::contract::{
    client::HistoriasApi,
    error::HistoriasError,
    model::{NewRecord, Profile, SearchFilters, SearchResults, Stats, StoredRecord},
};
use crate::domain::{error::DomainError, profiles::ProfileService, service::RecordService};

/// Local in-process implementation of the HistoriasApi trait that
/// delegates to the domain services.
pub struct LocalClient {
    records: RecordService,
    profiles: ProfileService,
}

impl LocalClient {
    pub fn new(records: RecordService, profiles: ProfileService) -> Self {
        Self { records, profiles }
    }
}

#[async_trait]
impl HistoriasApi for LocalClient {
    async fn create_record(
        &self,
        created_by: Option<String>,
        new_record: NewRecord,
    ) -> Result<StoredRecord, HistoriasError> {
        self.records
            .create_record(created_by, new_record)
            .await
            .map_err(map_domain_error)
    }

    async fn search_records(
        &self,
        filters: SearchFilters,
        page: PageRequest,
    ) -> Result<SearchResults, HistoriasError> {
        self.records
            .search(&filters, page)
            .await
            .map_err(map_domain_error)
    }

    async fn get_record(&self, id: &str) -> Result<StoredRecord, HistoriasError> {
        self.records.get_record(id).await.map_err(map_domain_error)
    }

    async fn update_record(
        &self,
        id: &str,
        edited: Document,
    ) -> Result<StoredRecord, HistoriasError> {
        self.records
            .update_record(id, edited)
            .await
            .map_err(map_domain_error)
    }

    async fn delete_record(&self, id: &str) -> Result<(), HistoriasError> {
        self.records
            .delete_record(id)
            .await
            .map_err(map_domain_error)
    }

    async fn stats(&self) -> Result<Stats, HistoriasError> {
        self.records.stats().await.map_err(map_domain_error)
    }

    async fn pdf_download_url(&self, file_id: &str) -> Result<Url, HistoriasError> {
        self.records
            .pdf_download_url(file_id)
            .await
            .map_err(map_domain_error)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, HistoriasError> {
        self.profiles
            .list_profiles()
            .await
            .map_err(map_domain_error)
    }

    async fn toggle_role(&self, profile_id: &str) -> Result<Profile, HistoriasError> {
        self.profiles
            .toggle_role(profile_id)
            .await
            .map_err(map_domain_error)
    }

    async fn delete_profile(&self, profile_id: &str) -> Result<(), HistoriasError> {
        self.profiles
            .delete_profile(profile_id)
            .await
            .map_err(map_domain_error)
    }
}

/// Map domain errors to contract errors; store internals never leak.
fn map_domain_error(domain_error: DomainError) -> HistoriasError {
    match domain_error {
        DomainError::RecordNotFound { id } | DomainError::ProfileNotFound { id } => {
            HistoriasError::not_found(id)
        }
        DomainError::DuplicateIdentity { document_number } => {
            HistoriasError::duplicate_identity(document_number)
        }
        DomainError::Validation { field, message } => {
            HistoriasError::validation(format!("{field}: {message}"))
        }
        DomainError::Store { .. } => HistoriasError::internal(),
    }
}
