use std::sync::Arc;

use chrono::Utc;
use docstore::{BlobStore, Document, PageRequest, Query};
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::HistoriasConfig;
use crate::contract::model::{
    ClinicalRecord, NewRecord, SearchFilters, SearchResults, Stats, StoredRecord,
};
use crate::domain::editor;
use crate::domain::error::DomainError;
use crate::domain::filters;
use crate::domain::repo::RecordsRepository;
use crate::domain::search::SearchSequence;
use crate::domain::stats;

/// Domain service with the business rules for admission records.
#[derive(Clone)]
pub struct RecordService {
    repo: Arc<dyn RecordsRepository>,
    blobs: Arc<dyn BlobStore>,
    config: HistoriasConfig,
}

impl RecordService {
    pub fn new(
        repo: Arc<dyn RecordsRepository>,
        blobs: Arc<dyn BlobStore>,
        config: HistoriasConfig,
    ) -> Self {
        Self {
            repo,
            blobs,
            config,
        }
    }

    /// Register a new admission record.
    ///
    /// Validation and the duplicate-identity probe run before any write;
    /// a rejected intake leaves both stores untouched.
    #[instrument(
        name = "historias.records.create",
        skip(self, new_record),
        fields(document_number = %new_record.document_number)
    )]
    pub async fn create_record(
        &self,
        created_by: Option<String>,
        new_record: NewRecord,
    ) -> Result<StoredRecord, DomainError> {
        info!("registering admission record");

        validate_new_record(&new_record)?;
        self.check_duplicate_identity(&new_record).await?;

        let pdf_file_id = match &new_record.pdf {
            Some(pdf) => {
                let id = self
                    .blobs
                    .upload(&self.config.pdf_bucket, &pdf.file_name, pdf.bytes.clone())
                    .await
                    .map_err(|e| DomainError::store(e.to_string()))?;
                debug!(file_id = %id, "attached pdf uploaded");
                Some(id)
            }
            None => None,
        };

        let record = ClinicalRecord {
            document_type: new_record.document_type,
            document_number: new_record.document_number.trim().to_string(),
            patient_first_name: new_record.patient_first_name,
            patient_last_name: new_record.patient_last_name,
            gender: new_record.gender,
            age: new_record.age,
            doctor_first: new_record.doctor_first,
            doctor_last: new_record.doctor_last,
            specialty: new_record.specialty,
            admission_date: new_record.admission_date,
            discharge_date: new_record.discharge_date,
            year: new_record.year,
            month: new_record.month,
            motivo: new_record.motivo,
            cie10: new_record.cie10,
            descripcion: new_record.descripcion,
            condition: new_record.condition,
            operation: new_record.operation,
            record_number: new_record.record_number,
            hc: new_record.hc,
            account_number: new_record.account_number,
            room_number: new_record.room_number,
            correlative: new_record.correlative,
            amount: new_record.amount,
            igv: new_record.igv,
            cancellation_date: new_record.cancellation_date,
            observations: new_record.observations,
            created_by,
            created_at: Utc::now(),
            pdf_file_id,
        };

        let stored = self
            .repo
            .insert(record)
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;
        info!(id = %stored.id, "record registered");
        Ok(stored)
    }

    /// Compile the sparse filters and execute them. Read-only and
    /// idempotent; safe to retry.
    #[instrument(name = "historias.records.search", skip(self, search_filters))]
    pub async fn search(
        &self,
        search_filters: &SearchFilters,
        page: PageRequest,
    ) -> Result<SearchResults, DomainError> {
        let page = self.clamp(page);
        let queries = filters::compile(search_filters, page)?;
        debug!(predicates = queries.len(), "executing compiled search");
        self.repo
            .search(&queries)
            .await
            .map_err(|e| DomainError::store(e.to_string()))
    }

    /// Search guarded against stale responses: the result is returned
    /// only if no newer search was issued on `seq` while this one was in
    /// flight.
    #[instrument(name = "historias.records.search_latest", skip(self, seq, search_filters))]
    pub async fn search_latest(
        &self,
        seq: &SearchSequence,
        search_filters: &SearchFilters,
        page: PageRequest,
    ) -> Result<Option<SearchResults>, DomainError> {
        let token = seq.begin();
        let results = self.search(search_filters, page).await?;
        if seq.is_current(token) {
            Ok(Some(results))
        } else {
            debug!("search superseded; discarding response");
            Ok(None)
        }
    }

    /// Reporting statistics over the configured window.
    #[instrument(name = "historias.records.stats", skip(self))]
    pub async fn stats(&self) -> Result<Stats, DomainError> {
        let window = self
            .repo
            .search(&[Query::limit(self.config.stats_window)])
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;
        Ok(stats::aggregate(&window.records, window.total))
    }

    #[instrument(name = "historias.records.get", skip(self))]
    pub async fn get_record(&self, id: &str) -> Result<StoredRecord, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::store(e.to_string()))?
            .ok_or_else(|| DomainError::record_not_found(id))
    }

    /// Apply an edited field map. The payload is reduced to the
    /// persistable allow-list before it reaches the store.
    #[instrument(name = "historias.records.update", skip(self, edited))]
    pub async fn update_record(
        &self,
        id: &str,
        edited: Document,
    ) -> Result<StoredRecord, DomainError> {
        let payload = editor::prepare_update(edited);
        if payload.is_empty() {
            return Err(DomainError::validation(
                "payload",
                "no persistable fields in update",
            ));
        }
        self.repo
            .update(id, payload)
            .await
            .map_err(|e| DomainError::store(e.to_string()))
    }

    /// Hard delete. The privileged-caller gate is the caller's concern.
    #[instrument(name = "historias.records.delete", skip(self))]
    pub async fn delete_record(&self, id: &str) -> Result<(), DomainError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;
        if !deleted {
            return Err(DomainError::record_not_found(id));
        }
        info!("record deleted");
        Ok(())
    }

    /// Download location for an attached PDF.
    #[instrument(name = "historias.records.pdf_url", skip(self))]
    pub async fn pdf_download_url(&self, file_id: &str) -> Result<Url, DomainError> {
        self.blobs
            .download_url(&self.config.pdf_bucket, file_id)
            .await
            .map_err(|e| DomainError::store(e.to_string()))
    }

    // --- helpers ---

    async fn check_duplicate_identity(&self, new_record: &NewRecord) -> Result<(), DomainError> {
        let existing = self
            .repo
            .find_by_document_number(new_record.document_number.trim())
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;

        let conflicting = existing.iter().any(|stored| {
            stored.record.patient_first_name != new_record.patient_first_name
                || stored.record.patient_last_name != new_record.patient_last_name
        });
        if conflicting {
            return Err(DomainError::duplicate_identity(
                new_record.document_number.trim(),
            ));
        }
        Ok(())
    }

    fn clamp(&self, page: PageRequest) -> PageRequest {
        let limit = if page.limit == 0 {
            self.config.default_page_size
        } else {
            page.limit.min(self.config.max_page_size)
        };
        PageRequest {
            limit,
            offset: page.offset,
        }
    }
}

fn validate_new_record(new_record: &NewRecord) -> Result<(), DomainError> {
    if new_record.discharge_date < new_record.admission_date {
        return Err(DomainError::validation(
            "discharge_date",
            "discharge date cannot precede admission date",
        ));
    }
    if new_record.patient_first_name.chars().count() < 2 {
        return Err(DomainError::validation(
            "patient_first_name",
            "patient name is too short",
        ));
    }
    if new_record.document_number.trim().chars().count() < 6 {
        return Err(DomainError::validation(
            "document_number",
            "document number is too short",
        ));
    }
    if new_record.motivo.trim().is_empty() {
        return Err(DomainError::validation("motivo", "a motive is required"));
    }
    if new_record.cie10.chars().count() < 3 {
        return Err(DomainError::validation("cie10", "invalid CIE-10 code"));
    }
    if new_record.descripcion.chars().count() < 5 {
        return Err(DomainError::validation(
            "descripcion",
            "description must have at least 5 characters",
        ));
    }
    if new_record.amount < 0.0 || new_record.igv < 0.0 {
        return Err(DomainError::validation(
            "amount",
            "amount and IGV must be non-negative",
        ));
    }
    if let Some(pdf) = &new_record.pdf {
        if pdf.content_type != "application/pdf" {
            return Err(DomainError::validation(
                "pdf",
                "attached file must be a PDF",
            ));
        }
    }
    Ok(())
}
