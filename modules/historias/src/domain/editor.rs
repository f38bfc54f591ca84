//! Write-side sanitization for record edits.
//!
//! Edited form state arrives as a loose field map; only the fixed set of
//! persistable fields may reach the store. Store-assigned identifiers and
//! provenance are never part of an update payload.

use docstore::Document;

/// Persistable record fields. Provenance (`created_by`, `created_at`) is
/// stamped once at intake and is not editable.
pub const RECORD_FIELDS: &[&str] = &[
    "document_type",
    "document_number",
    "patient_first_name",
    "patient_last_name",
    "gender",
    "age",
    "doctor_first",
    "doctor_last",
    "specialty",
    "admission_date",
    "discharge_date",
    "year",
    "month",
    "motivo",
    "cie10",
    "descripcion",
    "condition",
    "operation",
    "record_number",
    "hc",
    "account_number",
    "room_number",
    "correlative",
    "amount",
    "igv",
    "cancellation_date",
    "observations",
    "pdf_file_id",
];

/// Reduce an edited field map to the sanitized update payload: keys off
/// the allow-list are silently dropped. Value validation stays with the
/// caller.
pub fn prepare_update(edited: Document) -> Document {
    edited
        .into_iter()
        .filter(|(key, _)| RECORD_FIELDS.contains(&key.as_str()))
        .collect()
}
