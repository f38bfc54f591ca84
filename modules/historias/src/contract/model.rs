//! Pure contract models for the historias module.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Access role carried by a profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// The other role; used by the admin panel's role switch.
    pub fn toggled(&self) -> Role {
        match self {
            Role::User => Role::Admin,
            Role::Admin => Role::User,
        }
    }
}

/// This system's extension of a principal: role and display attributes.
/// At most one profile exists per principal id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub principal_id: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

/// Data for creating a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub principal_id: String,
    pub full_name: String,
    pub role: Role,
}

/// Calendar month as stored: either a 1-12 index or a Spanish month name.
/// Both representations resolve to the same reporting bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Month {
    Number(u32),
    Name(String),
}

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

impl Month {
    /// 1-based bucket index, or `None` when the value is unrecognizable.
    pub fn index(&self) -> Option<u32> {
        match self {
            Month::Number(n) if (1..=12).contains(n) => Some(*n),
            Month::Number(_) => None,
            Month::Name(name) => {
                let lower = name.to_lowercase();
                MONTH_NAMES
                    .iter()
                    .position(|m| *m == lower)
                    .map(|i| i as u32 + 1)
            }
        }
    }
}

/// A clinical admission record, as persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    // Identity
    pub document_type: String,
    pub document_number: String,

    // Patient
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    // Clinician
    pub doctor_first: String,
    pub doctor_last: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,

    // Temporal
    pub admission_date: NaiveDate,
    pub discharge_date: NaiveDate,
    pub year: i32,
    pub month: Month,

    // Clinical
    pub motivo: String,
    pub cie10: String,
    pub descripcion: String,
    pub condition: String,
    #[serde(default)]
    pub operation: String,

    // Administrative
    pub record_number: String,
    #[serde(default)]
    pub hc: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub room_number: String,
    #[serde(default)]
    pub correlative: String,
    pub amount: f64,
    pub igv: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_date: Option<NaiveDate>,

    #[serde(default)]
    pub observations: String,

    // Provenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,

    // Attachment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_file_id: Option<String>,
}

/// An attached file submitted with an intake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Intake input: everything the form collects. Provenance and the blob
/// reference are stamped by the service.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRecord {
    pub document_type: String,
    pub document_number: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub gender: String,
    pub age: Option<u32>,
    pub doctor_first: String,
    pub doctor_last: String,
    pub specialty: Option<String>,
    pub admission_date: NaiveDate,
    pub discharge_date: NaiveDate,
    pub year: i32,
    pub month: Month,
    pub motivo: String,
    pub cie10: String,
    pub descripcion: String,
    pub condition: String,
    pub operation: String,
    pub record_number: String,
    pub hc: String,
    pub account_number: String,
    pub room_number: String,
    pub correlative: String,
    pub amount: f64,
    pub igv: f64,
    pub cancellation_date: Option<NaiveDate>,
    pub observations: String,
    pub pdf: Option<PdfFile>,
}

/// Sparse search input. The field set is the filter allow-list: loose
/// key/value pairs from form state can only land on a known field, so an
/// unrecognized key can never turn into a predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub year: Option<String>,
    pub doctor_first: Option<String>,
    pub doctor_last: Option<String>,
    pub patient_first_name: Option<String>,
    pub patient_last_name: Option<String>,
    pub condition: Option<String>,
    pub document_number: Option<String>,
    pub document_type: Option<String>,
    pub room_number: Option<String>,
    pub operation: Option<String>,
    pub gender: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
}

impl SearchFilters {
    /// Build filters from loose key/value pairs, silently ignoring keys
    /// that are not on the allow-list.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            let value = Some(value.into());
            match key.as_ref() {
                "year" => filters.year = value,
                "doctor_first" => filters.doctor_first = value,
                "doctor_last" => filters.doctor_last = value,
                "patient_first_name" => filters.patient_first_name = value,
                "patient_last_name" => filters.patient_last_name = value,
                "condition" => filters.condition = value,
                "document_number" => filters.document_number = value,
                "document_type" => filters.document_type = value,
                "room_number" => filters.room_number = value,
                "operation" => filters.operation = value,
                "gender" => filters.gender = value,
                "from_date" => filters.from_date = value,
                "to_date" => filters.to_date = value,
                "min_age" => filters.min_age = value,
                "max_age" => filters.max_age = value,
                _ => {}
            }
        }
        filters
    }
}

/// A record together with its store envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    /// Store-assigned creation timestamp, distinct from the intake-stamped
    /// `record.created_at`.
    pub created_at: DateTime<Utc>,
    pub record: ClinicalRecord,
}

/// One search window plus the store-reported total of all matches.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub records: Vec<StoredRecord>,
    pub total: u64,
}

/// Clinician ranking entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoctorCount {
    pub name: String,
    pub count: u64,
}

/// Gender tally over a window. Unrecognized values are excluded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub masculino: u64,
    pub femenino: u64,
}

/// Reporting statistics reduced from one record window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    /// Store-reported total, not the window size.
    pub total_records: u64,
    pub years: std::collections::BTreeSet<i32>,
    pub per_year: std::collections::BTreeMap<i32, u64>,
    pub doctors: std::collections::BTreeSet<String>,
    pub per_month: std::collections::BTreeMap<u32, u64>,
    pub genders: GenderCounts,
    pub top_doctors: Vec<DoctorCount>,
    pub most_recent: Option<StoredRecord>,
}
