//! Conversions between store documents and contract models.
//!
//! Bodies hold only persistable fields; the store envelope contributes
//! the id and the creation timestamp.

use anyhow::Context;
use docstore::{Document, StoredDocument};
use serde_json::Value;

use crate::contract::model::{ClinicalRecord, NewProfile, Profile, StoredRecord};

pub fn profile_from_document(doc: StoredDocument) -> anyhow::Result<Profile> {
    let mut body = doc.data;
    body.insert("id".to_string(), Value::String(doc.id));
    serde_json::from_value(Value::Object(body)).context("malformed profile document")
}

pub fn profile_to_document(new_profile: &NewProfile) -> anyhow::Result<Document> {
    match serde_json::to_value(new_profile).context("profile serialization failed")? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("profile did not serialize to an object"),
    }
}

pub fn record_from_document(doc: StoredDocument) -> anyhow::Result<StoredRecord> {
    let record: ClinicalRecord = serde_json::from_value(Value::Object(doc.data))
        .context("malformed clinical record document")?;
    Ok(StoredRecord {
        id: doc.id,
        created_at: doc.created_at,
        record,
    })
}

pub fn record_to_document(record: &ClinicalRecord) -> anyhow::Result<Document> {
    match serde_json::to_value(record).context("record serialization failed")? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("record did not serialize to an object"),
    }
}
