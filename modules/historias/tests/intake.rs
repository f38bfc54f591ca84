//! Intake validation and the duplicate-identity guard. Every rejection
//! happens before anything reaches the store.

mod common;

use chrono::NaiveDate;

use historias::contract::model::PdfFile;
use historias::domain::error::DomainError;

use common::{new_record, setup};

#[tokio::test]
async fn valid_intake_persists_with_provenance() {
    let ctx = setup();
    let stored = ctx
        .records
        .create_record(Some("principal-1".to_string()), new_record("12345678", "Ana", "Flores"))
        .await
        .unwrap();

    assert_eq!(stored.record.created_by.as_deref(), Some("principal-1"));
    assert_eq!(stored.record.document_number, "12345678");
    assert!(stored.record.pdf_file_id.is_none());
    assert_eq!(ctx.store.collection_len(&ctx.config.records_collection), 1);
}

#[tokio::test]
async fn discharge_before_admission_is_rejected_locally() {
    let ctx = setup();
    let mut record = new_record("12345678", "Ana", "Flores");
    record.discharge_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    let err = ctx.records.create_record(None, record).await.unwrap_err();
    assert!(
        matches!(err, DomainError::Validation { ref field, .. } if field == "discharge_date")
    );
    assert_eq!(ctx.store.collection_len(&ctx.config.records_collection), 0);
}

#[tokio::test]
async fn same_day_discharge_is_accepted() {
    let ctx = setup();
    let mut record = new_record("12345678", "Ana", "Flores");
    record.discharge_date = record.admission_date;
    assert!(ctx.records.create_record(None, record).await.is_ok());
}

#[tokio::test]
async fn malformed_fields_are_rejected() {
    let ctx = setup();

    let short_name = new_record("12345678", "A", "Flores");
    assert!(ctx.records.create_record(None, short_name).await.is_err());

    let short_document = new_record("123", "Ana", "Flores");
    assert!(ctx.records.create_record(None, short_document).await.is_err());

    let mut no_motive = new_record("12345678", "Ana", "Flores");
    no_motive.motivo = "  ".to_string();
    assert!(ctx.records.create_record(None, no_motive).await.is_err());

    let mut bad_cie10 = new_record("12345678", "Ana", "Flores");
    bad_cie10.cie10 = "K3".to_string();
    assert!(ctx.records.create_record(None, bad_cie10).await.is_err());

    let mut bad_description = new_record("12345678", "Ana", "Flores");
    bad_description.descripcion = "op".to_string();
    assert!(ctx.records.create_record(None, bad_description).await.is_err());

    let mut negative_amount = new_record("12345678", "Ana", "Flores");
    negative_amount.amount = -1.0;
    assert!(ctx.records.create_record(None, negative_amount).await.is_err());

    assert_eq!(ctx.store.collection_len(&ctx.config.records_collection), 0);
}

#[tokio::test]
async fn duplicate_document_number_with_different_identity_is_rejected() {
    let ctx = setup();
    ctx.records
        .create_record(None, new_record("12345678", "Ana", "Flores"))
        .await
        .unwrap();

    let err = ctx
        .records
        .create_record(None, new_record("12345678", "María", "Flores"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::DuplicateIdentity { ref document_number } if document_number == "12345678"
    ));
    assert_eq!(ctx.store.collection_len(&ctx.config.records_collection), 1);
}

#[tokio::test]
async fn readmission_of_the_same_patient_is_accepted() {
    let ctx = setup();
    ctx.records
        .create_record(None, new_record("12345678", "Ana", "Flores"))
        .await
        .unwrap();
    ctx.records
        .create_record(None, new_record("12345678", "Ana", "Flores"))
        .await
        .unwrap();
    assert_eq!(ctx.store.collection_len(&ctx.config.records_collection), 2);
}

#[tokio::test]
async fn non_pdf_attachment_is_rejected() {
    let ctx = setup();
    let mut record = new_record("12345678", "Ana", "Flores");
    record.pdf = Some(PdfFile {
        file_name: "scan.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![1, 2, 3],
    });

    let err = ctx.records.create_record(None, record).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "pdf"));
}

#[tokio::test]
async fn pdf_attachment_is_uploaded_and_linked() {
    let ctx = setup();
    let mut record = new_record("12345678", "Ana", "Flores");
    record.pdf = Some(PdfFile {
        file_name: "historia.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        bytes: vec![0x25, 0x50, 0x44, 0x46],
    });

    let stored = ctx.records.create_record(None, record).await.unwrap();
    let file_id = stored.record.pdf_file_id.expect("attachment id");

    let url = ctx.records.pdf_download_url(&file_id).await.unwrap();
    assert!(url.path().contains(&file_id));
}
