//! Shared test fixtures: domain services wired to an in-process store.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use docstore::memory::MemoryStore;

use historias::config::HistoriasConfig;
use historias::contract::model::{Month, NewRecord};
use historias::domain::access::AccessResolver;
use historias::domain::profiles::ProfileService;
use historias::domain::service::RecordService;
use historias::infra::storage::{DocProfilesRepository, DocRecordsRepository};

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub config: HistoriasConfig,
    pub profiles: ProfileService,
    pub records: RecordService,
    pub resolver: AccessResolver,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn setup() -> TestContext {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let config = HistoriasConfig::default();

    let profiles_repo =
        DocProfilesRepository::new(store.clone(), config.profiles_collection.clone());
    let profiles = ProfileService::new(Arc::new(profiles_repo));

    let records_repo =
        DocRecordsRepository::new(store.clone(), config.records_collection.clone());
    let records = RecordService::new(Arc::new(records_repo), store.clone(), config.clone());

    let resolver = AccessResolver::new(store.clone(), profiles.clone());

    TestContext {
        store,
        config,
        profiles,
        records,
        resolver,
    }
}

/// A valid intake for one patient; tests override fields as needed.
pub fn new_record(document_number: &str, first: &str, last: &str) -> NewRecord {
    NewRecord {
        document_type: "DNI".to_string(),
        document_number: document_number.to_string(),
        patient_first_name: first.to_string(),
        patient_last_name: last.to_string(),
        gender: "masculino".to_string(),
        age: Some(40),
        doctor_first: "José".to_string(),
        doctor_last: "Quispe".to_string(),
        specialty: Some("Cirugía general".to_string()),
        admission_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        discharge_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        year: 2024,
        month: Month::Name("Marzo".to_string()),
        motivo: "cirugía".to_string(),
        cie10: "K35.8".to_string(),
        descripcion: "apendicectomía laparoscópica".to_string(),
        condition: "Estable".to_string(),
        operation: "apendicectomía".to_string(),
        record_number: "R-0001".to_string(),
        hc: "HC-77".to_string(),
        account_number: "C-100".to_string(),
        room_number: "204".to_string(),
        correlative: "0001".to_string(),
        amount: 1500.0,
        igv: 270.0,
        cancellation_date: None,
        observations: String::new(),
        pdf: None,
    }
}
