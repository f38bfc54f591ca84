//! Search end to end: compiled filters against the store, pagination
//! windows, statistics, and the stale-response guard.

mod common;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use docstore::{Document, PageRequest, Query};
use tokio::sync::Notify;

use historias::config::HistoriasConfig;
use historias::contract::model::{
    ClinicalRecord, Month, SearchFilters, SearchResults, StoredRecord,
};
use historias::domain::repo::RecordsRepository;
use historias::domain::search::SearchSequence;
use historias::domain::service::RecordService;

use common::{new_record, setup};

#[tokio::test]
async fn equality_filters_narrow_the_result_set() {
    let ctx = setup();
    for (number, doctor) in [
        ("11111111", "Quispe"),
        ("22222222", "Huamán"),
        ("33333333", "Quispe"),
    ] {
        let mut record = new_record(number, "Ana", "Flores");
        record.doctor_last = doctor.to_string();
        ctx.records.create_record(None, record).await.unwrap();
    }

    let filters = SearchFilters {
        doctor_last: Some("Quispe".to_string()),
        ..Default::default()
    };
    let results = ctx
        .records
        .search(&filters, PageRequest::new(20))
        .await
        .unwrap();

    assert_eq!(results.total, 2);
    assert!(results
        .records
        .iter()
        .all(|r| r.record.doctor_last == "Quispe"));
}

#[tokio::test]
async fn year_filter_compiles_to_an_integer_match() {
    let ctx = setup();
    let mut old = new_record("11111111", "Ana", "Flores");
    old.year = 2019;
    ctx.records.create_record(None, old).await.unwrap();
    ctx.records
        .create_record(None, new_record("22222222", "Ana", "Flores"))
        .await
        .unwrap();

    let filters = SearchFilters {
        year: Some("2019".to_string()),
        ..Default::default()
    };
    let results = ctx
        .records
        .search(&filters, PageRequest::new(20))
        .await
        .unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.records[0].record.year, 2019);
}

#[tokio::test]
async fn date_range_is_inclusive_on_admission_date() {
    let ctx = setup();
    for (number, day) in [("11111111", 5), ("22222222", 10), ("33333333", 20)] {
        let mut record = new_record(number, "Ana", "Flores");
        record.admission_date = chrono::NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        ctx.records.create_record(None, record).await.unwrap();
    }

    let filters = SearchFilters {
        from_date: Some("2024-03-10".to_string()),
        to_date: Some("2024-03-20".to_string()),
        ..Default::default()
    };
    let results = ctx
        .records
        .search(&filters, PageRequest::new(20))
        .await
        .unwrap();
    assert_eq!(results.total, 2);
}

#[tokio::test]
async fn empty_filters_stay_bounded_while_total_reports_all_matches() {
    let ctx = setup();
    for i in 0..25 {
        ctx.records
            .create_record(None, new_record(&format!("{:08}", i), "Ana", "Flores"))
            .await
            .unwrap();
    }

    let results = ctx
        .records
        .search(&SearchFilters::default(), PageRequest::new(10))
        .await
        .unwrap();
    assert_eq!(results.records.len(), 10);
    assert_eq!(results.total, 25);

    let second_page = ctx
        .records
        .search(
            &SearchFilters::default(),
            PageRequest::new(10).with_offset(20),
        )
        .await
        .unwrap();
    assert_eq!(second_page.records.len(), 5);
}

#[tokio::test]
async fn stats_reduce_the_window_with_store_total() {
    let ctx = setup();
    let mut a = new_record("11111111", "Ana", "Flores");
    a.month = Month::Number(3);
    a.gender = "femenino".to_string();
    ctx.records.create_record(None, a).await.unwrap();

    let mut b = new_record("22222222", "Luis", "Mamani");
    b.month = Month::Name("Marzo".to_string());
    ctx.records.create_record(None, b).await.unwrap();

    let mut c = new_record("33333333", "Eva", "Torres");
    c.month = Month::Name("Julio".to_string());
    c.doctor_last = "Huamán".to_string();
    ctx.records.create_record(None, c).await.unwrap();

    let stats = ctx.records.stats().await.unwrap();
    assert_eq!(stats.total_records, 3);
    assert_eq!(stats.per_month[&3], 2);
    assert_eq!(stats.per_month[&7], 1);
    assert_eq!(stats.per_year[&2024], 3);
    assert_eq!(stats.genders.femenino, 1);
    assert_eq!(stats.genders.masculino, 2);
    assert_eq!(stats.doctors.len(), 2);
    assert!(stats.most_recent.is_some());
}

// --- stale-response guard ---

/// Repository whose first search blocks until released, so a second
/// search can overtake it deterministically.
struct GatedRepo {
    calls: AtomicU64,
    started: Notify,
    release: Notify,
}

impl GatedRepo {
    fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
            started: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl RecordsRepository for GatedRepo {
    async fn search(&self, _queries: &[Query]) -> anyhow::Result<SearchResults> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            self.started.notify_one();
            self.release.notified().await;
        }
        Ok(SearchResults {
            records: vec![],
            total: call,
        })
    }

    async fn find_by_document_number(&self, _number: &str) -> anyhow::Result<Vec<StoredRecord>> {
        anyhow::bail!("not used")
    }

    async fn find_by_id(&self, _id: &str) -> anyhow::Result<Option<StoredRecord>> {
        anyhow::bail!("not used")
    }

    async fn insert(&self, _record: ClinicalRecord) -> anyhow::Result<StoredRecord> {
        anyhow::bail!("not used")
    }

    async fn update(&self, _id: &str, _payload: Document) -> anyhow::Result<StoredRecord> {
        anyhow::bail!("not used")
    }

    async fn delete(&self, _id: &str) -> anyhow::Result<bool> {
        anyhow::bail!("not used")
    }
}

#[tokio::test]
async fn superseded_search_response_is_discarded() {
    let ctx = setup();
    let repo = Arc::new(GatedRepo::new());
    let service = RecordService::new(
        repo.clone(),
        ctx.store.clone(),
        HistoriasConfig::default(),
    );
    let seq = Arc::new(SearchSequence::new());

    let slow = {
        let service = service.clone();
        let seq = seq.clone();
        tokio::spawn(async move {
            service
                .search_latest(&seq, &SearchFilters::default(), PageRequest::new(20))
                .await
        })
    };

    // Wait until the first search is inside the store call, then overtake it.
    repo.started.notified().await;
    let newer = service
        .search_latest(&seq, &SearchFilters::default(), PageRequest::new(20))
        .await
        .unwrap();
    assert!(newer.is_some(), "latest search applies its response");

    repo.release.notify_one();
    let stale = slow.await.unwrap().unwrap();
    assert!(stale.is_none(), "superseded response must be discarded");
}
