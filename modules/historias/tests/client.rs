//! The local gateway exercised through the public contract trait,
//! including error mapping and write sanitization end to end.

mod common;

use serde_json::json;

use docstore::{DocumentStore, PageRequest};
use historias::contract::client::HistoriasApi;
use historias::contract::error::HistoriasError;
use historias::contract::model::{Role, SearchFilters};
use historias::gateways::local::LocalClient;

use common::{new_record, setup};

fn doc(v: serde_json::Value) -> docstore::Document {
    match v {
        serde_json::Value::Object(m) => m,
        _ => panic!("expected object"),
    }
}

#[tokio::test]
async fn record_lifecycle_through_the_contract() {
    let ctx = setup();
    let client = LocalClient::new(ctx.records.clone(), ctx.profiles.clone());

    let stored = client
        .create_record(Some("p-1".to_string()), new_record("12345678", "Ana", "Flores"))
        .await
        .unwrap();

    let fetched = client.get_record(&stored.id).await.unwrap();
    assert_eq!(fetched.record.document_number, "12345678");

    let results = client
        .search_records(
            SearchFilters::from_pairs([("patient_last_name", "Flores")]),
            PageRequest::new(20),
        )
        .await
        .unwrap();
    assert_eq!(results.total, 1);

    client.delete_record(&stored.id).await.unwrap();
    let err = client.get_record(&stored.id).await.unwrap_err();
    assert!(matches!(err, HistoriasError::NotFound { .. }));
}

#[tokio::test]
async fn update_drops_client_only_fields_before_the_store() {
    let ctx = setup();
    let client = LocalClient::new(ctx.records.clone(), ctx.profiles.clone());
    let stored = client
        .create_record(None, new_record("12345678", "Ana", "Flores"))
        .await
        .unwrap();

    let updated = client
        .update_record(
            &stored.id,
            doc(json!({
                "condition": "Alta",
                "foo": "client-only state",
                "$id": "forged-id",
            })),
        )
        .await
        .unwrap();
    assert_eq!(updated.record.condition, "Alta");
    assert_eq!(updated.id, stored.id);

    // The raw document confirms nothing off the allow-list was written.
    let raw = ctx
        .store
        .get_document(&ctx.config.records_collection, &stored.id)
        .await
        .unwrap();
    assert!(!raw.data.contains_key("foo"));
    assert!(!raw.data.contains_key("$id"));
}

#[tokio::test]
async fn update_with_no_persistable_fields_is_a_validation_error() {
    let ctx = setup();
    let client = LocalClient::new(ctx.records.clone(), ctx.profiles.clone());
    let stored = client
        .create_record(None, new_record("12345678", "Ana", "Flores"))
        .await
        .unwrap();

    let err = client
        .update_record(&stored.id, doc(json!({"foo": 1, "bar": 2})))
        .await
        .unwrap_err();
    assert!(matches!(err, HistoriasError::Validation { .. }));
}

#[tokio::test]
async fn duplicate_identity_surfaces_as_a_contract_error() {
    let ctx = setup();
    let client = LocalClient::new(ctx.records.clone(), ctx.profiles.clone());
    client
        .create_record(None, new_record("12345678", "Ana", "Flores"))
        .await
        .unwrap();

    let err = client
        .create_record(None, new_record("12345678", "María", "Torres"))
        .await
        .unwrap_err();
    assert!(matches!(err, HistoriasError::DuplicateIdentity { .. }));
}

#[tokio::test]
async fn profile_administration_through_the_contract() {
    let ctx = setup();
    let client = LocalClient::new(ctx.records.clone(), ctx.profiles.clone());

    let principal = ctx.store.register_account("Rosa Díaz", "rosa@clinica.pe", "x");
    let profile = ctx.profiles.ensure_profile(&principal).await.unwrap();

    let toggled = client.toggle_role(&profile.id).await.unwrap();
    assert_eq!(toggled.role, Role::Admin);
    let toggled_back = client.toggle_role(&profile.id).await.unwrap();
    assert_eq!(toggled_back.role, Role::User);

    assert_eq!(client.list_profiles().await.unwrap().len(), 1);
    client.delete_profile(&profile.id).await.unwrap();
    assert!(client.list_profiles().await.unwrap().is_empty());

    let err = client.delete_profile(&profile.id).await.unwrap_err();
    assert!(matches!(err, HistoriasError::NotFound { .. }));
}

#[tokio::test]
async fn stats_flow_through_the_contract() {
    let ctx = setup();
    let client = LocalClient::new(ctx.records.clone(), ctx.profiles.clone());
    client
        .create_record(None, new_record("12345678", "Ana", "Flores"))
        .await
        .unwrap();

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.total_records, 1);
    assert_eq!(stats.per_year[&2024], 1);
}
