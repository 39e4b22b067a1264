//! Integration tests for the sync orchestrator against a mock registry.

use healthflow_core::ResourceKind;
use healthflow_db::{MemoryResourceStore, ResourceStore};
use healthflow_registry_client::RegistryClient;
use healthflow_sync::{SyncError, SyncService};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> (SyncService, Arc<MemoryResourceStore>) {
    let store = Arc::new(MemoryResourceStore::new());
    let client = Arc::new(RegistryClient::with_http_client(
        server.uri(),
        reqwest::Client::new(),
    ));
    (
        SyncService::new(client, store.clone() as Arc<dyn ResourceStore>),
        store,
    )
}

fn bundle(resources: &[serde_json::Value]) -> serde_json::Value {
    json!({
        "resourceType": "Bundle",
        "entry": resources.iter().map(|r| json!({"resource": r})).collect::<Vec<_>>(),
    })
}

async fn mount_bundle(server: &MockServer, kind: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{kind}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sync_type_persists_bundle_entries_verbatim() {
    let server = MockServer::start().await;
    let pt1 = json!({"id": "pt-1", "resourceType": "Patient", "gender": "male"});
    let pt2 = json!({"id": "pt-2", "resourceType": "Patient"});
    mount_bundle(&server, "Patient", bundle(&[pt1.clone(), pt2.clone()])).await;

    let (service, store) = service(&server);
    let report = service.sync_type(ResourceKind::Patient).await.unwrap();
    assert_eq!(report.reconciled, 2);

    let mut rows = store.list(ResourceKind::Patient).await.unwrap();
    rows.sort_by(|a, b| a.fhir_id.cmp(&b.fhir_id));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].fhir_id, "pt-1");
    assert_eq!(rows[0].resource_data, pt1);
    assert_eq!(rows[1].fhir_id, "pt-2");
    assert_eq!(rows[1].resource_data, pt2);
}

#[tokio::test]
async fn test_sync_type_twice_is_idempotent() {
    let server = MockServer::start().await;
    mount_bundle(
        &server,
        "Patient",
        bundle(&[json!({"id": "pt-1", "resourceType": "Patient"})]),
    )
    .await;

    let (service, store) = service(&server);
    service.sync_type(ResourceKind::Patient).await.unwrap();
    let first = store
        .find_by_fhir_id(ResourceKind::Patient, "pt-1")
        .await
        .unwrap()
        .unwrap();

    service.sync_type(ResourceKind::Patient).await.unwrap();
    let second = store
        .find_by_fhir_id(ResourceKind::Patient, "pt-1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(store.list(ResourceKind::Patient).await.unwrap().len(), 1);
    assert_eq!(second.id, first.id);
    assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn test_malformed_entry_aborts_rest_of_batch() {
    let server = MockServer::start().await;
    mount_bundle(
        &server,
        "Observation",
        bundle(&[
            json!({"id": "obs-1", "subject": {"reference": "Patient/p1"}}),
            json!({"id": "obs-2"}),
            json!({"status": "final"}), // no id
            json!({"id": "obs-4"}),
        ]),
    )
    .await;

    let (service, store) = service(&server);
    let err = service.sync_type(ResourceKind::Observation).await.unwrap_err();
    match err {
        SyncError::MalformedEntry { kind, index, .. } => {
            assert_eq!(kind, ResourceKind::Observation);
            assert_eq!(index, 2);
        }
        other => panic!("expected MalformedEntry, got {other:?}"),
    }

    // Entries before the failure stay committed; the entry after it was
    // never processed.
    let mut ids: Vec<String> = store
        .list(ResourceKind::Observation)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.fhir_id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["obs-1", "obs-2"]);
}

#[tokio::test]
async fn test_sync_type_fails_fast_when_fetch_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Condition"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (service, store) = service(&server);
    let err = service.sync_type(ResourceKind::Condition).await.unwrap_err();
    assert!(matches!(err, SyncError::Upstream(_)));
    assert!(store.list(ResourceKind::Condition).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_all_covers_all_clinical_kinds() {
    let server = MockServer::start().await;
    mount_bundle(&server, "Patient", bundle(&[json!({"id": "pt-1"})])).await;
    mount_bundle(
        &server,
        "Encounter",
        bundle(&[json!({"id": "enc-1", "subject": {"reference": "Patient/pt-1"}})]),
    )
    .await;
    mount_bundle(&server, "Observation", bundle(&[])).await;
    mount_bundle(&server, "Condition", bundle(&[json!({"id": "cond-1"})])).await;

    let (service, store) = service(&server);
    let reports = service.sync_all().await.unwrap();

    assert_eq!(reports.len(), 4);
    let counts: Vec<usize> = reports.iter().map(|r| r.reconciled).collect();
    assert_eq!(counts, vec![1, 1, 0, 1]);

    let encounter = store
        .find_by_fhir_id(ResourceKind::Encounter, "enc-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(encounter.patient_fhir_id.as_deref(), Some("pt-1"));
}

#[tokio::test]
async fn test_sync_all_aborts_subsequent_kinds_on_failure() {
    let server = MockServer::start().await;
    mount_bundle(&server, "Patient", bundle(&[json!({"id": "pt-1"})])).await;
    Mock::given(method("GET"))
        .and(path("/Encounter"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    // Mounted but must never be reached: the Encounter failure stops the
    // sequence first.
    mount_bundle(&server, "Observation", bundle(&[json!({"id": "obs-1"})])).await;
    mount_bundle(&server, "Condition", bundle(&[json!({"id": "cond-1"})])).await;

    let (service, store) = service(&server);
    let err = service.sync_all().await.unwrap_err();
    assert!(matches!(err, SyncError::Upstream(_)));

    // Patient committed before the failure; later kinds never synced.
    assert_eq!(store.list(ResourceKind::Patient).await.unwrap().len(), 1);
    assert!(store.list(ResourceKind::Observation).await.unwrap().is_empty());
    assert!(store.list(ResourceKind::Condition).await.unwrap().is_empty());
}
