//! Tests for the sync trigger and inspection endpoints.

mod common;

use axum::http::StatusCode;
use common::{app, body_json, json_request, request, test_state};
use healthflow_api_fhir::ProxyMode;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_bundle(server: &MockServer, kind: &str, resources: Vec<serde_json::Value>) {
    let entries: Vec<_> = resources.into_iter().map(|r| json!({"resource": r})).collect();
    Mock::given(method("GET"))
        .and(path(format!("/{kind}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"resourceType": "Bundle", "entry": entries})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_trigger_full_sync_reports_per_kind_counts() {
    let server = MockServer::start().await;
    mount_bundle(&server, "Patient", vec![json!({"id": "pt-1"}), json!({"id": "pt-2"})]).await;
    mount_bundle(&server, "Encounter", vec![]).await;
    mount_bundle(&server, "Observation", vec![json!({"id": "obs-1"})]).await;
    mount_bundle(&server, "Condition", vec![]).await;

    let (state, store) = test_state(&server.uri(), ProxyMode::Local);
    let response = app(state)
        .oneshot(request("POST", "/sync"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    let reports = body["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 4);
    assert_eq!(reports[0]["resource_type"], "Patient");
    assert_eq!(reports[0]["reconciled"], 2);

    use healthflow_core::ResourceKind;
    use healthflow_db::ResourceStore;
    assert_eq!(store.list(ResourceKind::Patient).await.unwrap().len(), 2);
    assert_eq!(store.list(ResourceKind::Observation).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_trigger_sync_surfaces_upstream_failure_as_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Patient"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (state, _store) = test_state(&server.uri(), ProxyMode::Local);
    let response = app(state)
        .oneshot(request("POST", "/sync"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_trigger_single_kind_sync() {
    let server = MockServer::start().await;
    mount_bundle(&server, "Condition", vec![json!({"id": "cond-1"})]).await;

    let (state, _store) = test_state(&server.uri(), ProxyMode::Local);
    let response = app(state)
        .oneshot(request("POST", "/sync/Condition"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["reports"][0]["resource_type"], "Condition");
    assert_eq!(body["reports"][0]["reconciled"], 1);
}

#[tokio::test]
async fn test_trigger_sync_rejects_bundle_kind() {
    let (state, _store) = test_state("http://registry.invalid", ProxyMode::Local);
    let response = app(state)
        .oneshot(request("POST", "/sync/Bundle"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_bundle_entry_reports_bad_request_but_keeps_prefix() {
    let server = MockServer::start().await;
    mount_bundle(
        &server,
        "Observation",
        vec![
            json!({"id": "obs-1"}),
            json!({"status": "final"}), // no id
            json!({"id": "obs-3"}),
        ],
    )
    .await;

    let (state, store) = test_state(&server.uri(), ProxyMode::Local);
    let response = app(state)
        .oneshot(request("POST", "/sync/Observation"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    use healthflow_core::ResourceKind;
    use healthflow_db::ResourceStore;
    let rows = store.list(ResourceKind::Observation).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fhir_id, "obs-1");
}

#[tokio::test]
async fn test_synced_patients_lists_all_including_inactive() {
    let (state, _store) = test_state("http://registry.invalid", ProxyMode::Local);
    let app = app(state);

    for (id, active) in [("pt-1", true), ("pt-2", false)] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/proxy/Patient",
                json!({"id": id, "active": active}),
            ))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(request("GET", "/sync/patients"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let patients = body.as_array().unwrap();
    assert_eq!(patients.len(), 2, "no active filter on this listing");
    assert!(patients.iter().any(|p| p["active"] == json!(false)));
}
