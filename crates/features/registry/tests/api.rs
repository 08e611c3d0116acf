#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use orc_domain::config::{AppConfig, SeedIssuer};
use orc_domain::records::IssuerRecord;
use orc_domain::slices::InitializedSlice;
use orc_kernel::server::ApiState;
use orc_registry::allocator::{Allocator, CODE_ALPHABET};
use orc_registry::store::{MemoryRegistryStore, MemoryUserStore, seed_record};
use orc_registry::{Registrar, Registry, RegistryInner};
use orc_storage::Storage;
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

async fn app(temp: &TempDir) -> Router {
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();
    let config = AppConfig::default();
    let slice = orc_registry::init(&config, &storage).await.unwrap();
    let state = ApiState::builder().config(config).register_slice(slice).build().unwrap();

    let (router, _) = orc_registry::server::router().split_for_parts();
    router.with_state(state)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn register(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    call(app, request).await
}

#[tokio::test]
async fn validate_reports_verdicts() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp).await;

    assert_eq!(
        get(&app, "/api/validate/frc-2024-000001-abc").await,
        (StatusCode::OK, json!({ "valid": true }))
    );
    assert_eq!(
        get(&app, "/api/validate/FRC-99-1-X").await,
        (StatusCode::OK, json!({ "valid": false, "error": "Invalid ORC format" }))
    );
    assert_eq!(
        get(&app, "/api/validate/ZZZ-2024-000001-ABC").await,
        (StatusCode::OK, json!({ "valid": false, "error": "Unknown issuer code" }))
    );
}

#[tokio::test]
async fn lookup_resolves_the_issuer() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp).await;

    let (status, body) = get(&app, "/api/lookup/frc-2024-000001-abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "orc": "FRC-2024-000001-ABC",
            "issuer": {
                "code": "FRC",
                "name": "Freecords B.V.",
                "website": "www.freecords.com",
                "status": "active",
            },
            "valid": true,
        })
    );
}

#[tokio::test]
async fn lookup_rejects_invalid_identifiers() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp).await;

    assert_eq!(
        get(&app, "/api/lookup/FRC-1900-000001-ABC").await,
        (StatusCode::BAD_REQUEST, json!({ "error": "Invalid year" }))
    );
    assert_eq!(
        get(&app, "/api/lookup/ZZZ-2024-000001-ABC").await,
        (StatusCode::BAD_REQUEST, json!({ "error": "Unknown issuer code" }))
    );
}

#[tokio::test]
async fn registration_flow() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp).await;
    let form = json!({
        "email": "ops@bluenote.example",
        "password": "s3cret",
        "companyName": "Blue Note Records",
        "website": "www.bluenote.example",
        "newsletter": true,
    });

    assert_eq!(
        register(&app, form.clone()).await,
        (StatusCode::OK, json!({ "success": true, "orcCode": "BNR" }))
    );
    assert_eq!(
        register(&app, form).await,
        (StatusCode::BAD_REQUEST, json!({ "error": "User already exists" }))
    );

    let (status, registry) = get(&app, "/api/registry").await;
    assert_eq!(status, StatusCode::OK);
    let entries = registry.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["code"], "BNR");
    assert_eq!(entries[1]["contact"], "ops@bluenote.example");
    assert_eq!(entries[1]["address"], "");
    assert!(entries[1]["created"].as_str().is_some());

    let (status, _) = get(&app, "/api/lookup/BNR-2024-000001-XYZ").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn registration_requires_fields() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp).await;

    assert_eq!(
        register(&app, json!({ "email": "a@b.example", "companyName": "Matador" })).await,
        (StatusCode::BAD_REQUEST, json!({ "error": "Missing required fields" }))
    );
    assert_eq!(
        register(&app, json!({})).await,
        (StatusCode::BAD_REQUEST, json!({ "error": "Missing required fields" }))
    );
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{"))
        .unwrap();

    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn missing_slice_is_an_internal_error() {
    let state = ApiState::builder().config(AppConfig::default()).build().unwrap();
    let (router, _) = orc_registry::server::router().split_for_parts();
    let app = router.with_state(state);

    assert_eq!(
        get(&app, "/api/registry").await,
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal server error" }))
    );
}

#[tokio::test]
async fn exhausted_code_space_is_service_unavailable() {
    let seed = SeedIssuer::default();
    let mut records: Vec<IssuerRecord> = Vec::new();
    for a in CODE_ALPHABET {
        for b in CODE_ALPHABET {
            for c in CODE_ALPHABET {
                let code = [*a, *b, *c].map(char::from).iter().collect();
                records.push(IssuerRecord { code, ..seed_record(&seed) });
            }
        }
    }
    records.extend((1..=99).map(|i| IssuerRecord { code: format!("FR{i}"), ..seed_record(&seed) }));

    let registrar = Registrar::new(
        Arc::new(MemoryRegistryStore::new(records)),
        Arc::new(MemoryUserStore::default()),
        Allocator::new(10),
    );
    let slice = InitializedSlice::new(Registry::new(RegistryInner { registrar }));
    let state = ApiState::builder().config(AppConfig::default()).register_slice(slice).build().unwrap();
    let (router, _) = orc_registry::server::router().split_for_parts();
    let app = router.with_state(state);

    let body = json!({ "email": "full@example.com", "password": "pw", "companyName": "Freecords" });
    assert_eq!(
        register(&app, body).await,
        (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": "No issuer codes available" }))
    );
}
