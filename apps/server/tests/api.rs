use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use orc_server::Server;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

async fn app(temp: &TempDir) -> Router {
    Server::builder().data_dir(temp.path().join("data")).build().await.unwrap().router()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Request::get(uri).body(Body::empty()).unwrap()).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn build_seeds_the_data_directory() {
    let temp = TempDir::new().unwrap();
    let _app = app(&temp).await;

    assert!(temp.path().join("data/registry.json").is_file());
    assert!(temp.path().join("data/users.json").is_file());
}

#[tokio::test]
async fn health_is_served() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp).await;

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
}

#[tokio::test]
async fn docs_are_served() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp).await;

    let (status, body) = send(&app, Request::get("/docs").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains("/api/register"));
}

#[tokio::test]
async fn registered_issuer_validates_after_restart() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp).await;

    let request = Request::post("/api/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "email": "hello@subpop.example",
                "password": "loser",
                "companyName": "Sub Pop Ltd.",
            })
            .to_string(),
        ))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({ "success": true, "orcCode": "SPU" }));

    let restarted = self::app(&temp).await;
    assert_eq!(
        get_json(&restarted, "/api/validate/spu-2024-000001-abc").await,
        (StatusCode::OK, json!({ "valid": true }))
    );

    let (_, registry) = get_json(&restarted, "/api/registry").await;
    let codes: Vec<&str> =
        registry.as_array().unwrap().iter().filter_map(|entry| entry["code"].as_str()).collect();
    assert_eq!(codes, ["FRC", "SPU"]);
}
