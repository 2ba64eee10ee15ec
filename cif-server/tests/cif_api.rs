//! Router-level tests over the in-memory store

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use cif_server::{
    build_router, CifKeyRow, CifRecord, CifStore, CifUpdate, DbError, MemoryCifStore,
    NewCifRecord, ServerConfig,
};

const BOUNDARY: &str = "cif-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; \
                         filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn app(store: Arc<MemoryCifStore>) -> Router {
    build_router(store, &ServerConfig::default())
}

/// Store whose every statement fails, as a dropped connection would.
struct FailingStore;

fn connection_lost() -> DbError {
    DbError::Constraint("connection lost".into())
}

#[async_trait]
impl CifStore for FailingStore {
    async fn insert(&self, _record: NewCifRecord) -> Result<u64, DbError> {
        Err(connection_lost())
    }

    async fn list(&self) -> Result<Vec<CifRecord>, DbError> {
        Err(connection_lost())
    }

    async fn find_by_key(&self, _cif_key: &str) -> Result<Vec<CifRecord>, DbError> {
        Err(connection_lost())
    }

    async fn update(&self, _cif_key: &str, _changes: CifUpdate) -> Result<(), DbError> {
        Err(connection_lost())
    }

    async fn search_by_name(&self, _member_name: &str) -> Result<Vec<CifRecord>, DbError> {
        Err(connection_lost())
    }

    async fn list_keys(&self) -> Result<Vec<CifKeyRow>, DbError> {
        Err(connection_lost())
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

fn failing_app() -> Router {
    build_router(Arc::new(FailingStore), &ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(app: &Router, parts: &[Part<'_>]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/cif")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

async fn put_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn juan() -> Vec<Part<'static>> {
    vec![
        Part::Text("cifKey", "CIF001"),
        Part::Text("memberName", "Juan Dela Cruz"),
        Part::Text("district", "5"),
    ]
}

async fn seed(store: &MemoryCifStore, key: &str, name: &str) {
    store
        .insert(NewCifRecord {
            cif_key: key.into(),
            member_name: name.into(),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn create_then_get_returns_record_without_files() {
    let app = app(Arc::new(MemoryCifStore::new()));

    let (status, body) = post_form(&app, &juan()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "message": "CIF record added successfully", "insertId": 1 })
    );

    let (status, body) = get(&app, "/cif/CIF001").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["cifKey"], "CIF001");
    assert_eq!(rows[0]["memberName"], "Juan Dela Cruz");
    assert_eq!(rows[0]["district"], 5);
    assert!(rows[0]["signature"].is_null());
    assert!(rows[0]["picture"].is_null());
    assert!(rows[0]["dateCreated"].is_string());
}

#[tokio::test]
async fn create_stores_uploaded_files() {
    let store = Arc::new(MemoryCifStore::new());
    let app = app(store.clone());

    let mut parts = juan();
    parts.push(Part::File("signature", "sig.png", &[0x89, 0x50, 0x4e, 0x47]));
    parts.push(Part::File("picture", "photo.jpg", &[0xff, 0xd8, 0xff]));

    let (status, _) = post_form(&app, &parts).await;
    assert_eq!(status, StatusCode::CREATED);

    let rows = store.find_by_key("CIF001").await.unwrap();
    assert_eq!(rows[0].signature.as_deref(), Some(&[0x89, 0x50, 0x4e, 0x47][..]));
    assert_eq!(rows[0].picture.as_deref(), Some(&[0xff, 0xd8, 0xff][..]));

    let (_, body) = get(&app, "/cif/CIF001").await;
    assert_eq!(body[0]["signature"], "iVBORw==");
    assert_eq!(body[0]["picture"], "/9j/");
}

#[tokio::test]
async fn duplicate_key_is_generic_500() {
    let app = app(Arc::new(MemoryCifStore::new()));
    post_form(&app, &juan()).await;

    let (status, body) = post_form(&app, &juan()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to add CIF record" }));
}

#[tokio::test]
async fn create_with_bad_district_is_500() {
    let app = app(Arc::new(MemoryCifStore::new()));
    let parts = [
        Part::Text("cifKey", "CIF002"),
        Part::Text("memberName", "Ana"),
        Part::Text("district", "five"),
    ];

    let (status, body) = post_form(&app, &parts).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to add CIF record" }));

    let (_, body) = get(&app, "/cif").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_without_multipart_body_is_500() {
    let app = app(Arc::new(MemoryCifStore::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/cif")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "cifKey": "CIF001" }).to_string()))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to add CIF record" }));
}

#[tokio::test]
async fn create_with_two_signatures_is_500() {
    let app = app(Arc::new(MemoryCifStore::new()));
    let mut parts = juan();
    parts.push(Part::File("signature", "a.png", b"a"));
    parts.push(Part::File("signature", "b.png", b"b"));

    let (status, _) = post_form(&app, &parts).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn list_returns_every_row() {
    let store = Arc::new(MemoryCifStore::new());
    seed(&store, "A1", "Ana").await;
    seed(&store, "B2", "Ben").await;
    let app = app(store);

    let (status, body) = get(&app, "/cif").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_empty_table_is_empty_array() {
    let app = app(Arc::new(MemoryCifStore::new()));
    let (status, body) = get(&app, "/cif").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_missing_key_is_empty_200() {
    let app = app(Arc::new(MemoryCifStore::new()));
    let (status, body) = get(&app, "/cif/NOPE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_missing_key_is_404_and_changes_nothing() {
    let store = Arc::new(MemoryCifStore::new());
    seed(&store, "A1", "Ana").await;
    let before = store.list().await.unwrap();
    let app = app(store.clone());

    let (status, body) = put_json(&app, "/cif/NOPE", json!({ "memberName": "Ghost" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "CIF record not found" }));
    assert_eq!(store.list().await.unwrap(), before);
}

#[tokio::test]
async fn update_changes_only_scalar_fields() {
    let created = Utc::now() - chrono::Duration::days(30);
    let original = NewCifRecord {
        cif_key: "CIF001".into(),
        member_name: "Juan Dela Cruz".into(),
        spouse: Some("Maria".into()),
        district: Some(5),
        signature: Some(vec![1, 2, 3]),
        picture: Some(vec![4, 5, 6]),
        ..Default::default()
    }
    .into_record(created);
    let store = Arc::new(MemoryCifStore::with_records(vec![original.clone()]));
    let app = app(store.clone());

    let (status, body) = put_json(
        &app,
        "/cif/CIF001",
        json!({
            "memberName": "Juan D. Cruz",
            "spouse": "Maria C. Cruz",
            "sitioPurok": "Purok 3",
            "barangay": "San Isidro",
            "municipality": "Tagum",
            "district": 2
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "CIF record updated successfully" }));

    let updated = store.find_by_key("CIF001").await.unwrap().remove(0);
    assert_eq!(updated.member_name, "Juan D. Cruz");
    assert_eq!(updated.spouse.as_deref(), Some("Maria C. Cruz"));
    assert_eq!(updated.sitio_purok.as_deref(), Some("Purok 3"));
    assert_eq!(updated.barangay.as_deref(), Some("San Isidro"));
    assert_eq!(updated.municipality.as_deref(), Some("Tagum"));
    assert_eq!(updated.district, Some(2));
    assert_eq!(updated.cif_key, original.cif_key);
    assert_eq!(updated.signature, original.signature);
    assert_eq!(updated.picture, original.picture);
    assert_eq!(updated.date_created, original.date_created);
}

#[tokio::test]
async fn update_with_malformed_body_is_500() {
    let store = Arc::new(MemoryCifStore::new());
    seed(&store, "A1", "Ana").await;
    let app = app(store);

    let changes = json!({ "memberName": "Ana", "district": "two" });
    let (status, body) = put_json(&app, "/cif/A1", changes).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to update CIF record" }));
}

#[tokio::test]
async fn search_is_exact_match() {
    let store = Arc::new(MemoryCifStore::new());
    seed(&store, "A1", "Jane Doe").await;
    seed(&store, "A2", "Jane").await;
    let app = app(store);

    let (status, body) = get(&app, "/cif/search/Jane").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["cifKey"], "A2");

    let (_, body) = get(&app, "/cif/search/Jane%20Doe").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["cifKey"], "A1");
}

#[tokio::test]
async fn raffle_tickets_list_one_key_per_row() {
    let store = Arc::new(MemoryCifStore::new());
    for key in ["T1", "T2", "T3"] {
        seed(&store, key, "Member").await;
    }
    let app = app(store);

    let (status, body) = get(&app, "/raffle-tickets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "cifKey": "T1" }, { "cifKey": "T2" }, { "cifKey": "T3" }])
    );
}

#[tokio::test]
async fn health_is_ok() {
    let app = app(Arc::new(MemoryCifStore::new()));
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn reads_report_generic_500_when_storage_fails() {
    let app = failing_app();

    for uri in ["/cif", "/cif/CIF001", "/cif/search/Juan", "/raffle-tickets"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, json!({ "error": "Failed to execute query" }), "{uri}");
    }
}

#[tokio::test]
async fn update_reports_generic_500_when_storage_fails() {
    let app = failing_app();

    let (status, body) = put_json(&app, "/cif/CIF001", json!({ "memberName": "Juan" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to update CIF record" }));
}

#[tokio::test]
async fn create_reports_generic_500_when_storage_fails() {
    let (status, body) = post_form(&failing_app(), &juan()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to add CIF record" }));
}
