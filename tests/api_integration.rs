//! Integration tests for the Random Worker API.
//!
//! These tests spin up a real server instance and make HTTP requests to verify
//! the complete request/response cycle.

use std::net::SocketAddr;
use std::sync::Arc;

use regex::Regex;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;
use tokio::net::TcpListener;

use random_worker::api::{AppState, create_router};
use random_worker::config::{
    AppConfig, AuthConfig, FileStorageConfig, GeneratorConfig, StorageBackend, StorageConfig,
};
use random_worker::storage::create_storage;

// ============================================================================
// Test Harness
// ============================================================================

const ADMIN_TOKEN: &str = "test_admin_token_12345";

/// Test server instance.
struct TestServer {
    addr: SocketAddr,
    client: Client,
    temp_dir: TempDir,
}

impl TestServer {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let config = AppConfig {
            storage: StorageConfig {
                backend: StorageBackend::File,
                file: FileStorageConfig {
                    data_dir: temp_dir.path().to_path_buf(),
                },
            },
            generator: GeneratorConfig {
                max_length: 256,
                max_byte_length: 64,
                bcrypt_cost: 4,
            },
            auth: AuthConfig {
                admin_token: ADMIN_TOKEN.to_string(),
            },
            ..Default::default()
        };

        let storage = create_storage(&config.storage)
            .await
            .expect("Failed to create storage");

        let state = AppState::new(Arc::new(config), storage);
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr,
            client: Client::new(),
            temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    async fn get_with_token(&self, path: &str, token: &str) -> Response {
        self.client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Request failed")
    }

    async fn get_admin(&self, path: &str) -> Response {
        self.get_with_token(path, ADMIN_TOKEN).await
    }

    async fn post_admin<T: Serialize>(&self, path: &str, body: &T) -> Response {
        self.client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {ADMIN_TOKEN}"))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    async fn delete_admin(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {ADMIN_TOKEN}"))
            .send()
            .await
            .expect("Request failed")
    }
}

/// API response structure.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    code: i32,
    #[allow(dead_code)]
    message: String,
    data: Option<T>,
}

impl<T> ApiResponse<T> {
    fn is_success(&self) -> bool {
        self.code == 0
    }
}

#[derive(Debug, Deserialize)]
struct StringData {
    name: String,
    result: String,
    id: String,
    length: u32,
    upper: bool,
    numeric: bool,
    min_special: u32,
    bcrypt_hash: Option<String>,
    schema_version: u32,
}

#[derive(Debug, Deserialize)]
struct IdData {
    id: String,
    b64_url: String,
    b64_std: String,
    hex: String,
    dec: String,
    byte_length: u32,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
struct SummaryData {
    kind: String,
    name: String,
}

// ============================================================================
// Health Endpoint Tests
// ============================================================================

#[derive(Debug, Deserialize)]
struct HealthData {
    status: String,
}

#[derive(Debug, Deserialize)]
struct ReadyData {
    ready: bool,
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<HealthData> = response.json().await.unwrap();
    assert!(body.is_success());
    assert_eq!(body.data.unwrap().status, "healthy");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<ReadyData> = response.json().await.unwrap();
    assert!(body.is_success());
    assert!(body.data.unwrap().ready);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    assert!(text.contains("random_worker_up 1"));
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_rejected() {
    let server = TestServer::new().await;
    let response = server.get("/v1/list").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 2001);
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let server = TestServer::new().await;
    let response = server
        .get_with_token("/v1/string?name=anything", "invalid_token")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// String Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_string() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/string",
            &json!({
                "name": "session-key",
                "length": 24,
                "special": false,
                "min_numeric": 4,
                "min_upper": 2
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<StringData> = response.json().await.unwrap();
    assert!(body.is_success());
    let created = body.data.unwrap();

    assert_eq!(created.name, "session-key");
    assert_eq!(created.length, 24);
    assert_eq!(created.id, created.result);
    assert!(created.bcrypt_hash.is_none());
    assert_eq!(created.schema_version, 2);

    let alphanumeric = Regex::new(r"^[A-Za-z0-9]{24}$").unwrap();
    assert!(alphanumeric.is_match(&created.result));
    assert!(Regex::new(r"[0-9]").unwrap().find_iter(&created.result).count() >= 4);
    assert!(Regex::new(r"[A-Z]").unwrap().find_iter(&created.result).count() >= 2);

    let response = server.get_admin("/v1/string?name=session-key").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: ApiResponse<StringData> = response.json().await.unwrap();
    assert_eq!(body.data.unwrap().result, created.result);
}

#[tokio::test]
async fn test_create_string_with_legacy_digit_flag() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/string",
            &json!({
                "name": "both-flags",
                "length": 16,
                "special": false,
                "upper": false,
                "numeric": false,
                "number": true
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<StringData> = response.json().await.unwrap();
    assert!(body.is_success());
    let created = body.data.unwrap();
    assert!(Regex::new(r"^[a-z]{16}$").unwrap().is_match(&created.result));
}

#[tokio::test]
async fn test_override_special_restricts_charset() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/string",
            &json!({
                "name": "symbols",
                "length": 40,
                "upper": false,
                "lower": false,
                "numeric": false,
                "override_special": "#$"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<StringData> = response.json().await.unwrap();
    let result = body.data.unwrap().result;
    assert!(Regex::new(r"^[#$]{40}$").unwrap().is_match(&result));
}

#[tokio::test]
async fn test_unsatisfiable_minimums_rejected() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/string",
            &json!({"name": "short", "length": 4, "min_upper": 3, "min_lower": 3}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 3002);

    let response = server.get_admin("/v1/string?name=short").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_length_rejected() {
    let server = TestServer::new().await;

    let response = server
        .post_admin("/v1/string", &json!({"name": "zero", "length": 0}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .post_admin("/v1/string", &json!({"name": "huge", "length": 257}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_name_rejected() {
    let server = TestServer::new().await;

    let response = server
        .post_admin("/v1/string", &json!({"name": "../escape", "length": 8}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 3001);
}

#[tokio::test]
async fn test_duplicate_string_conflicts() {
    let server = TestServer::new().await;
    let request = json!({"name": "dup", "length": 8});

    let response = server.post_admin("/v1/string", &request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.post_admin("/v1/string", &request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 1002);
}

#[tokio::test]
async fn test_import_string() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/string/import",
            &json!({"name": "legacy", "value": "grüße-123"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<StringData> = response.json().await.unwrap();
    let data = body.data.unwrap();
    assert_eq!(data.result, "grüße-123");
    assert_eq!(data.id, "grüße-123");
    assert_eq!(data.length, 9);
    assert!(data.upper && data.numeric);
    assert_eq!(data.min_special, 0);
}

#[tokio::test]
async fn test_delete_string() {
    let server = TestServer::new().await;

    server
        .post_admin("/v1/string", &json!({"name": "temp", "length": 8}))
        .await;

    let response = server.delete_admin("/v1/string?name=temp").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.get_admin("/v1/string?name=temp").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server.delete_admin("/v1/string?name=temp").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Password Tests
// ============================================================================

#[tokio::test]
async fn test_create_password() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/password",
            &json!({"name": "db-root", "length": 20, "min_special": 2}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<StringData> = response.json().await.unwrap();
    let data = body.data.unwrap();

    assert_eq!(data.id, "none");
    assert_eq!(data.result.chars().count(), 20);
    assert_eq!(data.schema_version, 3);

    let special = Regex::new(r"[!@#$%&*()\-_=+\[\]{}<>:?]").unwrap();
    assert!(special.find_iter(&data.result).count() >= 2);

    let hash = data.bcrypt_hash.unwrap();
    assert!(bcrypt::verify(&data.result, &hash).unwrap());
}

#[tokio::test]
async fn test_import_password() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/password/import",
            &json!({"name": "legacy-db", "value": "hunter2"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<StringData> = response.json().await.unwrap();
    let data = body.data.unwrap();
    assert_eq!(data.result, "hunter2");
    assert_eq!(data.length, 7);
    assert!(bcrypt::verify("hunter2", &data.bcrypt_hash.unwrap()).unwrap());
}

#[tokio::test]
async fn test_legacy_password_upgraded_on_read() {
    let server = TestServer::new().await;

    let path = server
        .temp_dir
        .path()
        .join("records")
        .join("password")
        .join("old.json");
    std::fs::write(
        &path,
        json!({"result": "s3cret!", "number": false, "length": null}).to_string(),
    )
    .unwrap();

    let response = server.get_admin("/v1/password?name=old").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<StringData> = response.json().await.unwrap();
    let data = body.data.unwrap();
    assert_eq!(data.name, "old");
    assert_eq!(data.length, 7);
    assert!(!data.numeric);
    assert_eq!(data.id, "none");
    assert_eq!(data.schema_version, 3);
    assert!(bcrypt::verify("s3cret!", &data.bcrypt_hash.unwrap()).unwrap());

    // Upgrade was written back
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["schema_version"], 3);
    assert!(stored.get("number").is_none());
}

// ============================================================================
// Id Tests
// ============================================================================

#[tokio::test]
async fn test_create_id() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/id",
            &json!({"name": "node", "byte_length": 8, "prefix": "n-"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<IdData> = response.json().await.unwrap();
    let data = body.data.unwrap();

    assert_eq!(data.byte_length, 8);
    assert!(Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap().is_match(&data.id));
    assert_eq!(data.b64_url, format!("n-{}", data.id));
    assert!(Regex::new(r"^n-[A-Za-z0-9+/]{11}=$").unwrap().is_match(&data.b64_std));
    assert!(Regex::new(r"^n-[0-9a-f]{16}$").unwrap().is_match(&data.hex));
    assert!(Regex::new(r"^n-[0-9]+$").unwrap().is_match(&data.dec));
}

#[tokio::test]
async fn test_invalid_byte_length_rejected() {
    let server = TestServer::new().await;

    let response = server
        .post_admin("/v1/id", &json!({"name": "zero", "byte_length": 0}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .post_admin("/v1/id", &json!({"name": "huge", "byte_length": 65}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_import_id() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/id/import",
            &json!({"name": "restored", "value": "srv,-,AP8Qqw"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<IdData> = response.json().await.unwrap();
    let data = body.data.unwrap();
    assert_eq!(data.id, "AP8Qqw");
    assert_eq!(data.b64_url, "srv,-AP8Qqw");
    assert_eq!(data.b64_std, "srv,-AP8Qqw==");
    assert_eq!(data.hex, "srv,-00ff10ab");
    assert_eq!(data.dec, "srv,-16715947");
    assert_eq!(data.byte_length, 4);
}

#[tokio::test]
async fn test_import_id_bad_encoding() {
    let server = TestServer::new().await;

    let response = server
        .post_admin(
            "/v1/id/import",
            &json!({"name": "broken", "value": "p,not*base64"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ApiResponse<()> = response.json().await.unwrap();
    assert_eq!(body.code, 3003);
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_resources() {
    let server = TestServer::new().await;

    server
        .post_admin("/v1/string", &json!({"name": "beta", "length": 8}))
        .await;
    server
        .post_admin("/v1/password", &json!({"name": "alpha", "length": 8}))
        .await;
    server
        .post_admin("/v1/id", &json!({"name": "gamma", "byte_length": 4}))
        .await;

    let response = server.get_admin("/v1/list").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: ApiResponse<Vec<SummaryData>> = response.json().await.unwrap();
    let names: Vec<String> = body.data.unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);

    let response = server.get_admin("/v1/list?kind=password").await;
    let body: ApiResponse<Vec<SummaryData>> = response.json().await.unwrap();
    assert_eq!(
        body.data.unwrap(),
        vec![SummaryData {
            kind: "password".to_string(),
            name: "alpha".to_string(),
        }]
    );
}
