//! Integration tests for the WooCommerce client.
//!
//! These tests run the full export pipeline against a wiremock server that
//! plays the JWT token endpoint and the categories endpoint.

use chrono::{Local, TimeZone};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wooflat::api::woocommerce::CATEGORIES_PATH;
use wooflat::api::{ApiError, WooCommerceClient};
use wooflat::auth::{AuthError, Credentials, TOKEN_PATH};
use wooflat::core::types::{FlatEntry, RawCategory};
use wooflat::export::{run_export, ExportError, ExportRequest};
use wooflat::ui::output::Verbosity;

// =============================================================================
// Fixtures
// =============================================================================

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_json(json!({"username": "admin", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-123",
            "user_email": "admin@example.com",
            "user_nicename": "admin"
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(CATEGORIES_PATH))
        .and(query_param("page", page.to_string()))
        .and(query_param("per_page", "2"))
        .and(header("authorization", "Bearer jwt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn request(dir: &TempDir) -> ExportRequest {
    ExportRequest {
        credentials: Credentials::new("admin", "secret"),
        per_page: 2,
        output_dir: dir.path().to_path_buf(),
        host: "shop-example-com".into(),
        write_raw: true,
        started_at: Local.with_ymd_and_hms(2024, 1, 31, 23, 59, 58).unwrap(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> T {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// End-to-end export
// =============================================================================

#[tokio::test]
async fn export_logs_in_and_walks_every_page() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_page(
        &server,
        1,
        json!([
            {"id": 10, "name": "Tees", "slug": "tees", "parent": 11, "count": 4},
            {"id": 11, "name": "Clothing", "slug": "clothing", "parent": 0, "count": 9}
        ]),
    )
    .await;
    mount_page(
        &server,
        2,
        json!([
            {"id": 12, "name": "Graphic", "slug": "graphic", "parent": 10},
            {"id": 13, "name": "Lost", "slug": "lost", "parent": 404}
        ]),
    )
    .await;
    mount_page(&server, 3, json!([])).await;

    let dir = TempDir::new().unwrap();
    let client = WooCommerceClient::new(server.uri());
    let outcome = run_export(&client, &request(&dir), Verbosity::Quiet)
        .await
        .unwrap();

    assert_eq!(outcome.fetched, 4);
    assert_eq!(outcome.report.orphan_names(), vec!["Lost"]);

    let expected_name = "exported-categories-shop-example-com-2024-01-31-235958.json";
    assert_eq!(outcome.flattened_path, dir.path().join(expected_name));

    let entries: Vec<FlatEntry> = read_json(&outcome.flattened_path);
    let summary: Vec<(&str, Vec<&str>)> = entries
        .iter()
        .map(|e| (e.label.as_str(), e.slugs().collect()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Clothing", vec!["clothing"]),
            ("Clothing > Tees", vec!["tees", "clothing"]),
            (
                "Clothing > Tees > Graphic",
                vec!["graphic", "tees", "clothing"]
            ),
        ]
    );

    let raw: Vec<RawCategory> = read_json(outcome.raw_path.as_ref().unwrap());
    assert_eq!(raw.len(), 4);
    assert_eq!(raw[0].extra.get("count"), Some(&json!(4)));
}

#[tokio::test]
async fn rejected_login_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "[jwt_auth] incorrect_password",
            "message": "The password you entered is incorrect.",
            "data": {"status": 403}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CATEGORIES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = WooCommerceClient::new(server.uri());
    let err = run_export(&client, &request(&dir), Verbosity::Quiet)
        .await
        .unwrap_err();

    match err {
        ExportError::Api(ApiError::Auth(auth)) => {
            assert!(auth.is_bad_credentials());
            assert_eq!(
                auth,
                AuthError::Rejected {
                    status: 403,
                    message: "The password you entered is incorrect.".into()
                }
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn server_error_mid_pagination_aborts() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_page(
        &server,
        1,
        json!([{"id": 1, "name": "A", "slug": "a", "parent": 0}]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(CATEGORIES_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = WooCommerceClient::new(server.uri());
    let err = run_export(&client, &request(&dir), Verbosity::Quiet)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::Api(ApiError::Api { status: 502, .. })
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
