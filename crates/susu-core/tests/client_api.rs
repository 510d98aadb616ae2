//! Integration tests for the typed API client.

use std::sync::Arc;

use susu_core::api::{ApiErrorKind, Page, SusuClient};
use susu_core::auth::gateway::AuthGateway;
use susu_core::auth::store::TokenStore;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, dir: &tempfile::TempDir) -> SusuClient {
    let store = Arc::new(TokenStore::open(dir.path().join("tokens.json")).unwrap());
    SusuClient::new(AuthGateway::new(server.uri(), store))
}

/// Test: collector login persists the issued credential pair.
#[tokio::test]
async fn test_login_persists_credentials() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/collector/login"))
        .and(body_json(serde_json::json!({
            "phone": "0241234567",
            "pin": "1234",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "issued-access",
            "refresh_token": "issued-refresh",
            "token_type": "bearer",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    assert!(!client.store().is_authenticated());

    let tokens = client.collector_login("0241234567", "1234").await.unwrap();
    assert_eq!(tokens.token_type, "bearer");
    assert_eq!(client.store().access_token().as_deref(), Some("issued-access"));
    assert_eq!(
        client.store().refresh_token().as_deref(),
        Some("issued-refresh")
    );

    // Logout clears the slot again.
    assert!(client.logout().unwrap());
    assert!(!client.store().is_authenticated());
}

/// Test: authenticated GETs attach the bearer header and parse typed models.
#[tokio::test]
async fn test_dashboard_roundtrip() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    client
        .store()
        .set(susu_core::auth::store::CredentialPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        })
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/collectors/me/dashboard"))
        .and(header("authorization", "Bearer access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "collector_id": "col-1",
            "total_clients": 12,
            "active_clients": 11,
            "pending_transactions": 3,
            "total_confirmed_today": 5,
            "next_payout_client": "Ama Mensah",
            "next_payout_date": "2026-09-01",
            "contribution_amount": "10.00",
            "contribution_frequency": "DAILY",
            "period_label": "Today",
            "paid_count": 7,
            "partial_count": 2,
            "unpaid_count": 3,
            "amount_collected": "70.00",
            "amount_expected": "120.00",
            "collection_rate": 58.3,
        })))
        .mount(&server)
        .await;

    let dashboard = client.collector_dashboard().await.unwrap();
    assert_eq!(dashboard.collector_id, "col-1");
    assert_eq!(dashboard.total_clients, 12);
    assert_eq!(dashboard.next_payout_client.as_deref(), Some("Ama Mensah"));
}

/// Test: list endpoints pass pagination and status filters as query params.
#[tokio::test]
async fn test_transactions_query_params() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("GET"))
        .and(path("/api/v1/transactions"))
        .and(query_param("skip", "40"))
        .and(query_param("limit", "20"))
        .and(query_param("status", "PENDING"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [],
            "total": 0,
            "skip": 40,
            "limit": 20,
        })))
        .mount(&server)
        .await;

    let page = client
        .transactions(
            Some(susu_core::api::types::TransactionStatus::Pending),
            Page { skip: 40, limit: 20 },
        )
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.skip, 40);
}

/// Test: backend error details surface in the structured error.
#[tokio::test]
async fn test_error_detail_surfaces() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/collector/login"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "detail": "Invalid phone or PIN" })),
        )
        .mount(&server)
        .await;

    let err = client.collector_login("024", "0000").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus);
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "HTTP 400: Invalid phone or PIN");
    assert!(!client.store().is_authenticated());
}

/// Test: the PDF report endpoint returns raw bytes.
#[tokio::test]
async fn test_monthly_pdf_bytes() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("GET"))
        .and(path("/api/v1/reports/monthly-summary/pdf"))
        .and(query_param("year", "2026"))
        .and(query_param("month", "8"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7 fake".to_vec()),
        )
        .mount(&server)
        .await;

    let bytes = client.monthly_summary_pdf(2026, 8).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
