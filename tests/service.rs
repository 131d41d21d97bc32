//! End-to-end tests over the axum surface with an in-memory record store.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use invoicepress::config::{Config, LimitsConfig, RecordStoreConfig, ServerConfig};
use invoicepress::{build_router, state::AppState};
use invoicepress_model::fields::{header as header_fields, line_item, payee};
use invoicepress_model::{LineItemRef, RawRecord};
use invoicepress_render::{LopdfEngine, RenderEngine};
use invoicepress_store::{RecordStore, StoreError};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn record(pairs: Vec<(&str, Value)>) -> RawRecord {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn header_record() -> RawRecord {
    record(vec![
        (header_fields::INVOICE_NAME, json!("#007")),
        (header_fields::INVOICE_DATE, json!("2024-01-03")),
        (header_fields::PROJECT, json!("Website refresh")),
        (header_fields::PROJECT_CODE, json!("WR-12")),
        (header_fields::DESCRIPTION, json!("Design and build")),
        (
            header_fields::CLIENT_CONTACT,
            json!("accounts@client.example"),
        ),
        (header_fields::SUBTOTAL, json!("100.00")),
        (header_fields::VAT, json!("20.00")),
        (header_fields::TOTAL, json!("120.00")),
    ])
}

fn item_record(description: &str) -> RawRecord {
    record(vec![
        (line_item::DESCRIPTION, json!(description)),
        (line_item::QUANTITY, json!(2)),
        (line_item::RATE, json!("50.00")),
        (line_item::TOTAL, json!("100.00")),
    ])
}

fn payee_record() -> RawRecord {
    record(vec![
        (payee::ADDRESS, json!("1 High Street")),
        (payee::CONTACT_NAME, json!("J. Unwin")),
        (payee::CONTACT_EMAIL, json!("josh@example.com")),
        (payee::CONTACT_NUMBER, json!("07000 000000")),
        (payee::PAYEE_NAME, json!("Josh Unwin")),
        (payee::ACCOUNT_NUMBER, json!("12345678")),
        (payee::SORT_CODE, json!("01-02-03")),
        (payee::VAT_NUMBER, json!("GB123456789")),
    ])
}

struct FakeStore {
    fail_header: bool,
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn get_header(&self, _invoice_row_id: &str) -> Result<RawRecord, StoreError> {
        if self.fail_header {
            return Err(StoreError::Status {
                status: 503,
                url: "rows/i-42".into(),
            });
        }
        Ok(header_record())
    }

    async fn get_line_item_refs(
        &self,
        _invoice_row_id: &str,
    ) -> Result<Vec<LineItemRef>, StoreError> {
        Ok(vec![
            LineItemRef {
                table_id: "grid-items".into(),
                row_id: "i-1".into(),
            },
            LineItemRef {
                table_id: "grid-items".into(),
                row_id: "i-2".into(),
            },
        ])
    }

    async fn get_line_item(
        &self,
        _table_id: &str,
        row_id: &str,
    ) -> Result<RawRecord, StoreError> {
        Ok(item_record(&format!("Work item {row_id}")))
    }

    async fn get_payee_info(&self) -> Result<RawRecord, StoreError> {
        Ok(payee_record())
    }
}

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        store: RecordStoreConfig {
            endpoint_base: "https://coda.io/apis/v1".into(),
            doc_id: "_doc".into(),
            invoice_table_id: "grid-invoices".into(),
            payee_table_id: "grid-payee".into(),
            payee_row_id: "i-payee".into(),
        },
        limits: LimitsConfig {
            max_concurrent_renders: 2,
            aggregate_deadline_ms: 5_000,
        },
    }
}

fn app(fail_header: bool) -> axum::Router {
    let store: Arc<dyn RecordStore> = Arc::new(FakeStore { fail_header });
    let engine: Arc<dyn RenderEngine> = Arc::new(LopdfEngine::new());
    build_router(AppState::new(store, engine, test_config()))
}

#[tokio::test]
async fn invoice_request_returns_a_pdf() {
    let response = app(false)
        .oneshot(
            Request::builder()
                .uri("/invoice?row=i-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn missing_row_parameter_is_a_bad_request() {
    let response = app(false)
        .oneshot(
            Request::builder()
                .uri("/invoice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload["error"], "InvalidRequest");
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let response = app(true)
        .oneshot(
            Request::builder()
                .uri("/invoice?row=i-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let payload: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(payload["error"], "DataUnavailable");
}

#[tokio::test]
async fn health_check_is_unauthenticated_and_ok() {
    let response = app(false)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
