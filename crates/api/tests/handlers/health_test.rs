use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tablebook_core::errors::BookingError;
use tablebook_db::mock::MockBookingRepo;
use tablebook_mail::mock::MockNotifier;

use crate::test_utils::{TestContext, server_with};

#[tokio::test]
async fn test_health_reports_table_count() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok", "tables": 4 }));
}

#[tokio::test]
async fn test_health_when_store_is_down() {
    let mut repository = MockBookingRepo::new();
    repository
        .expect_list_tables()
        .returning(|| Err(BookingError::Database(eyre::eyre!("pool timed out"))));
    let server = server_with(Arc::new(repository), MockNotifier::new());

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>(), json!({ "status": "unavailable" }));
}

#[tokio::test]
async fn test_version() {
    let server = TestContext::new().server();

    let response = server.get("/version").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>()["version"],
        json!(env!("CARGO_PKG_VERSION"))
    );
}
