use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tablebook_api::handlers::order::NOTIFICATION_FAILED_MESSAGE;
use tablebook_core::models::MessageResponse;
use tablebook_db::mock::InMemoryBookingRepository;
use tablebook_mail::{DisabledNotifier, mock::MockNotifier};

use crate::test_utils::{CAPACITIES, server_with};

fn order() -> Value {
    json!({
        "name": "Bob",
        "phone": "555-0100",
        "address": "1 Main St",
        "orderDetails": "2x Margherita",
        "totalPrice": 23.5
    })
}

fn repository() -> Arc<InMemoryBookingRepository> {
    Arc::new(InMemoryBookingRepository::with_capacities(CAPACITIES))
}

#[tokio::test]
async fn test_place_order_sends_notification() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(|subject, body| {
            subject.to_string() == "New Food Order from Bob"
                && body.contains("Phone: 555-0100")
                && body.contains("Address: 1 Main St")
                && body.contains("2x Margherita")
                && body.contains("Total Price: $23.5")
        })
        .times(1)
        .returning(|_, _| Ok(()));
    let server = server_with(repository(), notifier);

    let response = server.post("/place_order").json(&order()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<MessageResponse>().message,
        "Order received and email sent."
    );
}

#[tokio::test]
async fn test_place_order_accepts_string_price() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .withf(|_, body| body.contains("Total Price: $12.00"))
        .times(1)
        .returning(|_, _| Ok(()));
    let server = server_with(repository(), notifier);

    let mut body = order();
    body["totalPrice"] = json!("12.00");
    let response = server.post("/place_order").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_place_order_relay_failure() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_notify()
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("connection refused")));
    let server = server_with(repository(), notifier);

    let response = server.post("/place_order").json(&order()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<MessageResponse>().message,
        NOTIFICATION_FAILED_MESSAGE
    );
}

#[test_log::test(tokio::test)]
async fn test_place_order_without_mail_credentials() {
    let server = server_with(repository(), DisabledNotifier);

    let response = server.post("/place_order").json(&order()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[rstest]
#[case("name")]
#[case("phone")]
#[case("address")]
#[case("orderDetails")]
#[case("totalPrice")]
#[tokio::test]
async fn test_place_order_requires_every_field(#[case] field: &str) {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().times(0);
    let server = server_with(repository(), notifier);

    let mut body = order();
    if let Some(fields) = body.as_object_mut() {
        fields.remove(field);
    }
    let response = server.post("/place_order").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<MessageResponse>().message.contains(field));
}

#[tokio::test]
async fn test_place_order_non_json_body() {
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().times(0);
    let server = server_with(repository(), notifier);

    let response = server.post("/place_order").text("pizza please").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
