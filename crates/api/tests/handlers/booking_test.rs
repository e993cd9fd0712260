use std::sync::Arc;

use axum::http::StatusCode;
use fake::{Fake, faker::name::en::Name};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tablebook_api::{
    handlers::booking::NO_TABLES_MESSAGE, middleware::error_handling::SERVER_ERROR_MESSAGE,
};
use tablebook_core::{errors::BookingError, models::MessageResponse};
use tablebook_db::mock::{InMemoryBookingRepository, MockBookingRepo};
use tablebook_mail::mock::MockNotifier;

use crate::test_utils::{TestContext, server_with};

fn booking(name: &str, guests: Value, date: &str, time: &str) -> Value {
    json!({ "name": name, "guests": guests, "date": date, "time": time })
}

#[tokio::test]
async fn test_book_table_picks_smallest_sufficient_table() {
    let mut ctx = TestContext::new();
    ctx.notifier
        .expect_notify()
        .withf(|subject, body| {
            subject.to_string() == "New Table Booking from Alice"
                && body.contains("Number of Guests: 3")
                && body.contains("Assigned Table ID: 2")
        })
        .times(1)
        .returning(|_, _| Ok(()));
    let repository = ctx.repository.clone();
    let server = ctx.server();

    let response = server
        .post("/book_table")
        .json(&booking("Alice", json!(3), "2024-06-01", "19:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.json::<MessageResponse>().message,
        "Table for 3 booked successfully for Alice!"
    );

    let bookings = repository.bookings().await;
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].table_id, 2);
    assert_eq!(bookings[0].guests, 3);
}

#[tokio::test]
async fn test_book_table_accepts_numeric_string_guests() {
    let ctx = TestContext::new().notifier_always_ok();
    let repository = ctx.repository.clone();
    let server = ctx.server();

    let response = server
        .post("/book_table")
        .json(&booking("Bob", json!("4"), "2024-06-01", "19:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(repository.bookings().await[0].guests, 4);
}

#[tokio::test]
async fn test_book_table_party_too_large() {
    let mut ctx = TestContext::new();
    ctx.notifier.expect_notify().times(0);
    let repository = ctx.repository.clone();
    let server = ctx.server();

    let response = server
        .post("/book_table")
        .json(&booking("Carol", json!(7), "2024-06-01", "19:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<MessageResponse>().message, NO_TABLES_MESSAGE);
    assert!(repository.bookings().await.is_empty());
}

#[tokio::test]
async fn test_book_table_fills_slot_then_conflicts() {
    let ctx = TestContext::new().notifier_always_ok();
    let repository = ctx.repository.clone();
    let server = ctx.server();

    // Tables of capacity 4, 4 and 6 seat a party of 4
    for _ in 0..3 {
        let name: String = Name().fake();
        let response = server
            .post("/book_table")
            .json(&booking(&name, json!(4), "2024-06-01", "20:00"))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = server
        .post("/book_table")
        .json(&booking("Late Larry", json!(4), "2024-06-01", "20:00"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let mut tables: Vec<i32> = repository.bookings().await.iter().map(|b| b.table_id).collect();
    tables.sort();
    assert_eq!(tables, vec![2, 3, 4]);

    // The two-seat table is still free for a couple
    let response = server
        .post("/book_table")
        .json(&booking("Dana", json!(2), "2024-06-01", "20:00"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_same_table_on_a_different_slot() {
    let ctx = TestContext::with_repository(InMemoryBookingRepository::with_capacities(&[4]))
        .notifier_always_ok();
    let repository = ctx.repository.clone();
    let server = ctx.server();

    for (date, time) in [("2024-06-01", "19:00"), ("2024-06-01", "21:00"), ("2024-06-02", "19:00")] {
        let response = server
            .post("/book_table")
            .json(&booking("Erin", json!(2), date, time))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    assert_eq!(repository.bookings().await.len(), 3);
}

#[tokio::test]
async fn test_lost_race_reports_unavailable() {
    let repository = InMemoryBookingRepository::with_capacities(&[4]).with_stale_reads();
    let ctx = TestContext::with_repository(repository).notifier_always_ok();
    let repository = ctx.repository.clone();
    let server = ctx.server();

    let first = server
        .post("/book_table")
        .json(&booking("Frank", json!(2), "2024-06-01", "19:00"))
        .await;
    let second = server
        .post("/book_table")
        .json(&booking("Grace", json!(2), "2024-06-01", "19:00"))
        .await;

    assert_eq!(first.status_code(), StatusCode::CREATED);
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    assert_eq!(second.json::<MessageResponse>().message, NO_TABLES_MESSAGE);
    assert_eq!(repository.bookings().await.len(), 1);
}

#[tokio::test]
async fn test_notification_failure_keeps_booking() {
    let mut ctx = TestContext::new();
    ctx.notifier
        .expect_notify()
        .times(1)
        .returning(|_, _| Err(eyre::eyre!("relay unreachable")));
    let repository = ctx.repository.clone();
    let server = ctx.server();

    let response = server
        .post("/book_table")
        .json(&booking("Heidi", json!(2), "2024-06-01", "19:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(repository.bookings().await.len(), 1);
}

#[rstest]
#[case::zero(json!(0))]
#[case::negative(json!(-2))]
#[case::word(json!("abc"))]
#[case::fraction(json!(2.5))]
#[case::empty_string(json!(""))]
#[case::missing(Value::Null)]
#[case::boolean(json!(true))]
#[tokio::test]
async fn test_invalid_guests_rejected_before_allocation(#[case] guests: Value) {
    let mut repository = MockBookingRepo::new();
    repository.expect_list_tables().times(0);
    repository.expect_find_booked_tables().times(0);
    repository.expect_insert_booking().times(0);
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().times(0);
    let server = server_with(Arc::new(repository), notifier);

    let response = server
        .post("/book_table")
        .json(&booking("Ivan", guests, "2024-06-01", "19:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<MessageResponse>().message.contains("guests"));
}

#[rstest]
#[case::missing_name(json!({ "guests": 2, "date": "2024-06-01", "time": "19:00" }))]
#[case::blank_name(json!({ "name": "  ", "guests": 2, "date": "2024-06-01", "time": "19:00" }))]
#[case::missing_date(json!({ "name": "Judy", "guests": 2, "time": "19:00" }))]
#[case::missing_time(json!({ "name": "Judy", "guests": 2, "date": "2024-06-01" }))]
#[case::long_date(json!({ "name": "Judy", "guests": 2, "date": "x".repeat(21), "time": "19:00" }))]
#[case::long_name(json!({ "name": "n".repeat(101), "guests": 2, "date": "2024-06-01", "time": "19:00" }))]
#[case::not_an_object(json!([1, 2, 3]))]
#[tokio::test]
async fn test_malformed_booking_is_bad_request(#[case] body: Value) {
    let ctx = TestContext::new();
    let repository = ctx.repository.clone();
    let server = ctx.server();

    let response = server.post("/book_table").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(repository.bookings().await.is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_bad_request() {
    let server = TestContext::new().server();

    let response = server.post("/book_table").text("name=Alice&guests=2").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(!response.json::<MessageResponse>().message.is_empty());
}

#[tokio::test]
async fn test_database_failure_is_server_error() {
    let mut repository = MockBookingRepo::new();
    repository
        .expect_find_booked_tables()
        .returning(|_| Ok(Default::default()));
    repository.expect_list_tables().returning(|| {
        Ok(vec![tablebook_core::models::table::Table { id: 1, capacity: 4 }])
    });
    repository
        .expect_insert_booking()
        .times(1)
        .returning(|_, _| Err(BookingError::Database(eyre::eyre!("connection reset"))));
    let mut notifier = MockNotifier::new();
    notifier.expect_notify().times(0);
    let server = server_with(Arc::new(repository), notifier);

    let response = server
        .post("/book_table")
        .json(&booking("Mallory", json!(2), "2024-06-01", "19:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = response.json::<MessageResponse>().message;
    assert_eq!(message, SERVER_ERROR_MESSAGE);
    assert!(!message.contains("connection reset"));
}
