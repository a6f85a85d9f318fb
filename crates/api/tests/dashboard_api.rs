//! Integration tests for the role dashboards and booking ratings.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

#[tokio::test]
async fn admin_dashboard_lists_everything_by_default() {
    let app = common::build_test_app().await;
    let response = get(app, "/api/v1/dashboards/admin").await;

    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["overview"]["total_revenue"], 500.0);
    assert_eq!(data["overview"]["completed_bookings"], 1);
    assert_eq!(data["overview"]["total_customers"], 2);
    assert_eq!(data["bookings"].as_array().unwrap().len(), 3);
    assert_eq!(data["recent_bookings"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn admin_status_filter_narrows_the_list_only() {
    let app = common::build_test_app().await;
    let response = get(app.clone(), "/api/v1/dashboards/admin?status=in-progress").await;

    let data = body_json(response).await["data"].clone();
    let bookings = data["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"], "CP1703123455");
    // Overview still covers every booking.
    assert_eq!(data["overview"]["total_revenue"], 500.0);

    let response = get(app.clone(), "/api/v1/dashboards/admin?status=cancelled").await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["bookings"], json!([]));

    let response = get(app, "/api/v1/dashboards/admin?status=lost").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cleaner_dashboard_buckets_jobs_by_day() {
    let app = common::build_test_app().await;
    let response = get(app, "/api/v1/dashboards/cleaner").await;

    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["profile"]["id"], "CL001");
    assert_eq!(data["overview"]["today_jobs"], 1);
    assert_eq!(data["overview"]["upcoming_jobs"], 1);
    assert_eq!(data["overview"]["completed_jobs"], 1);
    assert_eq!(data["reviews"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn customer_dashboard_summarizes_bookings_and_payments() {
    let app = common::build_test_app().await;
    let response = get(app, "/api/v1/dashboards/customer").await;

    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["overview"]["upcoming_bookings"], 1);
    assert_eq!(data["overview"]["completed_bookings"], 1);
    assert_eq!(data["overview"]["total_spent"], 500.0);
    assert_eq!(data["overview"]["average_rating"], 5.0);
    assert!(!data["payments"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rating_a_completed_booking_is_accepted_not_stored() {
    let app = common::build_test_app().await;
    let response = post_json(
        app,
        "/api/v1/dashboards/customer/bookings/CP1703123454/rating",
        json!({ "rating": 4, "review": "Great" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["booking_id"], "CP1703123454");
    assert_eq!(data["rating"], 4);
    assert_eq!(data["stored"], false);
}

#[tokio::test]
async fn rating_is_validated() {
    let app = common::build_test_app().await;

    for rating in [0, 6] {
        let response = post_json(
            app.clone(),
            "/api/v1/dashboards/customer/bookings/CP1703123454/rating",
            json!({ "rating": rating }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // Not completed yet.
    let response = post_json(
        app.clone(),
        "/api/v1/dashboards/customer/bookings/CP1703123456/rating",
        json!({ "rating": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app,
        "/api/v1/dashboards/customer/bookings/CP0000000000/rating",
        json!({ "rating": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
