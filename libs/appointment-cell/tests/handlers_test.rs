// libs/appointment-cell/tests/handlers_test.rs
//
// Wire-level tests for the appointment routes, run against the real router
// with in-memory store doubles.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use appointment_cell::handlers::AppointmentState;
use appointment_cell::router::appointment_routes;
use appointment_cell::services::slots::SlotGrid;
use appointment_cell::store::MemoryAppointmentStore;
use doctor_cell::models::CreateDoctorRequest;
use doctor_cell::store::{DoctorStore, MemoryDoctorStore};

async fn test_state() -> AppointmentState {
    let directory = Arc::new(MemoryDoctorStore::new());
    directory
        .insert(CreateDoctorRequest {
            name: "Dr. Adams".to_string(),
            hospital: "General Hospital".to_string(),
            specialty: "Cardiology".to_string(),
            availability: None,
            profile_photo: None,
        })
        .await
        .unwrap();

    AppointmentState {
        store: Arc::new(MemoryAppointmentStore::new()),
        directory,
        grid: SlotGrid::new(9, 18, 60).unwrap(),
    }
}

fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}

fn booking_body(date: NaiveDate, time: &str) -> Body {
    Body::from(
        json!({
            "patient_email": "pat@example.com",
            "patient_name": "Pat Doe",
            "doctor_id": "D1",
            "date": date,
            "time": time,
            "issue": "Recurring headaches"
        })
        .to_string(),
    )
}

fn post_appointment(date: NaiveDate, time: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(booking_body(date, time))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn empty_calendar_reports_nine_free_slots() {
    let app = appointment_routes(test_state().await);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/availability?doctor_id=D1&date={}", tomorrow()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 9);
    assert_eq!(slots[0], "09:00:00");
    assert_eq!(slots[8], "17:00:00");
}

#[tokio::test]
async fn booked_slot_disappears_from_availability() {
    let state = test_state().await;
    let date = tomorrow();

    let app = appointment_routes(state.clone());
    let response = app.oneshot(post_appointment(date, "10:00:00")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = appointment_routes(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/availability?doctor_id=D1&date={}", date))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = json_body(response).await;
    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 8);
    assert!(!slots.contains(&json!("10:00:00")));
}

#[tokio::test]
async fn conflicting_booking_returns_409() {
    let state = test_state().await;
    let date = tomorrow();

    let app = appointment_routes(state.clone());
    let response = app.oneshot(post_appointment(date, "10:00:00")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = appointment_routes(state);
    let response = app.oneshot(post_appointment(date, "10:00:00")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn adjacent_booking_is_accepted() {
    let state = test_state().await;
    let date = tomorrow();

    let app = appointment_routes(state.clone());
    let response = app.oneshot(post_appointment(date, "10:00:00")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = appointment_routes(state);
    let response = app.oneshot(post_appointment(date, "11:00:00")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn past_date_booking_returns_400() {
    let app = appointment_routes(test_state().await);
    let yesterday = Utc::now().date_naive() - Duration::days(1);

    let response = app.oneshot(post_appointment(yesterday, "10:00:00")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_doctor_availability_returns_404() {
    let app = appointment_routes(test_state().await);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/availability?doctor_id=D9&date={}", tomorrow()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancel_then_cancel_again_returns_404() {
    let state = test_state().await;
    let date = tomorrow();

    let app = appointment_routes(state.clone());
    let response = app.oneshot(post_appointment(date, "10:00:00")).await.unwrap();
    let body = json_body(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    let delete_request = || {
        Request::builder()
            .method("DELETE")
            .uri(format!("/{}", id))
            .body(Body::empty())
            .unwrap()
    };

    let app = appointment_routes(state.clone());
    let response = app.oneshot(delete_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = appointment_routes(state);
    let response = app.oneshot(delete_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn conflict_check_reflects_committed_bookings() {
    let state = test_state().await;
    let date = tomorrow();

    let app = appointment_routes(state.clone());
    app.oneshot(post_appointment(date, "10:00:00")).await.unwrap();

    let check = |time: &str| {
        format!(
            "/conflicts/check?doctor_id=D1&date={}&time={}&duration_minutes=60",
            date, time
        )
    };

    let app = appointment_routes(state.clone());
    let response = app
        .oneshot(Request::builder().uri(check("10:00:00")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["available"], json!(false));

    let app = appointment_routes(state);
    let response = app
        .oneshot(Request::builder().uri(check("11:00:00")).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["available"], json!(true));
}

#[tokio::test]
async fn patient_listing_shows_snapshotted_doctor_details() {
    let state = test_state().await;
    let date = tomorrow();

    let app = appointment_routes(state.clone());
    app.oneshot(post_appointment(date, "10:00:00")).await.unwrap();

    let app = appointment_routes(state);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/patients/pat@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], json!(1));
    let appointment = &body["appointments"][0];
    assert_eq!(appointment["doctor_name"], json!("Dr. Adams"));
    assert_eq!(appointment["specialty"], json!("Cardiology"));
    assert_eq!(appointment["hospital"], json!("General Hospital"));
}
