// libs/assistant-cell/tests/assistant_test.rs
//
// Relay tests against a wiremock double of the inference API.

use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::services::slots::SlotGrid;
use appointment_cell::store::MemoryAppointmentStore;
use assistant_cell::models::{AssistantError, ChatRequest};
use assistant_cell::services::assistant::AssistantService;
use doctor_cell::models::CreateDoctorRequest;
use doctor_cell::store::{DoctorStore, MemoryDoctorStore};
use shared_config::AppConfig;

fn test_config(api_url: &str, api_key: &str) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        port: 0,
        schedule_open_hour: 9,
        schedule_close_hour: 18,
        slot_minutes: 60,
        groq_api_key: api_key.to_string(),
        groq_api_url: api_url.to_string(),
        groq_model: "llama-3.3-70b-versatile".to_string(),
    })
}

async fn service_with_doctor(config: Arc<AppConfig>) -> AssistantService {
    let store = Arc::new(MemoryAppointmentStore::new());
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

    let grid = SlotGrid::new(9, 18, 60).unwrap();
    AssistantService::new(config, store, directory, grid)
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

fn chat_request(text: &str) -> ChatRequest {
    ChatRequest {
        text: text.to_string(),
        doctor_id: None,
        date: None,
    }
}

#[tokio::test]
async fn chat_relays_the_completion_text() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hello from the clinic")))
        .mount(&mock_server)
        .await;

    let service = service_with_doctor(test_config(&mock_server.uri(), "test-key")).await;

    let response = service
        .chat(chat_request("What should I do about a mild fever?"))
        .await
        .unwrap();
    assert_eq!(response, "Hello from the clinic");
}

#[tokio::test]
async fn mentioned_doctor_is_added_to_the_context() {
    let mock_server = MockServer::start().await;
    // The mock only matches when the outgoing prompt carries the roster
    // context line for the mentioned doctor.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Dr. Adams"))
        .and(body_string_contains("Cardiology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Dr. Adams is available")))
        .mount(&mock_server)
        .await;

    let service = service_with_doctor(test_config(&mock_server.uri(), "test-key")).await;

    let response = service
        .chat(chat_request("Is Dr. Adams taking new patients?"))
        .await
        .unwrap();
    assert_eq!(response, "Dr. Adams is available");
}

#[tokio::test]
async fn structured_hints_inject_free_slots() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("09:00"))
        .and(body_string_contains("17:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Plenty of slots")))
        .mount(&mock_server)
        .await;

    let service = service_with_doctor(test_config(&mock_server.uri(), "test-key")).await;

    let request = ChatRequest {
        text: "When can I come in?".to_string(),
        doctor_id: Some(doctor_cell::models::DoctorId(1)),
        date: Some("2030-06-01".parse().unwrap()),
    };

    let response = service.chat(request).await.unwrap();
    assert_eq!(response, "Plenty of slots");
}

#[tokio::test]
async fn unknown_doctor_hint_is_not_found() {
    let mock_server = MockServer::start().await;
    let service = service_with_doctor(test_config(&mock_server.uri(), "test-key")).await;

    let request = ChatRequest {
        text: "When can I come in?".to_string(),
        doctor_id: Some(doctor_cell::models::DoctorId(99)),
        date: Some("2030-06-01".parse().unwrap()),
    };

    assert_matches!(
        service.chat(request).await,
        Err(AssistantError::DoctorNotFound)
    );
}

#[tokio::test]
async fn empty_text_is_rejected_before_any_relay() {
    let mock_server = MockServer::start().await;
    let service = service_with_doctor(test_config(&mock_server.uri(), "test-key")).await;

    assert_matches!(
        service.chat(chat_request("   ")).await,
        Err(AssistantError::ValidationError(_))
    );
}

#[tokio::test]
async fn missing_api_key_reports_not_configured() {
    let service = service_with_doctor(test_config("http://localhost:9", "")).await;

    assert_matches!(
        service.chat(chat_request("Hello")).await,
        Err(AssistantError::NotConfigured)
    );
}

#[tokio::test]
async fn inference_failure_is_reported_not_swallowed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let service = service_with_doctor(test_config(&mock_server.uri(), "test-key")).await;

    assert_matches!(
        service.chat(chat_request("Hello")).await,
        Err(AssistantError::InferenceError(_))
    );
}
