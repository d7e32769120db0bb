use std::sync::Arc;

use reqwest::{header, Client};
use serde_json::{json, Value};
use tracing::{debug, error};

use appointment_cell::models::AppointmentError;
use appointment_cell::services::availability::AvailabilityService;
use appointment_cell::services::slots::SlotGrid;
use appointment_cell::store::AppointmentStore;
use doctor_cell::models::Doctor;
use doctor_cell::store::DoctorStore;
use shared_config::AppConfig;

use crate::models::{AssistantError, ChatRequest};

/// Thin relay between the chat endpoint and the external inference API.
///
/// All language understanding lives on the other side of the wire; this
/// service only assembles context (the doctor roster, and free slots when
/// the client passed structured hints) and forwards the user's text.
pub struct AssistantService {
    http_client: Client,
    config: Arc<AppConfig>,
    directory: Arc<dyn DoctorStore>,
    availability: AvailabilityService,
}

impl AssistantService {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn AppointmentStore>,
        directory: Arc<dyn DoctorStore>,
        grid: SlotGrid,
    ) -> Self {
        let availability = AvailabilityService::new(store, Arc::clone(&directory), grid);
        Self {
            http_client: Client::new(),
            config,
            directory,
            availability,
        }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<String, AssistantError> {
        if !self.config.is_assistant_configured() {
            return Err(AssistantError::NotConfigured);
        }
        if request.text.trim().is_empty() {
            return Err(AssistantError::ValidationError(
                "Text input is required".to_string(),
            ));
        }

        let system_prompt = self.build_system_prompt(&request).await?;

        let body = json!({
            "model": self.config.groq_model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": request.text }
            ],
            "temperature": 0.7
        });

        let url = format!("{}/chat/completions", self.config.groq_api_url);
        debug!("Relaying chat request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.groq_api_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::InferenceError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Inference API error ({}): {}", status, detail);
            return Err(AssistantError::InferenceError(format!(
                "inference API returned {}",
                status
            )));
        }

        let completion: Value = response
            .json()
            .await
            .map_err(|e| AssistantError::InferenceError(e.to_string()))?;

        completion["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                AssistantError::InferenceError("inference API returned no completion".to_string())
            })
    }

    /// Assemble the system prompt: the standing healthcare-assistant
    /// instructions, context lines for any doctor the text mentions by name
    /// or id, and the free slots for the structured doctor/date hints.
    async fn build_system_prompt(&self, request: &ChatRequest) -> Result<String, AssistantError> {
        let doctors = self
            .directory
            .list()
            .await
            .map_err(|e| AssistantError::StorageError(e.to_string()))?;

        let needle = request.text.to_lowercase();
        let mentioned: Vec<&Doctor> = doctors
            .iter()
            .filter(|doc| {
                needle.contains(&doc.name.to_lowercase())
                    || needle.contains(&doc.id.to_string().to_lowercase())
            })
            .collect();

        let mut prompt = String::from(
            "You are a helpful healthcare assistant. Provide professional and caring \
             responses. For medical advice, always recommend consulting with a \
             healthcare professional directly.",
        );

        if !mentioned.is_empty() {
            prompt.push_str("\n\nUse the following doctor information to answer the question:\n");
            for doc in &mentioned {
                prompt.push_str(&format!(
                    "Doctor {} ({}): specializes in {} at {}.\n",
                    doc.name, doc.id, doc.specialty, doc.hospital
                ));
            }
        }

        if let (Some(doctor_id), Some(date)) = (request.doctor_id, request.date) {
            let slots = match self.availability.free_slots(doctor_id, date).await {
                Ok(slots) => slots,
                Err(AppointmentError::DoctorNotFound) => {
                    return Err(AssistantError::DoctorNotFound)
                }
                Err(e) => return Err(AssistantError::StorageError(e.to_string())),
            };

            if slots.is_empty() {
                prompt.push_str(&format!(
                    "\nDoctor {} has no free appointment slots on {}.\n",
                    doctor_id, date
                ));
            } else {
                let rendered: Vec<String> = slots
                    .iter()
                    .map(|slot| slot.format("%H:%M").to_string())
                    .collect();
                prompt.push_str(&format!(
                    "\nDoctor {} has free appointment slots on {} at: {}.\n",
                    doctor_id,
                    date,
                    rendered.join(", ")
                ));
            }
        }

        Ok(prompt)
    }
}
