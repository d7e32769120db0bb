use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// First bookable hour of the day (inclusive).
    pub schedule_open_hour: u32,
    /// Hour the schedule closes (exclusive).
    pub schedule_close_hour: u32,
    pub slot_minutes: u32,
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub groq_model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            port: parse_var("PORT", 3000),
            schedule_open_hour: parse_var("SCHEDULE_OPEN_HOUR", 9),
            schedule_close_hour: parse_var("SCHEDULE_CLOSE_HOUR", 18),
            slot_minutes: parse_var("SLOT_MINUTES", 60),
            groq_api_key: env::var("GROQ_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("GROQ_API_KEY not set, chat endpoint will be unavailable");
                    String::new()
                }),
            groq_api_url: env::var("GROQ_API_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            groq_model: env::var("GROQ_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
        };

        if config.schedule_open_hour >= config.schedule_close_hour {
            warn!(
                "Schedule window {}..{} is empty, no slots will be offered",
                config.schedule_open_hour, config.schedule_close_hour
            );
        }

        config
    }

    pub fn is_assistant_configured(&self) -> bool {
        !self.groq_api_key.is_empty() && !self.groq_api_url.is_empty()
    }
}

fn parse_var<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}
