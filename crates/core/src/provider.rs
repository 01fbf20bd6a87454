use std::time::Duration;

use crate::error::ValidationError;

pub const API_KEY_ENV: &str = "FIREWORKS_API_KEY";
pub const API_KEY_PLACEHOLDER: &str = "YOUR_FIREWORKS_API_KEY_HERE";

pub const DEFAULT_TRANSCRIPTION_URL: &str =
    "https://audio-prod.us-virginia-1.direct.fireworks.ai/v1/audio/transcriptions";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-v3";
pub const DEFAULT_SUMMARIZATION_URL: &str = "https://backend.jeremiahjacob261.workers.dev/chat";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Endpoints and credentials for the remote transcription and summary APIs
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub transcription_url: String,
    pub transcription_model: String,
    pub summarization_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            transcription_url: DEFAULT_TRANSCRIPTION_URL.to_string(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            summarization_url: DEFAULT_SUMMARIZATION_URL.to_string(),
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build from `FIREWORKS_API_KEY`, failing when it is unset or a placeholder
    pub fn from_env() -> Result<Self, ValidationError> {
        let key = validate_api_key(std::env::var(API_KEY_ENV).ok())?;
        Ok(Self::new(key))
    }

    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder().timeout(self.timeout).build()
    }
}

/// Accept a candidate key unless it is missing, blank or the placeholder
pub fn validate_api_key(candidate: Option<String>) -> Result<String, ValidationError> {
    match candidate.map(|k| k.trim().to_string()) {
        Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(key),
        _ => Err(ValidationError::MissingApiKey {
            env_var: API_KEY_ENV.to_string(),
        }),
    }
}
