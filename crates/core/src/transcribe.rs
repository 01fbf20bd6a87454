use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use tokio::fs;

use crate::{error::TranscriptionError, provider::ProviderConfig};

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError>;
}

/// Whisper over HTTP: multipart upload with bearer auth
pub struct WhisperApiTranscriber {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl WhisperApiTranscriber {
    pub fn new(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            endpoint: config.transcription_url.clone(),
            model: config.transcription_model.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl Transcriber for WhisperApiTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let audio_data =
            fs::read(audio_path)
                .await
                .map_err(|source| TranscriptionError::ReadAudio {
                    audio_path: audio_path.to_path_buf(),
                    source,
                })?;

        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str("audio/wav")?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone());

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "Sending audio for transcription");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "Transcription API responded");

        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "Transcription API error");
            return Err(TranscriptionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&body)
            .map_err(|source| TranscriptionError::InvalidJson { source, body })?;
        let text = parsed.text.unwrap_or_default().trim().to_string();

        tracing::info!(chars = text.len(), "Transcription successful");
        Ok(text)
    }
}
