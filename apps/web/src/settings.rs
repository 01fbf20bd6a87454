use std::{path::PathBuf, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use vidsum_core::{
    DEFAULT_MAX_UPLOAD_BYTES, ProviderConfig, ValidationError, get_uploads_dir,
    provider::{
        API_KEY_ENV, DEFAULT_SUMMARIZATION_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TRANSCRIPTION_MODEL,
        DEFAULT_TRANSCRIPTION_URL,
    },
    validate_api_key,
};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub storage: StorageSettings,
    pub fireworks: FireworksSettings,
    pub ffmpeg: FfmpegSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub working_dir: Option<String>,
    pub max_upload_bytes: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FireworksSettings {
    pub api_key: Option<String>,
    pub transcription_url: String,
    pub transcription_model: String,
    pub summarization_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FfmpegSettings {
    pub binary: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::default().separator("__").prefix("VIDSUM"))
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 5000)?
            .set_default("storage.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES)?
            .set_default("fireworks.transcription_url", DEFAULT_TRANSCRIPTION_URL)?
            .set_default("fireworks.transcription_model", DEFAULT_TRANSCRIPTION_MODEL)?
            .set_default("fireworks.summarization_url", DEFAULT_SUMMARIZATION_URL)?
            .set_default("fireworks.timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("ffmpeg.binary", "ffmpeg")?
            .build()?;

        config.try_deserialize()
    }

    pub fn working_dir(&self) -> PathBuf {
        self.storage
            .working_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(get_uploads_dir)
    }

    /// `FIREWORKS_API_KEY` wins over the settings file.
    pub fn provider_config(&self) -> Result<ProviderConfig, ValidationError> {
        let candidate = std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| self.fireworks.api_key.clone());
        let api_key = validate_api_key(candidate)?;

        Ok(ProviderConfig {
            transcription_url: self.fireworks.transcription_url.clone(),
            transcription_model: self.fireworks.transcription_model.clone(),
            summarization_url: self.fireworks.summarization_url.clone(),
            api_key,
            timeout: Duration::from_secs(self.fireworks.timeout_secs),
        })
    }
}
