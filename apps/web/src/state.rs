use vidsum_core::{FfmpegExtractor, FileGate, Pipeline};

use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub gate: FileGate,
    /// `None` when no usable API key is configured.
    pub pipeline: Option<Pipeline>,
}

impl AppState {
    pub fn new(gate: FileGate, pipeline: Option<Pipeline>) -> Self {
        Self { gate, pipeline }
    }

    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let gate = FileGate::new(settings.working_dir())
            .with_max_upload_bytes(settings.storage.max_upload_bytes);
        gate.ensure_work_dir().await?;

        let pipeline = match settings.provider_config() {
            Ok(config) => Some(Pipeline::from_config(
                gate.work_dir(),
                &config,
                FfmpegExtractor::new(&settings.ffmpeg.binary),
            )?),
            Err(e) => {
                tracing::error!(error = %e, "Fireworks API key is not configured; uploads will be rejected");
                None
            }
        };

        Ok(Self::new(gate, pipeline))
    }
}
