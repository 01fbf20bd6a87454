use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::{error::ExtractionError, types::ExtractedAudio};

#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Write the first audio stream of `video_path` to `audio_path` as 16-bit PCM WAV.
    async fn extract(
        &self,
        video_path: &Path,
        audio_path: &Path,
    ) -> Result<ExtractedAudio, ExtractionError>;
}

/// Extract audio from video using ffmpeg
#[derive(Clone, Debug)]
pub struct FfmpegExtractor {
    binary: PathBuf,
}

impl Default for FfmpegExtractor {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegExtractor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl AudioExtractor for FfmpegExtractor {
    async fn extract(
        &self,
        video_path: &Path,
        audio_path: &Path,
    ) -> Result<ExtractedAudio, ExtractionError> {
        tracing::info!(
            video = %video_path.display(),
            audio = %audio_path.display(),
            "Extracting audio"
        );

        let output = Command::new(&self.binary)
            .arg("-y")
            .arg("-nostdin")
            .arg("-i")
            .arg(video_path)
            .arg("-vn")
            .arg("-map")
            .arg("0:a:0")
            .arg("-acodec")
            .arg("pcm_s16le")
            .arg("-ar")
            .arg("16000")
            .arg("-ac")
            .arg("1")
            .arg(audio_path)
            .output()
            .await
            .map_err(|source| ExtractionError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            if reports_missing_audio(&stderr) {
                return Err(ExtractionError::NoAudioTrack {
                    video_path: video_path.to_path_buf(),
                });
            }
            return Err(ExtractionError::Ffmpeg {
                video_path: video_path.to_path_buf(),
                status: output.status.to_string(),
                stderr,
            });
        }

        verify_pcm16(audio_path)?;
        tracing::info!(audio = %audio_path.display(), "Audio extraction successful");

        Ok(ExtractedAudio {
            path: audio_path.to_path_buf(),
            source_video_path: video_path.to_path_buf(),
        })
    }
}

/// ffmpeg's wording when `-map 0:a:0` finds nothing to map.
fn reports_missing_audio(stderr: &str) -> bool {
    stderr.contains("matches no streams") || stderr.contains("does not contain any stream")
}

/// Check that `audio_path` is a readable 16-bit integer PCM WAV
pub fn verify_pcm16(audio_path: &Path) -> Result<hound::WavSpec, ExtractionError> {
    let invalid = |reason: String| ExtractionError::InvalidOutput {
        audio_path: audio_path.to_path_buf(),
        reason,
    };

    let reader = hound::WavReader::open(audio_path).map_err(|e| invalid(e.to_string()))?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(invalid(format!(
            "expected 16-bit integer samples, got {} bits {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    Ok(spec)
}
