use axum::{
    Json,
    extract::{Multipart, State},
};
use vidsum_core::{SummaryResult, ValidationError, gate::check_filename};

use crate::{error::ApiError, state::AppState};

pub const VIDEO_FIELD: &str = "video_file";

#[tracing::instrument(skip(state, multipart))]
pub async fn summarize_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SummaryResult>, ApiError> {
    // Refuse before touching the body or the disk.
    let pipeline = state.pipeline.as_ref().ok_or(ValidationError::MissingApiKey {
        env_var: vidsum_core::provider::API_KEY_ENV.to_string(),
    })?;

    let (filename, data) = read_video_field(&mut multipart, state.gate.max_upload_bytes()).await?;
    tracing::debug!(filename = %filename, bytes = data.len(), "Upload received");

    let video = state.gate.admit_bytes(&filename, &data).await?;
    let result = pipeline.run(video).await?;

    tracing::info!(
        filename = %filename,
        transcript_chars = result.transcript.len(),
        "Video summarized"
    );
    Ok(Json(result))
}

/// Find the video field, validate its name, then buffer it against the cap.
async fn read_video_field(
    multipart: &mut Multipart,
    max_upload_bytes: u64,
) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        check_filename(&filename).inspect_err(|e| {
            tracing::warn!(filename = %filename, error = %e, "Upload rejected");
        })?;

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if (data.len() + chunk.len()) as u64 > max_upload_bytes {
                tracing::warn!(filename = %filename, limit = max_upload_bytes, "Upload too large");
                return Err(ValidationError::TooLarge {
                    limit_bytes: max_upload_bytes,
                }
                .into());
            }
            data.extend_from_slice(&chunk);
        }

        return Ok((filename, data));
    }

    tracing::warn!("Upload request with no video file field");
    Err(ValidationError::NoFile.into())
}
