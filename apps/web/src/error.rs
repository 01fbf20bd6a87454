use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use vidsum_core::{ValidationError, VidsumError};

const PROCESSING_FAILED: &str = "An error occurred while processing the video. Please try again.";
const API_KEY_MISSING: &str =
    "API Key for Fireworks AI is not configured on the server. Please contact the administrator.";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
    ServiceUnavailable(String),
    BadGateway(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg)
            }
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingApiKey { .. } => {
                ApiError::ServiceUnavailable(API_KEY_MISSING.to_string())
            }
            ValidationError::TooLarge { .. } => ApiError::PayloadTooLarge(err.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

/// Processing failures get a generic message; the cause is already logged.
impl From<VidsumError> for ApiError {
    fn from(err: VidsumError) -> Self {
        match err {
            VidsumError::Validation(e) => e.into(),
            VidsumError::Extraction(_)
            | VidsumError::Transcription(_)
            | VidsumError::Summarization(_) => ApiError::BadGateway(PROCESSING_FAILED.to_string()),
            VidsumError::IoError(e) => {
                tracing::error!(error = %e, "Filesystem error while handling upload");
                ApiError::Internal(PROCESSING_FAILED.to_string())
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(format!("Failed to read upload: {}", err.body_text()))
        }
    }
}
