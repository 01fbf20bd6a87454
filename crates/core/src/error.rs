use std::path::PathBuf;
use thiserror::Error;

/// Rejections raised before any file is written or any request is sent.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("No file part in the request")]
    NoFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("Invalid file type. Allowed types are: {allowed}")]
    UnsupportedExtension { extension: String, allowed: String },

    #[error("File is too large. Maximum upload size is {limit_bytes} bytes")]
    TooLarge { limit_bytes: u64 },

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to run {binary}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No audio track found in {video_path}")]
    NoAudioTrack { video_path: PathBuf },

    #[error("ffmpeg exited with {status} for {video_path}: {stderr}")]
    Ffmpeg {
        video_path: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("Extracted audio at {audio_path} is not valid 16-bit PCM: {reason}")]
    InvalidOutput { audio_path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("Failed to read audio file {audio_path}: {source}")]
    ReadAudio {
        audio_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcription API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error during transcription: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Transcription API returned invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

#[derive(Error, Debug)]
pub enum SummarizationError {
    #[error("Summarization API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error during summarization: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Error decoding summarization API response: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

#[derive(Error, Debug)]
pub enum VidsumError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Audio extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("Summarization failed: {0}")]
    Summarization(#[from] SummarizationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VidsumError>;
