//! Vidsum Core Library
//!
//! Turns an uploaded video into a transcript and a summary: ffmpeg pulls the
//! audio track, a remote Whisper endpoint transcribes it, and a remote query
//! endpoint summarizes the text.

pub mod error;
pub mod extract;
pub mod gate;
pub mod pipeline;
pub mod provider;
pub mod summarize;
pub mod transcribe;
pub mod types;
pub mod workdir;

// Re-export commonly used items at crate root
pub use error::{
    ExtractionError, Result, SummarizationError, TranscriptionError, ValidationError, VidsumError,
};
pub use extract::{AudioExtractor, FfmpegExtractor};
pub use gate::{ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES, FileGate};
pub use pipeline::{Pipeline, Stage};
pub use provider::{ProviderConfig, validate_api_key};
pub use summarize::{EMPTY_TRANSCRIPT_SUMMARY, QueryApiSummarizer, SUMMARY_NOT_FOUND, Summarizer};
pub use transcribe::{Transcriber, WhisperApiTranscriber};
pub use types::{ExtractedAudio, SummaryResult, UploadedVideo};
pub use workdir::get_uploads_dir;
