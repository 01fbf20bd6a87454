use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A video persisted by the file gate, waiting for the pipeline.
#[derive(Debug, Clone)]
pub struct UploadedVideo {
    pub stored_path: PathBuf,
    pub original_filename: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct ExtractedAudio {
    pub path: PathBuf,
    pub source_video_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub transcript: String,
    pub summary: String,
}
