use std::{
    fmt,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    error::Result,
    extract::{AudioExtractor, FfmpegExtractor},
    provider::ProviderConfig,
    summarize::{EMPTY_TRANSCRIPT_SUMMARY, QueryApiSummarizer, Summarizer},
    transcribe::{Transcriber, WhisperApiTranscriber},
    types::{SummaryResult, UploadedVideo},
    workdir::get_audio_path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Extracting,
    Transcribing,
    Summarizing,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Extracting => "extracting",
            Stage::Transcribing => "transcribing",
            Stage::Summarizing => "summarizing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Deletes its file when dropped, whether or not the file was ever created.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
    label: &'static str,
}

impl TempFile {
    pub fn new(path: PathBuf, label: &'static str) -> Self {
        Self { path, label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Cleaned up {}", self.label)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Error deleting {}",
                self.label
            ),
        }
    }
}

/// Runs extract -> transcribe -> summarize for one uploaded video.
#[derive(Clone)]
pub struct Pipeline {
    work_dir: PathBuf,
    extractor: Arc<dyn AudioExtractor>,
    transcriber: Arc<dyn Transcriber>,
    summarizer: Arc<dyn Summarizer>,
}

impl Pipeline {
    pub fn new(
        work_dir: impl Into<PathBuf>,
        extractor: Arc<dyn AudioExtractor>,
        transcriber: Arc<dyn Transcriber>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            work_dir: work_dir.into(),
            extractor,
            transcriber,
            summarizer,
        }
    }

    /// ffmpeg extraction plus the two HTTP clients sharing one connection pool
    pub fn from_config(
        work_dir: impl Into<PathBuf>,
        config: &ProviderConfig,
        extractor: FfmpegExtractor,
    ) -> reqwest::Result<Self> {
        let client = config.http_client()?;
        Ok(Self::new(
            work_dir,
            Arc::new(extractor),
            Arc::new(WhisperApiTranscriber::new(client.clone(), config)),
            Arc::new(QueryApiSummarizer::new(client, config)),
        ))
    }

    pub async fn run(&self, video: UploadedVideo) -> Result<SummaryResult> {
        self.run_observed(video, |_| {}).await
    }

    /// Like [`Pipeline::run`], reporting every stage transition to `observer`.
    ///
    /// Both the video and the derived audio are gone from disk by the time
    /// this returns, on success and on failure alike.
    pub async fn run_observed<F>(
        &self,
        video: UploadedVideo,
        mut observer: F,
    ) -> Result<SummaryResult>
    where
        F: FnMut(Stage) + Send,
    {
        let video_file = TempFile::new(video.stored_path, "uploaded video file");
        let audio_file = TempFile::new(
            get_audio_path(&self.work_dir, video_file.path()),
            "temporary audio file",
        );

        let mut advance = |next: Stage| {
            tracing::info!(stage = %next, video = %video.original_filename, "Pipeline stage");
            observer(next);
        };
        advance(Stage::Start);

        let result = self
            .run_stages(video_file.path(), audio_file.path(), &mut advance)
            .await;

        if let Err(e) = &result {
            advance(Stage::Failed);
            tracing::error!(error = %e, "Error processing video");
        }

        drop(audio_file);
        drop(video_file);
        result
    }

    async fn run_stages(
        &self,
        video_path: &Path,
        audio_path: &Path,
        advance: &mut (dyn FnMut(Stage) + Send),
    ) -> Result<SummaryResult> {
        advance(Stage::Extracting);
        let audio = self.extractor.extract(video_path, audio_path).await?;

        advance(Stage::Transcribing);
        let transcript = self.transcriber.transcribe(&audio.path).await?;

        let summary = if transcript.trim().is_empty() {
            tracing::warn!("Skipping summarization due to empty transcript");
            EMPTY_TRANSCRIPT_SUMMARY.to_string()
        } else {
            advance(Stage::Summarizing);
            self.summarizer.summarize(&transcript).await?
        };

        advance(Stage::Done);
        Ok(SummaryResult {
            transcript,
            summary,
        })
    }
}
