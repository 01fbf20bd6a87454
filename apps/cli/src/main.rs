use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs::File;
use tracing_subscriber::EnvFilter;

use vidsum_core::{
    FfmpegExtractor, FileGate, Pipeline, ProviderConfig, Stage, UploadedVideo, get_uploads_dir,
};

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let total = secs.round() as u64;
        format!("{}m {}s", total / 60, total % 60)
    }
}

#[derive(Parser)]
#[command(name = "vidsum")]
#[command(
    about = "Extract a video's audio, transcribe it with Whisper, and summarize the transcript"
)]
struct Cli {
    /// Path to a local video (mp4, mov, avi or mkv)
    video: PathBuf,

    /// Directory for the working copy and extracted audio
    #[arg(short, long)]
    work_dir: Option<PathBuf>,

    /// ffmpeg executable to use for audio extraction
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn stage_message(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Extracting => Some("Extracting audio..."),
        Stage::Transcribing => Some("Transcribing with Whisper..."),
        Stage::Summarizing => Some("Generating summary..."),
        Stage::Start | Stage::Done | Stage::Failed => None,
    }
}

/// Builds the pipeline, then admits a working copy of `video`.
///
/// The pipeline deletes what it is given, so the source file is never handed
/// over directly. Nothing is copied unless the pipeline could be built.
async fn prepare(
    video: &Path,
    filename: &str,
    work_dir: PathBuf,
    ffmpeg: PathBuf,
    config: &ProviderConfig,
) -> Result<(Pipeline, UploadedVideo)> {
    let pipeline = Pipeline::from_config(&work_dir, config, FfmpegExtractor::new(ffmpeg))?;

    let source = File::open(video)
        .await
        .with_context(|| format!("cannot open {}", video.display()))?;
    let uploaded = FileGate::new(work_dir).admit(filename, source).await?;
    Ok((pipeline, uploaded))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Validate API key early
    let config = match ProviderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    let filename = cli
        .video
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    println!(
        "\n{}  {}\n",
        style("vidsum").cyan().bold(),
        style("Video Summarizer").dim()
    );

    let work_dir = cli.work_dir.unwrap_or_else(get_uploads_dir);
    let (pipeline, video) = prepare(&cli.video, &filename, work_dir, cli.ffmpeg, &config).await?;
    println!(
        "{} Loaded: {}",
        style("✓").green().bold(),
        style(&filename).dim()
    );

    let total_start = Instant::now();
    let spinner = create_spinner("Starting...");
    let result = pipeline
        .run_observed(video, |stage| {
            if let Some(msg) = stage_message(stage) {
                spinner.set_message(msg);
            }
        })
        .await;

    let result = match result {
        Ok(result) => {
            spinner.finish_with_message(format!(
                "{} Done {}",
                style("✓").green().bold(),
                style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
            ));
            result
        }
        Err(e) => {
            spinner.finish_with_message(format!("{} {}", style("✗").red().bold(), e));
            std::process::exit(1);
        }
    };

    println!("{}", style("─".repeat(60)).dim());
    println!("\n{}\n", style("Summary").cyan().bold());
    println!("{}", result.summary);
    println!("\n{}\n", style("Transcript").cyan().bold());
    println!("{}", result.transcript);

    Ok(())
}
