use std::path::{Path, PathBuf};

use chrono::Local;
use uuid::Uuid;

pub fn get_root_work_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("vidsum")
}

/// Default location for uploaded videos and transient audio
pub fn get_uploads_dir() -> PathBuf {
    get_root_work_dir().join("uploads")
}

/// Microsecond timestamp plus a random suffix.
///
/// Two requests landing in the same microsecond still get different stamps.
pub fn unique_stamp() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}",
        Local::now().format("%Y%m%d_%H%M%S_%6f"),
        &suffix[..8]
    )
}

/// Stored name for an admitted upload: `<stamp>_<sanitized name>`
pub fn get_video_path(work_dir: &Path, sanitized_name: &str) -> PathBuf {
    work_dir.join(format!("{}_{}", unique_stamp(), sanitized_name))
}

/// Transient audio path derived from the video's stem: `<stem>_<stamp>.wav`
pub fn get_audio_path(work_dir: &Path, video_path: &Path) -> PathBuf {
    let stem = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());
    work_dir.join(format!("{}_{}.wav", stem, unique_stamp()))
}
