use std::path::{Path, PathBuf};

use tokio::{
    fs,
    io::{AsyncRead, AsyncReadExt},
};

use crate::{
    error::{Result, ValidationError},
    types::UploadedVideo,
    workdir::get_video_path,
};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "mkv"];
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Validates uploads and persists accepted ones into the working directory.
#[derive(Clone, Debug)]
pub struct FileGate {
    work_dir: PathBuf,
    max_upload_bytes: u64,
}

impl FileGate {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub async fn ensure_work_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.work_dir).await?;
        Ok(())
    }

    /// Read at most one byte past the cap, then store.
    pub async fn admit<R>(&self, filename: &str, reader: R) -> Result<UploadedVideo>
    where
        R: AsyncRead + Unpin,
    {
        check_filename(filename)?;

        let mut data = Vec::new();
        reader
            .take(self.max_upload_bytes + 1)
            .read_to_end(&mut data)
            .await?;

        self.admit_bytes(filename, &data).await
    }

    pub async fn admit_bytes(&self, filename: &str, data: &[u8]) -> Result<UploadedVideo> {
        let extension = check_filename(filename)?;
        self.check_size(data.len() as u64)?;

        let sanitized = sanitize_filename(filename);
        let stored_name = if has_extension(&sanitized, &extension) {
            sanitized
        } else {
            format!("video.{}", extension)
        };

        self.ensure_work_dir().await?;
        let stored_path = get_video_path(&self.work_dir, &stored_name);
        fs::write(&stored_path, data).await?;

        tracing::info!(
            path = %stored_path.display(),
            bytes = data.len(),
            "Upload saved"
        );

        Ok(UploadedVideo {
            stored_path,
            original_filename: filename.to_string(),
            size_bytes: data.len() as u64,
        })
    }

    pub fn check_size(&self, size_bytes: u64) -> std::result::Result<(), ValidationError> {
        if size_bytes > self.max_upload_bytes {
            return Err(ValidationError::TooLarge {
                limit_bytes: self.max_upload_bytes,
            });
        }
        Ok(())
    }
}

/// Returns the lowercased extension when the name is acceptable.
pub fn check_filename(filename: &str) -> std::result::Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::UnsupportedExtension {
            extension,
            allowed: ALLOWED_EXTENSIONS.join(", "),
        });
    }

    Ok(extension)
}

/// Reduce a client-supplied name to a safe single path component.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') => Some(c),
            _ => None,
        })
        .collect();

    cleaned.trim_matches(['.', '_']).to_string()
}

fn has_extension(name: &str, extension: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(extension))
}
