//! File system store for synthesized audio

use crate::Result;
use crate::capabilities::AudioResult;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// A persisted audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAudio {
    pub file_name: String,
    pub path: PathBuf,
    /// Public URL, e.g. `/audio/<file_name>`
    pub url: String,
}

/// Writes audio blobs into a flat directory under random names.
///
/// Directory structure: `audio_dir/<uuid-v4>.<format>`. Files are never removed.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
    public_prefix: String,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let public_prefix = public_prefix.into();
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// URL path the files are served under, without a trailing slash
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Write the audio and return where it can be fetched from
    pub async fn persist(&self, audio: &AudioResult) -> Result<StoredAudio> {
        fs::create_dir_all(&self.dir).await?;

        let file_name = format!("{}.{}", uuid::Uuid::new_v4(), sanitize_extension(&audio.format));
        let path = self.dir.join(&file_name);

        let mut file = fs::File::create(&path).await?;
        file.write_all(&audio.audio).await?;
        file.flush().await?;

        tracing::debug!(path = %path.display(), bytes = audio.audio.len(), "Persisted audio");

        Ok(StoredAudio {
            url: format!("{}/{}", self.public_prefix, file_name),
            file_name,
            path,
        })
    }
}

/// Format tags come from vendors; keep only what is safe in a file name.
fn sanitize_extension(format: &str) -> String {
    let ext: String = format
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if ext.is_empty() { "bin".to_string() } else { ext }
}
