//! Video duration probing.
//!
//! [`FfprobeProbe`] shells out to `ffprobe` on a temporary copy of the upload.
//! Tests use their own [`MediaProbe`] implementation so no binary is needed.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ffprobe failed: {0}")]
    Failed(String),

    #[error("Could not parse ffprobe output: {0}")]
    Parse(String),
}

/// Derives the duration of an uploaded video.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Duration in seconds of `data`; `extension` hints the container format.
    async fn duration_seconds(&self, data: &[u8], extension: &str) -> Result<f64, ProbeError>;
}

pub struct FfprobeProbe {
    ffprobe_path: String,
}

impl FfprobeProbe {
    pub fn new(ffprobe_path: String) -> Result<Self, ProbeError> {
        if ffprobe_path.is_empty()
            || !ffprobe_path.chars().all(|c| {
                c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
            })
        {
            return Err(ProbeError::Failed(format!(
                "Invalid ffprobe path: {}",
                ffprobe_path
            )));
        }

        Ok(Self { ffprobe_path })
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe_path(&self, video_path: &Path) -> Result<f64, ProbeError> {
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(video_path)
            .output()
            .await?;

        if !output.status.success() {
            return Err(ProbeError::Failed(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        let duration = parse_duration(&output.stdout)?;

        tracing::debug!(
            duration_seconds = duration,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Probed video duration"
        );

        Ok(duration)
    }
}

/// Reads `format.duration` from `ffprobe -print_format json` output.
fn parse_duration(stdout: &[u8]) -> Result<f64, ProbeError> {
    let probe_data: serde_json::Value =
        serde_json::from_slice(stdout).map_err(|e| ProbeError::Parse(e.to_string()))?;

    probe_data["format"]["duration"]
        .as_str()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| ProbeError::Parse("missing format.duration".to_string()))
}

#[async_trait]
impl MediaProbe for FfprobeProbe {
    async fn duration_seconds(&self, data: &[u8], extension: &str) -> Result<f64, ProbeError> {
        // ffprobe needs a seekable file
        let temp_file = tempfile::Builder::new()
            .suffix(&format!(".{}", extension))
            .tempfile()?;
        tokio::fs::write(temp_file.path(), data).await?;

        self.probe_path(temp_file.path()).await
    }
}
