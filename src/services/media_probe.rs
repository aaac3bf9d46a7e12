use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::{
    errors::{AppError, AppResult},
    models::domain::VideoMeta,
};

#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> AppResult<VideoMeta>;
}

/// Reads width, height, frame rate and frame count of the first video stream
/// with `ffprobe`.
pub struct FfprobeMediaProbe {
    bin: String,
}

impl FfprobeMediaProbe {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Default, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
}

/// `30000/1001` style rates; `0/0` and garbage give 0.
fn parse_rate(rate: &str) -> f64 {
    match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().unwrap_or(0.0);
            let den: f64 = den.trim().parse().unwrap_or(0.0);
            if den > 0.0 {
                num / den
            } else {
                0.0
            }
        }
        None => rate.trim().parse().unwrap_or(0.0),
    }
}

impl ProbeStream {
    fn meta(&self) -> AppResult<VideoMeta> {
        let (Some(width), Some(height)) = (self.width, self.height) else {
            return Err(AppError::InternalError(
                "ffprobe reported no video dimensions".to_string(),
            ));
        };
        let fps = self.avg_frame_rate.as_deref().map(parse_rate).unwrap_or(0.0);
        // Some containers omit nb_frames; derive it from the stream duration.
        let frames = self
            .nb_frames
            .as_deref()
            .and_then(|n| n.parse::<f64>().ok())
            .or_else(|| {
                self.duration
                    .as_deref()
                    .and_then(|d| d.parse::<f64>().ok())
                    .map(|secs| secs * fps)
            })
            .unwrap_or(0.0);

        Ok(VideoMeta::from_dimensions(width, height, frames, fps))
    }
}

fn parse_probe_output(stdout: &[u8]) -> AppResult<VideoMeta> {
    let output: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| AppError::InternalError(format!("Unreadable ffprobe output: {}", e)))?;
    output
        .streams
        .first()
        .ok_or_else(|| AppError::InternalError("No video stream found".to_string()))?
        .meta()
}

#[async_trait]
impl MediaProbe for FfprobeMediaProbe {
    async fn probe(&self, path: &Path) -> AppResult<VideoMeta> {
        let output = Command::new(&self.bin)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height,avg_frame_rate,nb_frames,duration",
                "-of",
                "json",
            ])
            .arg(path)
            .output()
            .await?;

        if !output.status.success() {
            return Err(AppError::InternalError(format!(
                "ffprobe failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_probe_output(&output.stdout)
    }
}
