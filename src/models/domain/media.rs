use serde::{Deserialize, Serialize};

pub const DEFAULT_VIDEO_DURATION_SECS: u64 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// Display metadata derived from a video file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoMeta {
    pub orientation: Orientation,
    pub duration_secs: u64,
}

impl Default for VideoMeta {
    fn default() -> Self {
        VideoMeta {
            orientation: Orientation::Landscape,
            duration_secs: DEFAULT_VIDEO_DURATION_SECS,
        }
    }
}

impl VideoMeta {
    /// Portrait iff taller than wide; duration is the ceiling of frames / fps and
    /// falls back to the default when either is unknown.
    pub fn from_dimensions(width: u32, height: u32, frame_count: f64, fps: f64) -> Self {
        let orientation = if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        };
        let duration_secs = if fps > 0.0 && frame_count > 0.0 {
            (frame_count / fps).ceil() as u64
        } else {
            DEFAULT_VIDEO_DURATION_SECS
        };

        VideoMeta {
            orientation,
            duration_secs,
        }
    }
}

/// The video part of any quiz or study item.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct VideoClip {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub video_path: Option<String>,
    #[serde(default)]
    pub video_summary: Option<String>,
    #[serde(skip_deserializing, default)]
    pub meta: VideoMeta,
}
