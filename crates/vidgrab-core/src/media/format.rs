use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Container format of a detected resource.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    M3u8,
    Mpd,
    Mp4,
    Webm,
    Mkv,
    Avi,
    Mov,
    Flv,
    M4v,
    Unknown,
}

/// Extensions accepted as direct video files.
pub const DIRECT_FILE_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv", "avi", "mov", "flv", "m4v"];

impl ContainerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerFormat::M3u8 => "m3u8",
            ContainerFormat::Mpd => "mpd",
            ContainerFormat::Mp4 => "mp4",
            ContainerFormat::Webm => "webm",
            ContainerFormat::Mkv => "mkv",
            ContainerFormat::Avi => "avi",
            ContainerFormat::Mov => "mov",
            ContainerFormat::Flv => "flv",
            ContainerFormat::M4v => "m4v",
            ContainerFormat::Unknown => "unknown",
        }
    }

    pub fn from_extension(s: &str) -> Self {
        s.parse().unwrap_or(ContainerFormat::Unknown)
    }

    /// Maps a `video/*` MIME type (parameters allowed) to a container.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        let Some(subtype) = essence.strip_prefix("video/") else {
            return ContainerFormat::Unknown;
        };
        match subtype {
            "mp4" => ContainerFormat::Mp4,
            "webm" => ContainerFormat::Webm,
            "x-matroska" | "matroska" => ContainerFormat::Mkv,
            "x-msvideo" | "avi" | "msvideo" => ContainerFormat::Avi,
            "quicktime" => ContainerFormat::Mov,
            "x-flv" => ContainerFormat::Flv,
            "x-m4v" => ContainerFormat::M4v,
            _ => ContainerFormat::Unknown,
        }
    }
}

impl Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContainerFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m3u8" => Ok(ContainerFormat::M3u8),
            "mpd" => Ok(ContainerFormat::Mpd),
            "mp4" => Ok(ContainerFormat::Mp4),
            "webm" => Ok(ContainerFormat::Webm),
            "mkv" => Ok(ContainerFormat::Mkv),
            "avi" => Ok(ContainerFormat::Avi),
            "mov" => Ok(ContainerFormat::Mov),
            "flv" => Ok(ContainerFormat::Flv),
            "m4v" => Ok(ContainerFormat::M4v),
            _ => Err(()),
        }
    }
}
