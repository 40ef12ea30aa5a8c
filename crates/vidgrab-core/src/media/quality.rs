//! Coarse quality labels and the inference helpers that produce them.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::QualityBuckets;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quality {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "360p")]
    P360,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "4K")]
    Uhd4k,
    #[serde(rename = "adaptive")]
    Adaptive,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Uhd4k => "4K",
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::P360 => "360p",
            Quality::Adaptive => "adaptive",
            Quality::Unknown => "unknown",
        }
    }

    /// Label for a known content length; `Unknown` below the lowest bucket.
    pub fn from_content_length(len: u64, buckets: &QualityBuckets) -> Self {
        if len > buckets.uhd_4k_bytes {
            Quality::Uhd4k
        } else if len > buckets.p1080_bytes {
            Quality::P1080
        } else if len > buckets.p720_bytes {
            Quality::P720
        } else if len > buckets.p480_bytes {
            Quality::P480
        } else if len > buckets.p360_bytes {
            Quality::P360
        } else {
            Quality::Unknown
        }
    }

    /// Label for a vertical resolution, rounded down to the nearest bucket.
    pub fn from_height(height: u32) -> Self {
        match height {
            2160.. => Quality::Uhd4k,
            1080.. => Quality::P1080,
            720.. => Quality::P720,
            480.. => Quality::P480,
            360.. => Quality::P360,
            _ => Quality::Unknown,
        }
    }

    /// Reads an explicit resolution token (`1080p`, `1920x1080`) from a URL.
    pub fn from_url_token(url: &str) -> Option<Self> {
        URL_TOKENS
            .iter()
            .find(|(re, _)| re.is_match(url))
            .map(|(_, quality)| *quality)
    }
}

// Digits must not run into the token from the left ("11080p" is not 1080p).
static URL_TOKENS: LazyLock<Vec<(Regex, Quality)>> = LazyLock::new(|| {
    [
        (r"(?i)(?:^|[^0-9])(?:2160p|3840x2160)", Quality::Uhd4k),
        (r"(?i)(?:^|[^0-9])(?:1080p|1920x1080)", Quality::P1080),
        (r"(?i)(?:^|[^0-9])(?:720p|1280x720)", Quality::P720),
        (r"(?i)(?:^|[^0-9])(?:480p|854x480)", Quality::P480),
        (r"(?i)(?:^|[^0-9])(?:360p|640x360)", Quality::P360),
    ]
    .into_iter()
    .map(|(pattern, quality)| (Regex::new(pattern).unwrap(), quality))
    .collect()
});

impl Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
