//! Catalog views by format family and quality label.

use std::fmt::Display;
use std::str::FromStr;

use crate::media::{ContainerFormat, MediaDescriptor, ResourceType};

/// Coarse grouping consumers filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    Hls,
    Dash,
    Container(ContainerFormat),
    Blob,
    /// MediaSource streams.
    Mse,
    Embed,
}

impl FormatFamily {
    pub fn matches(&self, descriptor: &MediaDescriptor) -> bool {
        match (self, descriptor.resource_type) {
            (FormatFamily::Hls, ResourceType::HlsMaster | ResourceType::HlsPlaylist) => true,
            (FormatFamily::Dash, ResourceType::Dash) => true,
            (FormatFamily::Blob, ResourceType::Blob) => true,
            (FormatFamily::Mse, ResourceType::MediaSourceStream) => true,
            (FormatFamily::Embed, ResourceType::Embed) => true,
            (FormatFamily::Container(c), _) => descriptor.container_format == *c,
            _ => false,
        }
    }
}

impl FromStr for FormatFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "hls" | "m3u8" => Ok(FormatFamily::Hls),
            "dash" | "mpd" => Ok(FormatFamily::Dash),
            "blob" => Ok(FormatFamily::Blob),
            "mse" | "mediasource" => Ok(FormatFamily::Mse),
            "embed" => Ok(FormatFamily::Embed),
            other => match ContainerFormat::from_extension(other) {
                ContainerFormat::Unknown => Err(format!("unknown format family: {s}")),
                c => Ok(FormatFamily::Container(c)),
            },
        }
    }
}

impl Display for FormatFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatFamily::Hls => f.write_str("hls"),
            FormatFamily::Dash => f.write_str("dash"),
            FormatFamily::Container(c) => write!(f, "{c}"),
            FormatFamily::Blob => f.write_str("blob"),
            FormatFamily::Mse => f.write_str("mse"),
            FormatFamily::Embed => f.write_str("embed"),
        }
    }
}

/// Selection over catalog entries; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub family: Option<FormatFamily>,
    /// Lower-cased quality label fragment ("1080", "720p", "4k").
    pub quality: Option<String>,
}

impl CatalogFilter {
    pub fn family(mut self, family: FormatFamily) -> Self {
        self.family = Some(family);
        self
    }

    pub fn quality(mut self, label: &str) -> Self {
        self.quality = Some(label.trim().to_ascii_lowercase());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.family.is_none() && self.quality.is_none()
    }

    pub fn matches(&self, descriptor: &MediaDescriptor) -> bool {
        if let Some(family) = &self.family {
            if !family.matches(descriptor) {
                return false;
            }
        }
        match self.quality.as_deref() {
            None | Some("all") => true,
            Some(wanted) => {
                let label = descriptor.quality.as_str().to_ascii_lowercase();
                if wanted == "4k" {
                    label.contains("4k") || label.contains("2160")
                } else {
                    label.contains(wanted)
                }
            }
        }
    }
}
