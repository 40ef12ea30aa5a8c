use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{ContainerFormat, Quality};

/// What kind of resource a descriptor points at.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "container", rename_all = "snake_case")]
pub enum ResourceType {
    HlsMaster,
    HlsPlaylist,
    Dash,
    DirectFile(ContainerFormat),
    Blob,
    MediaSourceStream,
    Embed,
}

impl ResourceType {
    /// Adaptive manifests carry every rendition, so their quality is "adaptive".
    pub fn is_adaptive(&self) -> bool {
        matches!(self, ResourceType::HlsMaster | ResourceType::Dash)
    }

    pub fn is_manifest(&self) -> bool {
        matches!(
            self,
            ResourceType::HlsMaster | ResourceType::HlsPlaylist | ResourceType::Dash
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::HlsMaster => "HLS Master",
            ResourceType::HlsPlaylist => "HLS Playlist",
            ResourceType::Dash => "DASH",
            ResourceType::DirectFile(_) => "File",
            ResourceType::Blob => "Blob",
            ResourceType::MediaSourceStream => "MSE",
            ResourceType::Embed => "Embed",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::DirectFile(c) => write!(f, "{} ({})", self.label(), c),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Which signal produced a descriptor.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    NetworkHeaders,
    NetworkUrlOnly,
    PageHook,
    ManifestFallback,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::NetworkHeaders => "network_headers",
            Origin::NetworkUrlOnly => "network_url_only",
            Origin::PageHook => "page_hook",
            Origin::ManifestFallback => "manifest_fallback",
        }
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification result for one accepted media resource.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    pub url: String,
    pub resource_type: ResourceType,
    pub container_format: ContainerFormat,
    pub quality: Quality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub origin: Origin,
    /// The observed URL, present only when `url` is a provider rewrite of it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

impl MediaDescriptor {
    /// Same descriptor with a different origin tag.
    pub fn with_origin(self, origin: Origin) -> Self {
        Self { origin, ..self }
    }
}
