//! Media descriptor types shared by the classifier, catalog and consumers.

mod descriptor;
mod format;
mod quality;

pub use descriptor::{MediaDescriptor, Origin, ResourceType};
pub use format::{ContainerFormat, DIRECT_FILE_EXTENSIONS};
pub use quality::Quality;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MediaDescriptor {
        MediaDescriptor {
            url: "https://cdn.example.com/v.mp4".to_string(),
            resource_type: ResourceType::DirectFile(ContainerFormat::Mp4),
            container_format: ContainerFormat::Mp4,
            quality: Quality::P720,
            byte_size: Some(90 * 1024 * 1024),
            provider: None,
            origin: Origin::NetworkHeaders,
            original_url: None,
        }
    }

    #[test]
    fn descriptor_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["quality"], "720p");
        assert_eq!(json["resource_type"]["kind"], "direct_file");
        assert_eq!(json["resource_type"]["container"], "mp4");
        assert_eq!(json["origin"], "network_headers");
        assert!(json.get("provider").is_none());
        assert!(json.get("original_url").is_none());
    }

    #[test]
    fn with_origin_only_changes_origin() {
        let d = sample();
        let tagged = d.clone().with_origin(Origin::ManifestFallback);
        assert_eq!(tagged.origin, Origin::ManifestFallback);
        assert_eq!(tagged.url, d.url);
        assert_eq!(tagged.quality, d.quality);
    }

    #[test]
    fn adaptive_types() {
        assert!(ResourceType::HlsMaster.is_adaptive());
        assert!(ResourceType::Dash.is_adaptive());
        assert!(!ResourceType::HlsPlaylist.is_adaptive());
        assert!(ResourceType::HlsPlaylist.is_manifest());
        assert_eq!(
            ResourceType::DirectFile(ContainerFormat::Webm).to_string(),
            "File (webm)"
        );
    }
}
