//! Page hook notifications to descriptors. Hooks bypass the correlator:
//! each notification is complete on its own.

use crate::classify::Classifier;
use crate::exchange::{HookKind, PageHookNotification};
use crate::media::{ContainerFormat, MediaDescriptor, Origin, Quality, ResourceType};
use crate::provider;

const MEDIASOURCE_SCHEME: &str = "mediasource://";

fn video_mime(n: &PageHookNotification) -> Option<String> {
    let mime = n.mime_type.as_deref()?;
    let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence.starts_with("video/").then_some(essence)
}

/// Describes `notification`, or `None` when it does not qualify as media.
pub fn describe_page_hook(
    classifier: &Classifier,
    notification: &PageHookNotification,
    min_blob_bytes: u64,
) -> Option<MediaDescriptor> {
    let descriptor = match notification.kind {
        HookKind::VideoElement | HookKind::FetchOrXhr => {
            let url = notification.url.as_deref()?;
            if url.starts_with("blob:") {
                return None;
            }
            classifier.classify(url, None).accepted()?
        }
        HookKind::Blob => {
            let mime = video_mime(notification)?;
            let size = notification.byte_size.filter(|s| *s > min_blob_bytes)?;
            let url = notification.url.clone()?;
            let container = ContainerFormat::from_mime(&mime);
            MediaDescriptor {
                quality: classifier.infer_quality(ResourceType::Blob, &url, Some(size)),
                url,
                resource_type: ResourceType::Blob,
                container_format: container,
                byte_size: Some(size),
                provider: None,
                origin: Origin::PageHook,
                original_url: None,
            }
        }
        HookKind::MediaSource => {
            let mime = video_mime(notification)?;
            MediaDescriptor {
                url: format!("{MEDIASOURCE_SCHEME}{mime}"),
                resource_type: ResourceType::MediaSourceStream,
                container_format: ContainerFormat::from_mime(&mime),
                quality: Quality::Unknown,
                byte_size: None,
                provider: None,
                origin: Origin::PageHook,
                original_url: None,
            }
        }
        HookKind::Embed => {
            let url = notification.url.as_deref()?;
            let provider = notification
                .provider
                .clone()
                .or_else(|| provider::resolve_provider(url).map(str::to_string))?;
            MediaDescriptor {
                url: url.to_string(),
                resource_type: ResourceType::Embed,
                container_format: ContainerFormat::Unknown,
                quality: classifier.infer_quality(ResourceType::Embed, url, None),
                byte_size: None,
                provider: Some(provider),
                origin: Origin::PageHook,
                original_url: None,
            }
        }
    };
    Some(descriptor.with_origin(Origin::PageHook))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(n: PageHookNotification) -> Option<MediaDescriptor> {
        describe_page_hook(&Classifier::default(), &n, 100_000)
    }

    #[test]
    fn blob_needs_video_mime_and_size() {
        let base = PageHookNotification::new(HookKind::Blob).with_url("blob:https://a.com/1");
        assert!(describe(base.clone().with_mime_type("video/mp4").with_byte_size(50_000)).is_none());
        assert!(describe(base.clone().with_mime_type("audio/mp4").with_byte_size(5_000_000)).is_none());
        assert!(describe(base.clone().with_byte_size(5_000_000)).is_none());

        let d = describe(
            base.with_mime_type("video/webm; codecs=vp9")
                .with_byte_size(40 * 1024 * 1024),
        )
        .unwrap();
        assert_eq!(d.resource_type, ResourceType::Blob);
        assert_eq!(d.container_format, ContainerFormat::Webm);
        assert_eq!(d.quality, Quality::P480);
        assert_eq!(d.origin, Origin::PageHook);
    }

    #[test]
    fn media_source_yields_pseudo_url() {
        let d = describe(
            PageHookNotification::new(HookKind::MediaSource)
                .with_mime_type("video/mp4; codecs=\"avc1.64001f\""),
        )
        .unwrap();
        assert_eq!(d.url, "mediasource://video/mp4");
        assert_eq!(d.resource_type, ResourceType::MediaSourceStream);
        assert!(describe(
            PageHookNotification::new(HookKind::MediaSource).with_mime_type("audio/mp4")
        )
        .is_none());
    }

    #[test]
    fn video_element_is_classified_and_blob_urls_skipped() {
        let d = describe(
            PageHookNotification::new(HookKind::VideoElement)
                .with_url("https://cdn.example.com/hls/master.m3u8"),
        )
        .unwrap();
        assert_eq!(d.resource_type, ResourceType::HlsMaster);
        assert_eq!(d.origin, Origin::PageHook);

        assert!(describe(
            PageHookNotification::new(HookKind::VideoElement).with_url("blob:https://a.com/x")
        )
        .is_none());
        assert!(describe(
            PageHookNotification::new(HookKind::FetchOrXhr)
                .with_url("https://cdn.example.com/app.js")
        )
        .is_none());
    }

    #[test]
    fn embed_needs_a_provider() {
        let d = describe(
            PageHookNotification::new(HookKind::Embed).with_url("https://vidmoly.to/embed-abc.html"),
        )
        .unwrap();
        assert_eq!(d.provider.as_deref(), Some(provider::VIDMOLY));
        assert_eq!(d.resource_type, ResourceType::Embed);

        assert!(describe(
            PageHookNotification::new(HookKind::Embed).with_url("https://blog.example.com/post")
        )
        .is_none());

        let d = describe(
            PageHookNotification::new(HookKind::Embed)
                .with_url("https://player.example.com/e/1")
                .with_provider("Custom"),
        )
        .unwrap();
        assert_eq!(d.provider.as_deref(), Some("Custom"));
    }
}
