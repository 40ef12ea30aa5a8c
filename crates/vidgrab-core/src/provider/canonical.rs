//! Provider-specific URL rewrites.

use std::sync::LazyLock;

use regex::Regex;

use super::table::{SIBNET, VIDMOLY};

/// Vidmoly per-rendition playlists (`index-v1-a1.m3u8`) sit next to `master.m3u8`.
static VIDMOLY_SEGMENT_PLAYLIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^index(?:-[a-z0-9]+)*\.m3u8$").unwrap());

/// Sibnet media paths carry the numeric video id: `/v/<hash>/<id>.mp4`.
static SIBNET_MEDIA_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/v/[^/]+/(\d+)\.(?:mp4|m3u8)$").unwrap());

const SIBNET_WATCH_TEMPLATE: &str = "https://video.sibnet.ru/shell.php?videoid=";

/// Rewrites `url` into the form a consumer can use for `provider`.
///
/// Unknown providers and URLs that do not fit the provider's pattern are
/// returned unchanged.
pub fn canonicalize(url: &str, provider: Option<&str>) -> String {
    let rewritten = match provider {
        Some(VIDMOLY) => vidmoly_master(url),
        Some(SIBNET) => sibnet_watch_page(url),
        _ => None,
    };
    rewritten.unwrap_or_else(|| url.to_string())
}

fn vidmoly_master(url: &str) -> Option<String> {
    let mut parsed = url::Url::parse(url).ok()?;
    let last = parsed.path_segments()?.last()?.to_string();
    if !VIDMOLY_SEGMENT_PLAYLIST.is_match(&last) {
        return None;
    }
    parsed.path_segments_mut().ok()?.pop().push("master.m3u8");
    Some(parsed.to_string())
}

fn sibnet_watch_page(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let id = SIBNET_MEDIA_PATH.captures(parsed.path())?.get(1)?.as_str().to_string();
    Some(format!("{SIBNET_WATCH_TEMPLATE}{id}"))
}
