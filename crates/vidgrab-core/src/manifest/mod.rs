//! Adaptive-streaming manifests: variant parsing and on-demand fetch.

mod fetch;
mod parse;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub use fetch::{fetch_text, fetch_variants, FetchError, FetchOptions};
pub use parse::{parse_variants, Variant};

use crate::media::{MediaDescriptor, ResourceType};

/// True for descriptors whose URL points at an HLS playlist.
pub fn has_variants(descriptor: &MediaDescriptor) -> bool {
    matches!(
        descriptor.resource_type,
        ResourceType::HlsMaster | ResourceType::HlsPlaylist
    )
}

/// Fetches the variants behind a catalog descriptor. Descriptors that are
/// not HLS playlists have none and yield an empty list without a request.
pub async fn variants_of(
    descriptor: &MediaDescriptor,
    opts: FetchOptions,
    abort: Arc<AtomicBool>,
) -> Result<Vec<Variant>, FetchError> {
    if !has_variants(descriptor) {
        return Ok(Vec::new());
    }
    fetch_variants(&descriptor.url, opts, abort).await
}
