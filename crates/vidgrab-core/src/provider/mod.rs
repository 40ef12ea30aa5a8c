//! Provider resolution and URL canonicalization.
//!
//! Resolution is a first-match scan over an ordered table of hostname and
//! path fragments. Host comparison is on the parsed, lower-cased host, so the
//! result does not depend on scheme, host casing or the query string.

mod canonical;
mod table;

pub use canonical::canonicalize;
pub use table::{
    AKAMAI, CLOUDFRONT, DOODSTREAM, FILEMOON, GOOGLE_DRIVE, HDVID, MAILRU, OKRU, SIBNET, SISTENN,
    STREAMTAPE, UQLOAD, VIDMOLY, VIMEO, VOE,
};

use crate::url_model::UrlParts;
use table::PROVIDERS;

/// Canonical provider name for `url`, if any known provider matches.
pub fn resolve_provider(url: &str) -> Option<&'static str> {
    resolve_parts(&UrlParts::parse(url))
}

pub(crate) fn resolve_parts(parts: &UrlParts) -> Option<&'static str> {
    PROVIDERS
        .iter()
        .find(|entry| entry.matches(parts))
        .map(|entry| entry.name)
}

/// Every provider name in resolution order.
pub fn provider_names() -> impl Iterator<Item = &'static str> {
    PROVIDERS.iter().map(|entry| entry.name)
}
