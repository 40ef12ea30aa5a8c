use crate::media::{MediaDescriptor, Quality};
use crate::url_model::strip_query;

/// Identity used to suppress duplicate catalog entries.
///
/// Query string and fragment are dropped; quality is kept, so renditions of
/// one path stay separate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub url: String,
    pub quality: Quality,
}

impl DedupKey {
    pub fn new(url: &str, quality: Quality) -> Self {
        Self {
            url: strip_query(url),
            quality,
        }
    }

    pub fn of(descriptor: &MediaDescriptor) -> Self {
        Self::new(&descriptor.url, descriptor.quality)
    }

    /// String form for logs: "quality|url".
    pub fn to_string_key(&self) -> String {
        format!("{}|{}", self.quality, self.url)
    }
}
