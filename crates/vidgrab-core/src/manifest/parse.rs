//! Extended M3U master playlist parsing.

use serde::Serialize;

use crate::media::Quality;

const STREAM_INF: &str = "#EXT-X-STREAM-INF:";

/// One rendition listed by a master playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// Absolute URL of the rendition playlist.
    pub url: String,
    /// `"WxH"` as declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// Peak bits per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<u64>,
    pub quality: Quality,
}

/// Splits an attribute list on commas outside quoted strings.
fn split_attributes(list: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, ch) in list.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                out.extend(attribute(&list[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    out.extend(attribute(&list[start..]));
    out
}

fn attribute(raw: &str) -> Option<(&str, &str)> {
    let (name, value) = raw.split_once('=')?;
    Some((name.trim(), value.trim().trim_matches('"')))
}

fn height_of(resolution: &str) -> Option<u32> {
    let (_, h) = resolution.split_once(['x', 'X'])?;
    h.trim().parse().ok()
}

#[derive(Debug, Default)]
struct Declaration {
    resolution: Option<String>,
    bandwidth: Option<u64>,
}

impl Declaration {
    fn parse(attrs: &str) -> Self {
        let mut decl = Self::default();
        for (name, value) in split_attributes(attrs) {
            match name.to_ascii_uppercase().as_str() {
                "RESOLUTION" => decl.resolution = Some(value.to_string()),
                "BANDWIDTH" => decl.bandwidth = value.parse().ok(),
                _ => {}
            }
        }
        decl
    }

    fn into_variant(self, url: String) -> Variant {
        let quality = self
            .resolution
            .as_deref()
            .and_then(height_of)
            .map(Quality::from_height)
            .unwrap_or(Quality::Unknown);
        Variant {
            url,
            resolution: self.resolution,
            bandwidth: self.bandwidth,
            quality,
        }
    }
}

/// Lists the variants of a master playlist in declaration order.
///
/// Relative URIs are resolved against `base_url`. Declarations without a
/// URI line, and URIs that cannot be resolved, are skipped. Never fails:
/// text that is not a master playlist yields an empty list.
pub fn parse_variants(text: &str, base_url: &str) -> Vec<Variant> {
    let base = url::Url::parse(base_url).ok();
    let mut variants = Vec::new();
    let mut pending: Option<Declaration> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(attrs) = line.strip_prefix(STREAM_INF) {
            if pending.is_some() {
                tracing::debug!("stream declaration without URI skipped");
            }
            pending = Some(Declaration::parse(attrs));
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        let Some(decl) = pending.take() else {
            continue;
        };
        match resolve(base.as_ref(), line) {
            Some(url) => variants.push(decl.into_variant(url)),
            None => tracing::debug!(uri = line, "unresolvable variant URI skipped"),
        }
    }
    if pending.is_some() {
        tracing::debug!("trailing stream declaration without URI skipped");
    }
    variants
}

fn resolve(base: Option<&url::Url>, uri: &str) -> Option<String> {
    let joined = match base {
        Some(base) => base.join(uri),
        None => url::Url::parse(uri),
    };
    joined.ok().map(|u| u.to_string())
}
