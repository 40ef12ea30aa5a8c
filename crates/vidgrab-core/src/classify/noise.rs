//! Noise blacklist: static assets, stream segments, trackers and ads.

use super::rule::{Rule, RuleInput, RuleOutcome};

const STATIC_ASSET_EXTENSIONS: &[&str] = &[
    "js", "mjs", "css", "woff", "woff2", "ttf", "otf", "eot", "png", "jpg", "jpeg", "gif", "svg",
    "webp", "ico", "avif", "bmp", "vtt", "srt",
];

/// Pieces of a stream, never a whole resource.
const SEGMENT_EXTENSIONS: &[&str] = &["ts", "m4s", "m4f", "cmfv", "cmfa"];

const SEGMENT_CONTENT_TYPES: &[&str] = &[
    "video/mp2t",
    "video/iso.segment",
    "video/vnd.dlna.mpeg-tts",
];

const TRACKER_HOST_FRAGMENTS: &[&str] = &[
    "google-analytics",
    "googletagmanager",
    "googlesyndication",
    "doubleclick",
    "scorecardresearch",
];

/// Unambiguous tracking and ad words. Matched against host labels, path
/// segments and the `-`/`_`/`.` separated words inside a segment.
const NOISE_WORDS: &[&str] = &[
    "ads",
    "adserver",
    "advert",
    "advertisement",
    "advertisements",
    "analytics",
    "banner",
    "banners",
    "beacon",
    "pixel",
    "telemetry",
    "tracker",
    "tracking",
    "vast",
    "vmap",
];

/// Short words that also occur in titles (`ad-astra`, `sound-track`). Only a
/// whole path segment counts.
const NOISE_SEGMENTS: &[&str] = &[
    "ad", "collect", "counter", "metrics", "stat", "stats", "track",
];

/// Host labels beyond [`NOISE_WORDS`].
const NOISE_HOST_LABELS: &[&str] = &["ad"];

pub struct NoiseBlacklist;

impl NoiseBlacklist {
    fn is_static_or_segment(input: &RuleInput<'_>) -> bool {
        if let Some(ext) = input.parts.extension.as_deref() {
            if STATIC_ASSET_EXTENSIONS.contains(&ext) || SEGMENT_EXTENSIONS.contains(&ext) {
                return true;
            }
        }
        input
            .content_type
            .as_deref()
            .is_some_and(|ct| SEGMENT_CONTENT_TYPES.contains(&ct))
    }

    fn is_tracker_host(host: &str) -> bool {
        TRACKER_HOST_FRAGMENTS.iter().any(|f| host.contains(f))
            || host
                .split('.')
                .any(|label| NOISE_WORDS.contains(&label) || NOISE_HOST_LABELS.contains(&label))
    }

    fn is_tracker_path(path: &str) -> bool {
        path.split('/').filter(|s| !s.is_empty()).any(|segment| {
            NOISE_SEGMENTS.contains(&segment)
                || segment
                    .split(['-', '_', '.'])
                    .any(|word| NOISE_WORDS.contains(&word))
        })
    }
}

impl Rule for NoiseBlacklist {
    fn name(&self) -> &'static str {
        "noise-blacklist"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> RuleOutcome {
        if Self::is_static_or_segment(input)
            || Self::is_tracker_host(&input.parts.host)
            || Self::is_tracker_path(&input.parts.path)
        {
            RuleOutcome::Reject
        } else {
            RuleOutcome::Continue
        }
    }
}
