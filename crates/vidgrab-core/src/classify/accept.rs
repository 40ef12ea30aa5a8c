//! Size floor and the two acceptance rules (content type, URL pattern).

use super::rule::{is_dash_mime, is_hls_mime, Candidate, Rule, RuleInput, RuleOutcome};
use crate::media::{ContainerFormat, ResourceType, DIRECT_FILE_EXTENSIONS};
use crate::url_model::UrlParts;

/// Master playlists are recognized by naming convention only.
pub(crate) fn is_master_playlist_name(parts: &UrlParts) -> bool {
    parts
        .file_name
        .as_deref()
        .is_some_and(|name| name.contains("master") || name == "manifest.m3u8")
}

fn hls_candidate(parts: &UrlParts) -> Candidate {
    let resource_type = if is_master_playlist_name(parts) {
        ResourceType::HlsMaster
    } else {
        ResourceType::HlsPlaylist
    };
    Candidate {
        resource_type,
        container: ContainerFormat::M3u8,
    }
}

const DASH: Candidate = Candidate {
    resource_type: ResourceType::Dash,
    container: ContainerFormat::Mpd,
};

/// Rejects resources whose known length is below the global floor.
/// Playlist documents are exempt: they are small by nature.
pub struct MinSize {
    pub min_bytes: u64,
}

impl Rule for MinSize {
    fn name(&self) -> &'static str {
        "min-size"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> RuleOutcome {
        if input.looks_like_manifest() {
            return RuleOutcome::Continue;
        }
        match input.content_length {
            Some(len) if len < self.min_bytes => RuleOutcome::Reject,
            _ => RuleOutcome::Continue,
        }
    }
}

/// Accepts on a media content type; only decisive when headers are known.
pub struct ContentType;

impl Rule for ContentType {
    fn name(&self) -> &'static str {
        "content-type"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> RuleOutcome {
        let Some(ct) = input.content_type.as_deref() else {
            return RuleOutcome::Continue;
        };
        if ct.starts_with("video/") {
            let mut container = ContainerFormat::from_mime(ct);
            if container == ContainerFormat::Unknown {
                container = input
                    .parts
                    .extension
                    .as_deref()
                    .map(ContainerFormat::from_extension)
                    .unwrap_or(ContainerFormat::Unknown);
            }
            return RuleOutcome::Accept(Candidate {
                resource_type: ResourceType::DirectFile(container),
                container,
            });
        }
        if is_hls_mime(ct) {
            return RuleOutcome::Accept(hls_candidate(input.parts));
        }
        if is_dash_mime(ct) {
            return RuleOutcome::Accept(DASH);
        }
        RuleOutcome::Continue
    }
}

/// Accepts on file naming alone. Direct files with a known length must also
/// clear the direct-file floor.
pub struct UrlPattern {
    pub min_direct_file_bytes: u64,
}

impl Rule for UrlPattern {
    fn name(&self) -> &'static str {
        "url-pattern"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> RuleOutcome {
        let Some(ext) = input.parts.extension.as_deref() else {
            return RuleOutcome::Continue;
        };
        match ext {
            "m3u8" => RuleOutcome::Accept(hls_candidate(input.parts)),
            "mpd" => RuleOutcome::Accept(DASH),
            _ if DIRECT_FILE_EXTENSIONS.contains(&ext) => {
                if input
                    .content_length
                    .is_some_and(|len| len < self.min_direct_file_bytes)
                {
                    return RuleOutcome::Reject;
                }
                let container = ContainerFormat::from_extension(ext);
                RuleOutcome::Accept(Candidate {
                    resource_type: ResourceType::DirectFile(container),
                    container,
                })
            }
            _ => RuleOutcome::Continue,
        }
    }
}
