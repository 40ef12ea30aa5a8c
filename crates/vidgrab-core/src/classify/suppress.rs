//! Hostname-scoped provider carve-outs.
//!
//! Each rule rejects URLs of one provider that would otherwise match an
//! acceptance rule but are known not to be content.

use std::sync::LazyLock;

use regex::Regex;

use super::rule::{Rule, RuleInput, RuleOutcome};
use crate::media::DIRECT_FILE_EXTENSIONS;
use crate::provider::{DOODSTREAM, MAILRU, OKRU, SIBNET};

static SIBNET_DV_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)dv\d+").unwrap());

static DOODSTREAM_AD_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:promo|preroll|pr)\d*\.").unwrap());

fn is_direct_file(input: &RuleInput<'_>) -> bool {
    input
        .parts
        .extension
        .as_deref()
        .is_some_and(|ext| DIRECT_FILE_EXTENSIONS.contains(&ext))
}

fn reject_if(hit: bool) -> RuleOutcome {
    if hit {
        RuleOutcome::Reject
    } else {
        RuleOutcome::Continue
    }
}

/// Sibnet `/v/<hash>/<id>.mp4` links without a `dv<N>` media host are embed placeholders.
pub struct SibnetPlaceholder;

impl Rule for SibnetPlaceholder {
    fn name(&self) -> &'static str {
        "sibnet-placeholder"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> RuleOutcome {
        if input.provider != Some(SIBNET) || !input.parts.has_extension("mp4") {
            return RuleOutcome::Continue;
        }
        if !input.parts.path.contains("/v/") {
            return RuleOutcome::Continue;
        }
        let has_marker = SIBNET_DV_MARKER.is_match(&input.parts.host_and_path());
        reject_if(!has_marker)
    }
}

/// Ok.ru publishes seek-preview sprites as their own HLS playlists.
pub struct OkruThumbnailPlaylist;

impl Rule for OkruThumbnailPlaylist {
    fn name(&self) -> &'static str {
        "okru-thumbnail-playlist"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> RuleOutcome {
        if input.provider != Some(OKRU) || !input.parts.has_extension("m3u8") {
            return RuleOutcome::Continue;
        }
        let name = input.parts.file_name.as_deref().unwrap_or("");
        reject_if(
            name.contains("thumb")
                || name.contains("sprite")
                || input.parts.path.contains("/thumbs/"),
        )
    }
}

/// Mail.ru serves ad-trimmed preview cuts as standalone direct files.
pub struct MailruTrimmedClip;

impl Rule for MailruTrimmedClip {
    fn name(&self) -> &'static str {
        "mailru-trimmed-clip"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> RuleOutcome {
        if input.provider != Some(MAILRU) || !is_direct_file(input) {
            return RuleOutcome::Continue;
        }
        let name = input.parts.file_name.as_deref().unwrap_or("");
        reject_if(
            input.parts.path.contains("/preview/")
                || name.contains("_trim")
                || name.contains("-trim"),
        )
    }
}

/// Small files on Doodstream's promo hosts are pre-roll clips.
pub struct DoodstreamAdSmallFile {
    pub max_bytes: u64,
}

impl Rule for DoodstreamAdSmallFile {
    fn name(&self) -> &'static str {
        "doodstream-ad-small-file"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> RuleOutcome {
        if input.provider != Some(DOODSTREAM) {
            return RuleOutcome::Continue;
        }
        let ad_host = DOODSTREAM_AD_HOST.is_match(&input.parts.host);
        let small = input.content_length.is_some_and(|len| len < self.max_bytes);
        reject_if(ad_host && small)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::resolve_provider;
    use crate::url_model::UrlParts;

    fn eval(rule: &dyn Rule, url: &str, content_length: Option<u64>) -> RuleOutcome {
        let parts = UrlParts::parse(url);
        rule.evaluate(&RuleInput {
            parts: &parts,
            headers: None,
            content_type: None,
            content_length,
            provider: resolve_provider(url),
        })
    }

    #[test]
    fn patterns_compile() {
        assert!(SIBNET_DV_MARKER.is_match("dv97.sibnet.ru"));
        assert!(DOODSTREAM_AD_HOST.is_match("preroll2.dood.video"));
        assert!(!DOODSTREAM_AD_HOST.is_match("cdn.dood.video"));
    }

    #[test]
    fn sibnet_placeholder() {
        let rule = SibnetPlaceholder;
        assert_eq!(
            eval(&rule, "https://video.sibnet.ru/v/abc123/456.mp4", None),
            RuleOutcome::Reject
        );
        assert_eq!(
            eval(&rule, "https://dv97.sibnet.ru/v/abc123/456.mp4", None),
            RuleOutcome::Continue
        );
        // Same shape on another host is not Sibnet's business.
        assert_eq!(
            eval(&rule, "https://cdn.example.com/v/abc123/456.mp4", None),
            RuleOutcome::Continue
        );
    }

    #[test]
    fn okru_thumbnail_playlist() {
        let rule = OkruThumbnailPlaylist;
        assert_eq!(
            eval(&rule, "https://vd12.mycdn.me/srcIp/thumbs/index.m3u8", None),
            RuleOutcome::Reject
        );
        assert_eq!(
            eval(&rule, "https://vd12.mycdn.me/video/sprite_0.m3u8", None),
            RuleOutcome::Reject
        );
        assert_eq!(
            eval(&rule, "https://vd12.mycdn.me/video/master.m3u8", None),
            RuleOutcome::Continue
        );
        assert_eq!(
            eval(&rule, "https://cdn.example.com/thumbs/index.m3u8", None),
            RuleOutcome::Continue
        );
    }

    #[test]
    fn mailru_trimmed_clip() {
        let rule = MailruTrimmedClip;
        assert_eq!(
            eval(&rule, "https://cdn.my.mail.ru/preview/1/clip.mp4", None),
            RuleOutcome::Reject
        );
        assert_eq!(
            eval(&rule, "https://cdn.my.mail.ru/v/1/movie_trim.mp4", None),
            RuleOutcome::Reject
        );
        assert_eq!(
            eval(&rule, "https://cdn.my.mail.ru/v/1/movie.mp4", None),
            RuleOutcome::Continue
        );
    }

    #[test]
    fn doodstream_threshold_only_on_promo_hosts() {
        let rule = DoodstreamAdSmallFile { max_bytes: 5_000_000 };
        assert_eq!(
            eval(&rule, "https://promo3.dood.video/x/clip.mp4", Some(1_000_000)),
            RuleOutcome::Reject
        );
        assert_eq!(
            eval(&rule, "https://promo3.dood.video/x/clip.mp4", Some(50_000_000)),
            RuleOutcome::Continue
        );
        assert_eq!(
            eval(&rule, "https://promo3.dood.video/x/clip.mp4", None),
            RuleOutcome::Continue
        );
        assert_eq!(
            eval(&rule, "https://xk9.cloudatacdn.com/u/clip.mp4", Some(1_000_000)),
            RuleOutcome::Continue
        );
    }
}
