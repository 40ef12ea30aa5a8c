//! Media classification.
//!
//! An observed URL (plus response headers, once known) runs through an
//! ordered list of named rules. The first decisive rule wins: the early rules
//! can only reject, the later ones accept. An accepted candidate is turned
//! into a [`MediaDescriptor`] with quality, provider and canonical URL
//! attached; none of those can flip the decision.

mod accept;
mod noise;
mod rule;
mod suppress;

pub use accept::{ContentType, MinSize, UrlPattern};
pub use noise::NoiseBlacklist;
pub use rule::{Candidate, Rule, RuleInput, RuleOutcome};
pub use suppress::{DoodstreamAdSmallFile, MailruTrimmedClip, OkruThumbnailPlaylist, SibnetPlaceholder};

use crate::config::{ClassifierConfig, QualityBuckets};
use crate::exchange::ResponseHeaders;
use crate::media::{MediaDescriptor, Origin, Quality, ResourceType};
use crate::provider;
use crate::url_model::UrlParts;

/// Rule name reported when no rule matched.
pub const NO_MATCH: &str = "no-match";

/// Outcome of classifying one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept(MediaDescriptor),
    /// Not media. `rule` names the rule that decided.
    Reject { rule: &'static str },
}

impl Verdict {
    pub fn accepted(self) -> Option<MediaDescriptor> {
        match self {
            Verdict::Accept(d) => Some(d),
            Verdict::Reject { .. } => None,
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept(_))
    }
}

/// Ordered ruleset plus the quality buckets used on accepted candidates.
pub struct Classifier {
    rules: Vec<Box<dyn Rule>>,
    buckets: QualityBuckets,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("rules", &self.rule_names())
            .field("buckets", &self.buckets)
            .finish()
    }
}

impl Classifier {
    /// The standard ruleset with thresholds from `cfg`.
    pub fn new(cfg: &ClassifierConfig) -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(NoiseBlacklist),
            Box::new(SibnetPlaceholder),
            Box::new(OkruThumbnailPlaylist),
            Box::new(MailruTrimmedClip),
            Box::new(DoodstreamAdSmallFile {
                max_bytes: cfg.doodstream_ad_max_bytes,
            }),
            Box::new(MinSize {
                min_bytes: cfg.min_media_bytes,
            }),
            Box::new(ContentType),
            Box::new(UrlPattern {
                min_direct_file_bytes: cfg.min_direct_file_bytes,
            }),
        ];
        Self::with_rules(rules, cfg.quality_buckets.clone())
    }

    /// A classifier over a custom rule list, evaluated in the given order.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>, buckets: QualityBuckets) -> Self {
        Self { rules, buckets }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Classifies `url`, using `headers` when the response is known.
    pub fn classify(&self, url: &str, headers: Option<&ResponseHeaders>) -> Verdict {
        let parts = UrlParts::parse(url);
        let input = RuleInput {
            parts: &parts,
            headers,
            content_type: headers.and_then(ResponseHeaders::content_type),
            content_length: headers.and_then(ResponseHeaders::content_length),
            provider: provider::resolve_parts(&parts),
        };

        for rule in &self.rules {
            match rule.evaluate(&input) {
                RuleOutcome::Continue => continue,
                RuleOutcome::Reject => {
                    tracing::debug!(rule = rule.name(), url, "rejected");
                    return Verdict::Reject { rule: rule.name() };
                }
                RuleOutcome::Accept(candidate) => {
                    return Verdict::Accept(self.describe(&input, candidate));
                }
            }
        }
        Verdict::Reject { rule: NO_MATCH }
    }

    fn describe(&self, input: &RuleInput<'_>, candidate: Candidate) -> MediaDescriptor {
        let raw = input.parts.raw.as_str();
        let canonical = provider::canonicalize(raw, input.provider);
        let rewritten = canonical != raw;

        let mut resource_type = candidate.resource_type;
        if rewritten
            && resource_type == ResourceType::HlsPlaylist
            && accept::is_master_playlist_name(&UrlParts::parse(&canonical))
        {
            resource_type = ResourceType::HlsMaster;
        }

        MediaDescriptor {
            quality: self.infer_quality(resource_type, raw, input.content_length),
            url: canonical,
            resource_type,
            container_format: candidate.container,
            byte_size: input.content_length,
            provider: input.provider.map(str::to_string),
            origin: if input.headers.is_some() {
                Origin::NetworkHeaders
            } else {
                Origin::NetworkUrlOnly
            },
            original_url: rewritten.then(|| raw.to_string()),
        }
    }

    /// Adaptive manifests are `Adaptive`. Otherwise a known content length
    /// picks the bucket (never for playlists), then a URL token, else `Unknown`.
    pub fn infer_quality(
        &self,
        resource_type: ResourceType,
        url: &str,
        content_length: Option<u64>,
    ) -> Quality {
        if resource_type.is_adaptive() {
            return Quality::Adaptive;
        }
        if !resource_type.is_manifest() {
            if let Some(len) = content_length {
                return Quality::from_content_length(len, &self.buckets);
            }
        }
        Quality::from_url_token(url).unwrap_or(Quality::Unknown)
    }
}

#[cfg(test)]
mod tests;
