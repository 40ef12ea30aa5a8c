//! Rule interface shared by every classification step.

use crate::exchange::ResponseHeaders;
use crate::media::{ContainerFormat, ResourceType};
use crate::url_model::UrlParts;

/// Everything a rule may look at, computed once per classification.
#[derive(Debug)]
pub struct RuleInput<'a> {
    pub parts: &'a UrlParts,
    pub headers: Option<&'a ResponseHeaders>,
    /// Lower-cased media type essence from the headers.
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    /// Resolved provider; rules may scope on it but it never decides alone.
    pub provider: Option<&'static str>,
}

impl RuleInput<'_> {
    /// True when the URL or the content type says this is a playlist document.
    pub fn looks_like_manifest(&self) -> bool {
        if matches!(self.parts.extension.as_deref(), Some("m3u8" | "mpd")) {
            return true;
        }
        self.content_type
            .as_deref()
            .is_some_and(|ct| is_hls_mime(ct) || is_dash_mime(ct))
    }
}

pub(crate) fn is_hls_mime(ct: &str) -> bool {
    matches!(
        ct,
        "application/vnd.apple.mpegurl"
            | "application/x-mpegurl"
            | "audio/mpegurl"
            | "audio/x-mpegurl"
    )
}

pub(crate) fn is_dash_mime(ct: &str) -> bool {
    ct == "application/dash+xml"
}

/// What a rule matched as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub resource_type: ResourceType,
    pub container: ContainerFormat,
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Not decisive; evaluate the next rule.
    Continue,
    Reject,
    Accept(Candidate),
}

/// One named step of the ordered classification ruleset.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;
    fn evaluate(&self, input: &RuleInput<'_>) -> RuleOutcome;
}
