//! Boundary event types.
//!
//! Producers (a network observer, page instrumentation, a HAR replay) are
//! normalized into these two shapes before anything reaches the classifier.

mod headers;

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

pub use headers::ResponseHeaders;

/// Identifier of one isolated browsing context (a tab, a frame tree).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextId(pub String);

impl ContextId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for ContextId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of one request/response cycle, unique within its context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeId(pub String);

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExchangeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for ExchangeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Lifecycle phase at which an exchange was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Requested,
    HeadersReceived,
    Completed,
}

/// One network exchange seen passively at one phase.
#[derive(Debug, Clone)]
pub struct ObservedExchange {
    pub exchange_id: ExchangeId,
    pub context_id: ContextId,
    pub url: String,
    pub phase: Phase,
    /// Response headers; only meaningful for `HeadersReceived`.
    pub headers: Option<ResponseHeaders>,
    pub observed_at: Instant,
}

impl ObservedExchange {
    pub fn requested(
        context_id: impl Into<ContextId>,
        exchange_id: impl Into<ExchangeId>,
        url: impl Into<String>,
        observed_at: Instant,
    ) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            context_id: context_id.into(),
            url: url.into(),
            phase: Phase::Requested,
            headers: None,
            observed_at,
        }
    }

    pub fn headers_received(
        context_id: impl Into<ContextId>,
        exchange_id: impl Into<ExchangeId>,
        url: impl Into<String>,
        headers: ResponseHeaders,
        observed_at: Instant,
    ) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            context_id: context_id.into(),
            url: url.into(),
            phase: Phase::HeadersReceived,
            headers: Some(headers),
            observed_at,
        }
    }

    pub fn completed(
        context_id: impl Into<ContextId>,
        exchange_id: impl Into<ExchangeId>,
        url: impl Into<String>,
        observed_at: Instant,
    ) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            context_id: context_id.into(),
            url: url.into(),
            phase: Phase::Completed,
            headers: None,
            observed_at,
        }
    }
}

/// Which page hook produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookKind {
    /// `URL.createObjectURL` on a Blob.
    Blob,
    /// `MediaSource.addSourceBuffer`.
    MediaSource,
    /// A `<video>` element's source was set or discovered.
    VideoElement,
    /// A page-initiated `fetch` or XHR to a media-looking URL.
    FetchOrXhr,
    /// An embedded player frame.
    Embed,
}

/// One signal relayed from in-page instrumentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageHookNotification {
    pub kind: HookKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub byte_size: Option<u64>,
    #[serde(default)]
    pub provider: Option<String>,
}

impl PageHookNotification {
    pub fn new(kind: HookKind) -> Self {
        Self {
            kind,
            url: None,
            mime_type: None,
            byte_size: None,
            provider: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }

    pub fn with_byte_size(mut self, size: u64) -> Self {
        self.byte_size = Some(size);
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}
