//! Replays a HAR file through the engine as observed exchanges.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use super::parse::{get_header, HarEntry, HarLog};
use crate::engine::Engine;
use crate::exchange::{ContextId, ObservedExchange, ResponseHeaders};

/// Outcome of one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Entries read from the file.
    pub entries: usize,
    /// Entries that added a catalog entry.
    pub added: usize,
}

/// Response headers as the live observer would have reported them. Browsers
/// sometimes strip `Content-Type`/`Content-Length` from exports while keeping
/// the decoded body's MIME type and size.
fn response_headers(entry: &HarEntry) -> ResponseHeaders {
    let mut headers = ResponseHeaders::from_pairs(
        entry
            .response
            .headers
            .iter()
            .map(|h| (h.name.as_str(), h.value.as_str())),
    );
    if let Some(content) = &entry.response.content {
        if get_header(&entry.response.headers, "Content-Type").is_none() {
            if let Some(mime) = content.mime_type.as_deref().filter(|m| !m.is_empty()) {
                headers.insert("Content-Type", mime);
            }
        }
        if get_header(&entry.response.headers, "Content-Length").is_none() {
            if let Some(size) = content.size.filter(|s| *s > 0) {
                headers.insert("Content-Length", size.to_string());
            }
        }
    }
    headers
}

/// Recorded entry times are clamped to this; anything longer is far past
/// every correlation window anyway.
const MAX_ENTRY_TIME: Duration = Duration::from_secs(24 * 60 * 60);

fn elapsed(entry: &HarEntry) -> Duration {
    entry
        .time
        .filter(|t| t.is_finite() && *t > 0.0)
        .map(|t| {
            Duration::try_from_secs_f64(t / 1000.0)
                .unwrap_or(MAX_ENTRY_TIME)
                .min(MAX_ENTRY_TIME)
        })
        .unwrap_or_default()
}

/// Feeds every entry of the HAR file at `path` into `ctx` as
/// Requested → HeadersReceived → Completed. Entries without a response
/// (status 0) skip the headers phase and rely on the URL-only fallback.
pub fn replay_har(path: &Path, engine: &Engine, ctx: &ContextId) -> Result<ReplaySummary> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read HAR file: {}", path.display()))?;
    let har: HarLog = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse HAR JSON: {}", path.display()))?;

    let mut summary = ReplaySummary {
        entries: har.log.entries.len(),
        added: 0,
    };
    for (i, entry) in har.log.entries.iter().enumerate() {
        let before = engine.count(ctx);
        let id = format!("har-{i}");
        let url = entry.request.url.as_str();
        let start = Instant::now();

        engine.handle_exchange(&ObservedExchange::requested(
            ctx.clone(),
            id.as_str(),
            url,
            start,
        ));
        if entry.response.status != 0 {
            engine.handle_exchange(&ObservedExchange::headers_received(
                ctx.clone(),
                id.as_str(),
                url,
                response_headers(entry),
                start,
            ));
        }
        engine.handle_exchange(&ObservedExchange::completed(
            ctx.clone(),
            id.as_str(),
            url,
            start.checked_add(elapsed(entry)).unwrap_or(start),
        ));

        if engine.count(ctx) > before {
            summary.added += 1;
        }
    }
    tracing::info!(
        path = %path.display(),
        entries = summary.entries,
        added = summary.added,
        "HAR replayed"
    );
    Ok(summary)
}
