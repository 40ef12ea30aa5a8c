//! Cancellable manifest download.
//!
//! One GET with libcurl on a blocking worker. The abort token is polled from
//! curl's progress callback, so cancellation takes effect mid-transfer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::parse::{parse_variants, Variant};
use crate::config::ManifestConfig;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid manifest URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("manifest request failed: {0}")]
    Transport(#[from] curl::Error),
    #[error("manifest request returned HTTP {0}")]
    Status(u32),
    #[error("manifest request timed out")]
    Timeout,
    #[error("manifest request cancelled")]
    Cancelled,
    #[error("manifest exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("manifest body is not valid UTF-8")]
    NotUtf8,
    #[error("manifest worker failed: {0}")]
    Join(String),
}

/// Request options for one fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_body_bytes: u64,
}

impl From<&ManifestConfig> for FetchOptions {
    fn from(cfg: &ManifestConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_body_bytes: cfg.max_body_bytes,
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&ManifestConfig::default())
    }
}

/// Downloads `url` as text. Runs in the current thread; call from
/// `spawn_blocking` when used from async code.
pub fn fetch_text(
    url: &str,
    opts: &FetchOptions,
    abort: &AtomicBool,
) -> Result<String, FetchError> {
    url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mut body: Vec<u8> = Vec::new();
    let mut too_large = false;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.progress(true)?;
    easy.accept_encoding("")?;

    let result = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if body.len() as u64 + data.len() as u64 > opts.max_body_bytes {
                too_large = true;
                // Returning a short count makes curl abort with a write error.
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.progress_function(|_, _, _, _| !abort.load(Ordering::Relaxed))?;
        transfer.perform()
    };

    if let Err(e) = result {
        if abort.load(Ordering::Relaxed) || e.is_aborted_by_callback() {
            return Err(FetchError::Cancelled);
        }
        if too_large {
            return Err(FetchError::TooLarge {
                limit: opts.max_body_bytes,
            });
        }
        if e.is_operation_timedout() {
            return Err(FetchError::Timeout);
        }
        return Err(FetchError::Transport(e));
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Status(code));
    }
    String::from_utf8(body).map_err(|_| FetchError::NotUtf8)
}

/// Fetches a master playlist and lists its variants.
///
/// Setting `abort` cancels the request; the result is then
/// [`FetchError::Cancelled`]. No retries.
pub async fn fetch_variants(
    url: &str,
    opts: FetchOptions,
    abort: Arc<AtomicBool>,
) -> Result<Vec<Variant>, FetchError> {
    let owned = url.to_string();
    let text = tokio::task::spawn_blocking(move || fetch_text(&owned, &opts, &abort))
        .await
        .map_err(|e| FetchError::Join(e.to_string()))?;
    match text {
        Ok(text) => {
            let variants = parse_variants(&text, url);
            tracing::debug!(url, count = variants.len(), "manifest parsed");
            Ok(variants)
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "manifest fetch failed");
            Err(e)
        }
    }
}
