//! Minimal HAR 1.2 structures for replaying recorded traffic.

use serde::Deserialize;

/// Root HAR log (top-level wrapper).
#[derive(Debug, Deserialize)]
pub struct HarLog {
    pub log: HarRoot,
}

#[derive(Debug, Deserialize)]
pub struct HarRoot {
    #[serde(default)]
    pub entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HarEntry {
    pub request: HarRequest,
    pub response: HarResponse,
    /// Total elapsed milliseconds; `-1` or absent when unknown.
    #[serde(default)]
    pub time: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct HarRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct HarResponse {
    /// 0 for requests that never got a response (blocked, aborted).
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub headers: Vec<HarHeader>,
    #[serde(default)]
    pub content: Option<HarContent>,
}

#[derive(Debug, Deserialize)]
pub struct HarHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct HarContent {
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
}

/// Returns the value of the first header with the given name (case-insensitive).
pub fn get_header<'a>(headers: &'a [HarHeader], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}
