//! URL modeling shared by the classifier, provider resolver and catalog.
//!
//! Parses an observed URL once into the lower-cased pieces the rules match
//! on, and derives the query-stripped form used for deduplication.

mod path;

pub use path::{extension, file_name};

/// Pre-digested view of an observed URL.
#[derive(Debug, Clone)]
pub struct UrlParts {
    /// The URL exactly as observed.
    pub raw: String,
    /// Lower-cased host, empty for host-less schemes (`blob:`, `data:`).
    pub host: String,
    /// Lower-cased path, without query or fragment.
    pub path: String,
    /// Lower-cased last path segment.
    pub file_name: Option<String>,
    /// Lower-cased extension of the last path segment.
    pub extension: Option<String>,
}

impl UrlParts {
    /// Parses `raw`; URLs the `url` crate rejects fall back to a plain split.
    pub fn parse(raw: &str) -> Self {
        match url::Url::parse(raw.trim()) {
            Ok(parsed) => Self {
                raw: raw.to_string(),
                host: parsed.host_str().unwrap_or("").to_ascii_lowercase(),
                path: parsed.path().to_ascii_lowercase(),
                file_name: file_name(&parsed).map(|s| s.to_ascii_lowercase()),
                extension: extension(&parsed),
            },
            Err(_) => {
                let path = strip_query(raw).to_ascii_lowercase();
                let file_name = path
                    .rsplit('/')
                    .find(|s| !s.is_empty())
                    .map(str::to_string);
                let extension = file_name
                    .as_deref()
                    .and_then(|n| n.rsplit_once('.'))
                    .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
                    .map(|(_, ext)| ext.to_string());
                Self {
                    raw: raw.to_string(),
                    host: String::new(),
                    path,
                    file_name,
                    extension,
                }
            }
        }
    }

    /// Host and path joined, for substring tables that span both.
    pub fn host_and_path(&self) -> String {
        format!("{}{}", self.host, self.path)
    }

    pub fn has_extension(&self, ext: &str) -> bool {
        self.extension.as_deref() == Some(ext)
    }
}

/// Removes the query string and fragment of a URL.
///
/// - `strip_query("https://a.com/v.mp4?t=1#x")` → `"https://a.com/v.mp4"`
pub fn strip_query(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end].to_string()
}

/// Host-suffix match on label boundaries (`"sub.ok.ru"` ends with `"ok.ru"`, `"book.ru"` does not).
pub fn host_matches_suffix(host: &str, suffix: &str) -> bool {
    host == suffix
        || host
            .strip_suffix(suffix)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
