//! Response header map with the accessors the classifier needs.

/// Case-insensitive response headers of one observed exchange.
///
/// Keeps every `(name, value)` pair in arrival order; lookups return the
/// first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds headers from `(name, value)` pairs.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut headers = Self::new();
        for (name, value) in pairs {
            headers.insert(name, value);
        }
        headers
    }

    /// Parses raw `Name: value` lines, skipping status lines and blanks.
    pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut headers = Self::new();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with("HTTP/") {
                continue;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name, value);
            }
        }
        headers
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return;
        }
        self.entries.push((name, value.into().trim().to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lower-cased media type essence (`"video/mp4; codecs=..."` → `"video/mp4"`).
    pub fn content_type(&self) -> Option<String> {
        let value = self.get("content-type")?;
        let essence = value.split(';').next().unwrap_or("").trim();
        if essence.is_empty() {
            return None;
        }
        Some(essence.to_ascii_lowercase())
    }

    /// Parsed `Content-Length`; unparsable values count as absent.
    pub fn content_length(&self) -> Option<u64> {
        self.get("content-length")?.parse::<u64>().ok()
    }
}
