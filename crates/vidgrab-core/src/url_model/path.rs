//! File name and extension extraction from URL paths.

/// Extracts the last path segment of a parsed URL.
///
/// Returns `None` if the path is empty/root or the segment is `.`/`..`.
pub fn file_name(url: &url::Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Lower-cased extension of the last path segment (`"MP4"` → `"mp4"`).
pub fn extension(url: &url::Url) -> Option<String> {
    let name = file_name(url)?;
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> url::Url {
        url::Url::parse(s).unwrap()
    }

    #[test]
    fn normal() {
        assert_eq!(
            file_name(&parse("https://example.com/a/b/clip.mp4")).as_deref(),
            Some("clip.mp4")
        );
        assert_eq!(
            extension(&parse("https://example.com/a/b/clip.MP4?x=1")).as_deref(),
            Some("mp4")
        );
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(file_name(&parse("https://example.com/")), None);
        assert_eq!(extension(&parse("https://example.com/noext")), None);
        assert_eq!(extension(&parse("https://example.com/.hidden")), None);
    }
}
