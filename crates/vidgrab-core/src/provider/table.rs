//! Ordered provider registry.

use crate::url_model::{host_matches_suffix, UrlParts};

pub const SIBNET: &str = "Sibnet";
pub const MAILRU: &str = "Mail.ru";
pub const OKRU: &str = "Ok.ru";
pub const VIDMOLY: &str = "Vidmoly";
pub const DOODSTREAM: &str = "Doodstream";
pub const UQLOAD: &str = "Uqload";
pub const STREAMTAPE: &str = "StreamTape";
pub const VOE: &str = "Voe";
pub const HDVID: &str = "HDVid";
pub const FILEMOON: &str = "FileMoon";
pub const GOOGLE_DRIVE: &str = "Google Drive";
pub const SISTENN: &str = "Sistenn";
pub const VIMEO: &str = "Vimeo";
pub const AKAMAI: &str = "Akamai";
pub const CLOUDFRONT: &str = "CloudFront";

pub(crate) struct ProviderEntry {
    pub name: &'static str,
    /// Registrable domains; matched on label boundaries.
    pub host_suffixes: &'static [&'static str],
    /// Substrings of the host (mirror domains rotate, the brand token stays).
    pub host_tokens: &'static [&'static str],
    /// Substrings of `host + path`.
    pub path_tokens: &'static [&'static str],
}

impl ProviderEntry {
    pub fn matches(&self, parts: &UrlParts) -> bool {
        if self
            .host_suffixes
            .iter()
            .any(|s| host_matches_suffix(&parts.host, s))
        {
            return true;
        }
        if self.host_tokens.iter().any(|t| parts.host.contains(t)) {
            return true;
        }
        if self.path_tokens.is_empty() {
            return false;
        }
        let joined = parts.host_and_path();
        self.path_tokens.iter().any(|t| joined.contains(t))
    }
}

// Specific providers come before the generic CDNs whose tokens can appear
// nested inside their hostnames (Vimeo serves from akamaized.net hosts).
pub(crate) static PROVIDERS: &[ProviderEntry] = &[
    ProviderEntry {
        name: SIBNET,
        host_suffixes: &["sibnet.ru"],
        host_tokens: &[],
        path_tokens: &[],
    },
    ProviderEntry {
        name: MAILRU,
        host_suffixes: &["mail.ru", "imgsmail.ru"],
        host_tokens: &[],
        path_tokens: &[],
    },
    ProviderEntry {
        name: OKRU,
        host_suffixes: &["ok.ru", "mycdn.me", "okcdn.ru"],
        host_tokens: &["odnoklassniki"],
        path_tokens: &[],
    },
    ProviderEntry {
        name: VIDMOLY,
        host_suffixes: &[],
        host_tokens: &["vidmoly"],
        path_tokens: &[],
    },
    ProviderEntry {
        name: DOODSTREAM,
        host_suffixes: &["cloudatacdn.com", "d0000d.com", "d000d.com"],
        host_tokens: &["dood"],
        path_tokens: &[],
    },
    ProviderEntry {
        name: UQLOAD,
        host_suffixes: &[],
        host_tokens: &["uqload"],
        path_tokens: &[],
    },
    ProviderEntry {
        name: STREAMTAPE,
        host_suffixes: &["tapecontent.net"],
        host_tokens: &["streamtape"],
        path_tokens: &[],
    },
    ProviderEntry {
        name: VOE,
        host_suffixes: &["voe.sx"],
        host_tokens: &[],
        path_tokens: &[],
    },
    ProviderEntry {
        name: HDVID,
        host_suffixes: &[],
        host_tokens: &["hdvid"],
        path_tokens: &[],
    },
    ProviderEntry {
        name: FILEMOON,
        host_suffixes: &[],
        host_tokens: &["filemoon"],
        path_tokens: &[],
    },
    ProviderEntry {
        name: GOOGLE_DRIVE,
        host_suffixes: &["drive.google.com", "drive.usercontent.google.com"],
        host_tokens: &[],
        path_tokens: &[],
    },
    ProviderEntry {
        name: SISTENN,
        host_suffixes: &[],
        host_tokens: &["sistenn", "seicode"],
        path_tokens: &[],
    },
    ProviderEntry {
        name: VIMEO,
        host_suffixes: &["vimeo.com", "vimeocdn.com"],
        host_tokens: &[],
        path_tokens: &["vod-adaptive", "/vimeo-prod-"],
    },
    ProviderEntry {
        name: AKAMAI,
        host_suffixes: &["akamaized.net", "akamaihd.net"],
        host_tokens: &[],
        path_tokens: &[],
    },
    ProviderEntry {
        name: CLOUDFRONT,
        host_suffixes: &["cloudfront.net"],
        host_tokens: &[],
        path_tokens: &[],
    },
];
