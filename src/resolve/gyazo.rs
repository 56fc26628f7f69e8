//! Gyazo short link resolution.

use regex::Regex;
use std::sync::LazyLock;

use super::{ExistenceProbe, LinkResolver};

/// `https://gyazo.com/<id>` viewer page links.
static SHORT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://gyazo\.com/(.+)$").unwrap());

/// Host serving the raw image files.
const DIRECT_HOST: &str = "https://i.gyazo.com";

/// Candidate extensions, probed in order.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg"];

/// Extract the opaque image identifier from a short link.
pub fn short_link_id(url: &str) -> Option<&str> {
    SHORT_LINK_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Direct image URLs a short link may resolve to, in probe order.
///
/// Returns an empty list for anything that is not a short link.
pub fn short_link_candidates(url: &str, extensions: &[&str]) -> Vec<String> {
    match short_link_id(url) {
        Some(id) => extensions
            .iter()
            .map(|ext| format!("{}/{}.{}", DIRECT_HOST, id, ext))
            .collect(),
        None => Vec::new(),
    }
}

/// Resolves Gyazo short links by probing direct image candidates.
pub struct GyazoResolver<P> {
    probe: P,
    extensions: Vec<&'static str>,
}

impl<P: ExistenceProbe> GyazoResolver<P> {
    /// Create a resolver using the given probe.
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            extensions: DEFAULT_EXTENSIONS.to_vec(),
        }
    }

    /// Override the candidate extensions.
    pub fn with_extensions(mut self, extensions: &[&'static str]) -> Self {
        self.extensions = extensions.to_vec();
        self
    }
}

impl<P: ExistenceProbe> LinkResolver for GyazoResolver<P> {
    fn resolve(&self, url: &str) -> String {
        let candidates = short_link_candidates(url, &self.extensions);
        if candidates.is_empty() {
            return url.to_string();
        }
        for candidate in candidates {
            if self.probe.exists(&candidate) {
                log::debug!("Resolved {} -> {}", url, candidate);
                return candidate;
            }
        }
        log::debug!("No direct image for {}, keeping original link", url);
        url.to_string()
    }
}
