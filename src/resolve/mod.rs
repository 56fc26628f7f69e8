//! External link resolution.
//!
//! Image-hosting short links point at a viewer page, not at the image
//! itself. A [`LinkResolver`] turns such a link into a direct image URL
//! when it can, and hands back the original URL when it cannot. Resolution
//! never fails the conversion.

mod cache;
mod gyazo;
mod probe;

pub use cache::CachingResolver;
pub use gyazo::{short_link_candidates, short_link_id, GyazoResolver, DEFAULT_EXTENSIONS};
#[cfg(feature = "http")]
pub use probe::HttpProbe;
pub use probe::{ExistenceProbe, NeverExists};

use std::sync::Arc;
use std::time::Duration;

/// Turns a link into its final target.
pub trait LinkResolver: Send + Sync {
    /// Check if the URL is an image-hosting short link.
    fn is_short_link(&self, url: &str) -> bool {
        short_link_id(url).is_some()
    }

    /// Resolve the URL, returning it unchanged when no better target exists.
    fn resolve(&self, url: &str) -> String;
}

impl<R: LinkResolver + ?Sized> LinkResolver for Arc<R> {
    fn is_short_link(&self, url: &str) -> bool {
        (**self).is_short_link(url)
    }

    fn resolve(&self, url: &str) -> String {
        (**self).resolve(url)
    }
}

impl<R: LinkResolver + ?Sized> LinkResolver for Box<R> {
    fn is_short_link(&self, url: &str) -> bool {
        (**self).is_short_link(url)
    }

    fn resolve(&self, url: &str) -> String {
        (**self).resolve(url)
    }
}

/// Resolver that never rewrites a URL.
///
/// Short links are still recognized, so they render as image references
/// pointing at the unresolved URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

impl LinkResolver for PassthroughResolver {
    fn resolve(&self, url: &str) -> String {
        url.to_string()
    }
}

/// Options for network-backed resolution.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Per-request timeout (None = wait indefinitely)
    pub timeout: Option<Duration>,

    /// User-Agent header sent with probes
    pub user_agent: String,

    /// Memoize resolved URLs for the lifetime of the resolver
    pub cache: bool,
}

impl ResolverOptions {
    /// Create new resolver options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable memoization.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(10)),
            user_agent: concat!("sb2md/", env!("CARGO_PKG_VERSION")).to_string(),
            cache: true,
        }
    }
}

/// Build the default network resolver: HTTP probes, optionally cached.
#[cfg(feature = "http")]
pub fn http_resolver(options: &ResolverOptions) -> crate::Result<Arc<dyn LinkResolver>> {
    let resolver = GyazoResolver::new(HttpProbe::with_options(options)?);
    if options.cache {
        Ok(Arc::new(CachingResolver::new(resolver)))
    } else {
        Ok(Arc::new(resolver))
    }
}
