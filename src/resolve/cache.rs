//! Memoizing resolver wrapper.

use std::collections::HashMap;
use std::sync::Mutex;

use super::LinkResolver;

/// Caches the results of an inner resolver per URL.
///
/// The same short link tends to appear on many pages of one export; each
/// distinct URL is resolved once.
pub struct CachingResolver<R> {
    inner: R,
    cache: Mutex<HashMap<String, String>>,
}

impl<R: LinkResolver> CachingResolver<R> {
    /// Wrap a resolver.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Check if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: LinkResolver> LinkResolver for CachingResolver<R> {
    fn is_short_link(&self, url: &str) -> bool {
        self.inner.is_short_link(url)
    }

    fn resolve(&self, url: &str) -> String {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
        {
            return hit.clone();
        }

        // Resolve without holding the lock; probes may be slow.
        let resolved = self.inner.resolve(url);
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.to_string(), resolved.clone());
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::GyazoResolver;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_resolves_each_url_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let resolver = CachingResolver::new(GyazoResolver::new(move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        }));

        assert!(resolver.is_empty());
        let first = resolver.resolve("https://gyazo.com/abc");
        let second = resolver.resolve("https://gyazo.com/abc");

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.len(), 1);
    }
}
