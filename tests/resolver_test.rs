//! Integration tests for link resolution.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sb2md::render::InlineConverter;
use sb2md::resolve::{CachingResolver, GyazoResolver, LinkResolver, NeverExists};
use sb2md::PassthroughResolver;

#[test]
fn test_non_short_links_are_identity() {
    let resolvers: Vec<Box<dyn LinkResolver>> = vec![
        Box::new(PassthroughResolver),
        Box::new(GyazoResolver::new(NeverExists)),
        Box::new(GyazoResolver::new(|_: &str| true)),
    ];
    for resolver in &resolvers {
        for url in ["https://example.com", "http://gyazo.com/abc", "not a url", ""] {
            assert_eq!(resolver.resolve(url), url);
        }
    }
}

#[test]
fn test_probe_order_png_then_jpg() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let resolver = GyazoResolver::new(move |url: &str| {
        log.lock().unwrap().push(url.to_string());
        false
    });

    assert_eq!(resolver.resolve("https://gyazo.com/id"), "https://gyazo.com/id");
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["https://i.gyazo.com/id.png", "https://i.gyazo.com/id.jpg"]
    );
}

#[test]
fn test_cached_resolver_in_converter() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let resolver = CachingResolver::new(GyazoResolver::new(move |_: &str| {
        counter.fetch_add(1, Ordering::SeqCst);
        true
    }));
    let converter = InlineConverter::new(Arc::new(resolver));

    let line = "[https://gyazo.com/a] [https://gyazo.com/a]";
    let out = converter.convert(line);
    assert_eq!(
        out,
        "![https://i.gyazo.com/a.png](https://i.gyazo.com/a.png) ![https://i.gyazo.com/a.png](https://i.gyazo.com/a.png)"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_titled_link_target_is_resolved() {
    let converter = InlineConverter::new(Arc::new(GyazoResolver::new(|url: &str| {
        url.ends_with(".jpg")
    })));
    assert_eq!(
        converter.convert("[screenshot https://gyazo.com/z]"),
        "[screenshot](https://i.gyazo.com/z.jpg)"
    );
}
