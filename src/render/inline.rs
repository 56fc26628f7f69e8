//! Inline markup conversion.
//!
//! A line of source markup is rewritten by an ordered chain of passes. Each
//! pass is total: input it does not match comes back unchanged. The order
//! encodes precedence between the overlapping bracket syntaxes (heading vs.
//! bold vs. decoration vs. link), so passes must not be reordered.
//!
//! Every pass except list conversion and heading detection works on the text
//! outside inline code spans (see [`mask`](super::mask)).

use regex::{Captures, Regex};
use std::sync::{Arc, LazyLock};

use super::mask::map_text;
use crate::resolve::{LinkResolver, PassthroughResolver};

static DECORATOR_ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\*+)\.+(\s.+?)\]").unwrap());

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(?:[^\x01-\x7E]|[\w.%&])+").unwrap());

static LEADING_INDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t\u{3000}]+").unwrap());

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[(.+?)\]\]").unwrap());

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\*\*\*?) ([^\]]+)\]$").unwrap());

static DECORATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([-*/]+) (.+?)\]").unwrap());

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\]").unwrap());

/// Converts one line of source markup to Markdown.
#[derive(Clone)]
pub struct InlineConverter {
    resolver: Arc<dyn LinkResolver>,
}

impl InlineConverter {
    /// Create a converter that resolves links with the given resolver.
    pub fn new(resolver: Arc<dyn LinkResolver>) -> Self {
        Self { resolver }
    }

    /// Create a converter that never touches the network.
    pub fn offline() -> Self {
        Self::new(Arc::new(PassthroughResolver))
    }

    /// The resolver used for link targets.
    pub fn resolver(&self) -> &Arc<dyn LinkResolver> {
        &self.resolver
    }

    /// Run every pass over the line, in order.
    pub fn convert(&self, line: &str) -> String {
        let line = escape_decorator(line);
        let line = escape_tags(&line);
        let line = convert_list(&line);
        let line = convert_bold(&line);
        let line = convert_decoration(&line);
        convert_links(&line, self.resolver.as_ref())
    }
}

impl Default for InlineConverter {
    fn default() -> Self {
        Self::offline()
    }
}

impl std::fmt::Debug for InlineConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineConverter").finish_non_exhaustive()
    }
}

/// Normalize `[*.. text]` into `[* text]` so decoration handles it.
pub fn escape_decorator(line: &str) -> String {
    map_text(line, |text| {
        DECORATOR_ESCAPE_RE
            .replace_all(text, "[${1}${2}]")
            .into_owned()
    })
}

/// Wrap hash tags in backticks so nothing downstream reads them as headings.
///
/// A line that still begins with `#` afterwards is wrapped as a whole.
pub fn escape_tags(line: &str) -> String {
    let line = map_text(line, |text| TAG_RE.replace_all(text, "`${0}`").into_owned());
    if line.starts_with('#') {
        format!("`{}`", line)
    } else {
        line
    }
}

/// Turn leading indentation into a nested list item.
///
/// N indentation characters become N-1 two-space indents and a `- ` marker.
pub fn convert_list(line: &str) -> String {
    match LEADING_INDENT_RE.find(line) {
        Some(m) => {
            let depth = m.as_str().chars().count();
            format!("{}- {}", "  ".repeat(depth - 1), &line[m.end()..])
        }
        None => line.to_string(),
    }
}

/// Convert `[[text]]` to bold, then a whole-line `[** text]` to a heading.
///
/// More asterisks mean a bigger heading: `**` is level 3, `***` level 2.
pub fn convert_bold(line: &str) -> String {
    let line = map_text(line, |text| BOLD_RE.replace_all(text, "**${1}**").into_owned());
    match HEADING_RE.captures(&line) {
        Some(caps) => {
            let level = 5 - caps[1].len();
            format!("{} {}", "#".repeat(level), &caps[2])
        }
        None => line,
    }
}

/// Convert `[-*/ text]` decorations.
///
/// `/` adds italics, `-` strikethrough, `*` bold; markers nest in that order.
pub fn convert_decoration(line: &str) -> String {
    map_text(line, |text| {
        DECORATION_RE
            .replace_all(text, |caps: &Captures| {
                let symbols = &caps[1];
                let mut open = String::from(" ");
                let mut close = String::from(" ");
                for (symbol, marker) in [('/', "_"), ('-', "~~"), ('*', "**")] {
                    if symbols.contains(symbol) {
                        open.push_str(marker);
                        close.insert_str(0, marker);
                    }
                }
                format!("{}{}{}", open, &caps[2], close)
            })
            .into_owned()
    })
}

/// Convert bracket tokens to links, images or plain text.
pub fn convert_links(line: &str, resolver: &dyn LinkResolver) -> String {
    map_text(line, |text| {
        LINK_RE
            .replace_all(text, |caps: &Captures| link_token(&caps[1], resolver))
            .into_owned()
    })
}

fn link_token(inner: &str, resolver: &dyn LinkResolver) -> String {
    let mut words: Vec<&str> = inner.split(' ').collect();

    if words.len() == 1 {
        if resolver.is_short_link(inner) {
            let target = resolver.resolve(inner);
            return format!("![{}]({})", target, target);
        }
        return inner.to_string();
    }

    let url = if looks_like_url(words[0]) {
        Some(words.remove(0))
    } else if words.last().is_some_and(|w| looks_like_url(w)) {
        words.pop()
    } else {
        None
    };

    let title = words.join(" ");
    match url {
        Some(url) => format!("[{}]({})", title, resolver.resolve(url)),
        None => title,
    }
}

fn looks_like_url(word: &str) -> bool {
    word.starts_with("http://") || word.starts_with("https://")
}
