//! Markdown rendering for pages.

use std::sync::{Arc, LazyLock};

use rayon::prelude::*;
use regex::Regex;

use crate::error::Result;
use crate::model::{Export, Page};
use crate::resolve::{LinkResolver, PassthroughResolver};

use super::header::render_header;
use super::inline::InlineConverter;
use super::tracker::{LineKind, LineTracker, RenderedLine};
use super::{ConversionStats, ConvertedExport, RenderOptions, RenderedPage, TitleLine};

/// Lines that already end a block in Markdown: list items and numbered items.
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *- |^ *[0-9]+\. ").unwrap());

/// Markdown hard line break.
const HARD_BREAK: &str = "  ";

/// Convert a single page to Markdown without resolving links.
pub fn to_markdown(page: &Page, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone(), Arc::new(PassthroughResolver));
    Ok(renderer.render_page(page)?.content)
}

/// Markdown renderer.
///
/// Holds no per-page state; each page gets its own [`LineTracker`], so one
/// renderer can serve pages on several threads at once.
pub struct MarkdownRenderer {
    options: RenderOptions,
    converter: InlineConverter,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions, resolver: Arc<dyn LinkResolver>) -> Self {
        Self {
            options,
            converter: InlineConverter::new(resolver),
        }
    }

    /// Render options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render every page of an export, keeping export order.
    pub fn render(&self, export: &Export) -> Result<ConvertedExport> {
        self.render_with_progress(export, |_| {})
    }

    /// Render every page, calling `on_page` as each one completes.
    ///
    /// In parallel mode `on_page` runs on worker threads in completion order.
    pub fn render_with_progress<F>(&self, export: &Export, on_page: F) -> Result<ConvertedExport>
    where
        F: Fn(&RenderedPage) + Sync,
    {
        let render_one = |page: &Page| -> Result<RenderedPage> {
            let rendered = self.render_page(page)?;
            on_page(&rendered);
            Ok(rendered)
        };

        let pages = if self.options.parallel {
            export
                .pages
                .par_iter()
                .map(render_one)
                .collect::<Result<Vec<_>>>()?
        } else {
            export
                .pages
                .iter()
                .map(render_one)
                .collect::<Result<Vec<_>>>()?
        };
        Ok(ConvertedExport::from_pages(pages))
    }

    /// Render one page.
    pub fn render_page(&self, page: &Page) -> Result<RenderedPage> {
        log::info!("processing: {}", page.title);

        let (lines, mut stats) = self.track(page);
        stats.page_count = 1;
        stats.line_count = page.lines.len() as u32;

        let mut content = render_header(page, &self.options)?;
        for line in &lines {
            count_line(&mut stats, line);
            content.push_str(&line.text);
            if self.options.hard_line_breaks && needs_hard_break(line) {
                content.push_str(HARD_BREAK);
            }
            content.push('\n');
        }

        Ok(RenderedPage {
            title: page.title.clone(),
            file_name: format!("{}.md", page.file_stem()),
            content,
            stats,
        })
    }

    /// Run the tracker over a page's lines, without header or line breaks.
    pub fn render_lines(&self, page: &Page) -> Vec<RenderedLine> {
        self.track(page).0
    }

    /// Tracked lines plus the block counts the tracker saw.
    fn track(&self, page: &Page) -> (Vec<RenderedLine>, ConversionStats) {
        let mut out = Vec::with_capacity(page.lines.len() + 2);
        let mut tracker = LineTracker::new(&self.converter);

        let mut texts = page.texts();
        if texts.next().is_some() {
            match self.options.title_line {
                TitleLine::Blank => out.push(RenderedLine::text("")),
                TitleLine::Heading => out.push(RenderedLine::text(format!("# {}", page.title))),
                TitleLine::Skip => {}
            }
        }

        for text in texts {
            tracker.feed(text, &mut out);
        }
        let stats = ConversionStats {
            code_block_count: tracker.code_block_count() as u32,
            table_count: tracker.table_count() as u32,
            ..Default::default()
        };
        tracker.finish(&mut out);
        (out, stats)
    }
}

/// Check if a rendered line gets a trailing hard break.
///
/// Only paragraph text does; code, fences, tables, headings, list items and
/// empty lines keep their block meaning without one.
pub fn needs_hard_break(line: &RenderedLine) -> bool {
    line.kind == LineKind::Text
        && !line.text.is_empty()
        && !line.text.starts_with('#')
        && !LIST_ITEM_RE.is_match(&line.text)
}

fn count_line(stats: &mut ConversionStats, line: &RenderedLine) {
    match line.kind {
        LineKind::Text if line.text.starts_with('#') => stats.heading_count += 1,
        LineKind::Text if LIST_ITEM_RE.is_match(&line.text) => stats.list_item_count += 1,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeaderStyle;

    fn options() -> RenderOptions {
        RenderOptions::new().with_header(HeaderStyle::None).sequential()
    }

    #[test]
    fn test_hard_break_rule() {
        assert!(needs_hard_break(&RenderedLine::text("para")));
        assert!(!needs_hard_break(&RenderedLine::text("")));
        assert!(!needs_hard_break(&RenderedLine::text("## head")));
        assert!(!needs_hard_break(&RenderedLine::text("- item")));
        assert!(!needs_hard_break(&RenderedLine::text("    - nested")));
        assert!(!needs_hard_break(&RenderedLine::text("12. numbered")));
        assert!(needs_hard_break(&RenderedLine::text("2024 was a year")));
        assert!(!needs_hard_break(&RenderedLine::new("x", LineKind::Code)));
        assert!(!needs_hard_break(&RenderedLine::new("|a|", LineKind::Table)));
        assert!(!needs_hard_break(&RenderedLine::new("```", LineKind::Fence)));
    }

    #[test]
    fn test_title_line_blank() {
        let page = Page::new("T", ["T", "body"]);
        let md = to_markdown(&page, &options()).unwrap();
        assert_eq!(md, "\nbody  \n");
    }

    #[test]
    fn test_title_line_heading_and_skip() {
        let page = Page::new("T", ["T", "body"]);

        let md = to_markdown(&page, &options().with_title_line(TitleLine::Heading)).unwrap();
        assert_eq!(md, "# T\nbody  \n");

        let md = to_markdown(&page, &options().with_title_line(TitleLine::Skip)).unwrap();
        assert_eq!(md, "body  \n");
    }

    #[test]
    fn test_hard_breaks_disabled() {
        let page = Page::new("T", ["T", "body"]);
        let md = to_markdown(&page, &options().with_hard_breaks(false)).unwrap();
        assert_eq!(md, "\nbody\n");
    }

    #[test]
    fn test_empty_page() {
        let page = Page::new("Empty", Vec::<String>::new());
        assert_eq!(to_markdown(&page, &options()).unwrap(), "");
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let renderer = MarkdownRenderer::new(options(), Arc::new(PassthroughResolver));
        let rendered = renderer.render_page(&Page::new("a/b", ["a/b"])).unwrap();
        assert_eq!(rendered.file_name, "a_b.md");
        assert_eq!(rendered.title, "a/b");
    }

    #[test]
    fn test_block_counts_come_from_tracker() {
        // Sentinel-looking text inside a code block is not a new block.
        let page = Page::new("S", ["S", "code:a.txt", " code:b.txt", " table:t", "x"]);
        let renderer = MarkdownRenderer::new(options(), Arc::new(PassthroughResolver));
        let stats = renderer.render_page(&page).unwrap().stats;
        assert_eq!(stats.code_block_count, 1);
        assert_eq!(stats.table_count, 0);
    }

    #[test]
    fn test_render_with_progress_reports_every_page() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut export = Export::new();
        for i in 0..8 {
            let title = format!("P{}", i);
            export.add_page(Page::new(title.clone(), [title]));
        }

        for parallel in [false, true] {
            let renderer = MarkdownRenderer::new(
                options().with_parallel(parallel),
                Arc::new(PassthroughResolver),
            );
            let seen = AtomicUsize::new(0);
            let converted = renderer
                .render_with_progress(&export, |_| {
                    seen.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
            assert_eq!(seen.load(Ordering::SeqCst), 8);
            assert_eq!(converted.pages[7].title, "P7");
        }
    }

    #[test]
    fn test_page_stats() {
        let page = Page::new(
            "S",
            ["S", "[** Head]", " item", "code:a.rs", " x", "table:t", " a\tb", "text"],
        );
        let renderer = MarkdownRenderer::new(options(), Arc::new(PassthroughResolver));
        let stats = renderer.render_page(&page).unwrap().stats;
        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.line_count, 8);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.list_item_count, 1);
        assert_eq!(stats.code_block_count, 1);
        assert_eq!(stats.table_count, 1);
    }
}
