//! # sb2md
//!
//! Convert Scrapbox project exports to Markdown, one document per page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sb2md::{parse_file, render};
//!
//! fn main() -> sb2md::Result<()> {
//!     let export = parse_file("project.json")?;
//!
//!     let options = render::RenderOptions::default();
//!     for page in &export.pages {
//!         println!("{}", render::to_markdown(page, &options)?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block structure**: code blocks with language fences, tables with header divider
//! - **Inline markup**: lists, headings, bold, italics, strikethrough, tags, links
//! - **Image short links**: Gyazo page links resolved to direct images over HTTP
//! - **Parallel processing**: Uses Rayon for multi-page exports

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod resolve;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Export, Line, Page};
pub use parser::{ErrorMode, ExportParser, PageSelection, ParseOptions};
pub use render::{
    ConversionStats, ConvertedExport, HeaderStyle, InlineConverter, MarkdownRenderer,
    RenderOptions, RenderedPage, TitleLine,
};
pub use resolve::{LinkResolver, PassthroughResolver, ResolverOptions};

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Parse an export file.
///
/// # Example
///
/// ```no_run
/// use sb2md::parse_file;
///
/// let export = parse_file("project.json").unwrap();
/// println!("Pages: {}", export.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Export> {
    ExportParser::open(path)?.parse()
}

/// Parse an export file with custom options.
///
/// # Example
///
/// ```no_run
/// use sb2md::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient();
/// let export = parse_file_with_options("project.json", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Export> {
    ExportParser::open_with_options(path, options)?.parse()
}

/// Parse an export from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Export> {
    ExportParser::from_bytes(data)?.parse()
}

/// Parse an export from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Export> {
    ExportParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse an export from a string.
pub fn parse_str(data: &str) -> Result<Export> {
    parse_bytes(data.as_bytes())
}

/// Parse an export from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Export> {
    ExportParser::from_reader(reader)?.parse()
}

/// Convert an export file to Markdown without touching the network.
///
/// # Example
///
/// ```no_run
/// use sb2md::convert_file;
///
/// let converted = convert_file("project.json").unwrap();
/// converted.write_to_dir("markdown").unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConvertedExport> {
    Sb2md::new().offline().convert_file(path)
}

/// Builder for parsing and converting exports.
///
/// # Example
///
/// ```no_run
/// use sb2md::{HeaderStyle, Sb2md};
///
/// let converted = Sb2md::new()
///     .lenient()
///     .with_header(HeaderStyle::Frontmatter)
///     .with_utc_offset_hours(0)
///     .convert_file("project.json")?;
/// converted.write_to_dir("markdown")?;
/// # Ok::<(), sb2md::Error>(())
/// ```
pub struct Sb2md {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    resolver_options: ResolverOptions,
    resolver: Option<Arc<dyn LinkResolver>>,
    offline: bool,
}

impl Sb2md {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            resolver_options: ResolverOptions::default(),
            resolver: None,
            offline: false,
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel rendering.
    pub fn sequential(mut self) -> Self {
        self.render_options = self.render_options.sequential();
        self
    }

    /// Never probe the network; short links stay unresolved.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Use a custom link resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn LinkResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set options for the default network resolver.
    pub fn with_resolver_options(mut self, options: ResolverOptions) -> Self {
        self.resolver_options = options;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Set the metadata header style.
    pub fn with_header(mut self, header: HeaderStyle) -> Self {
        self.render_options = self.render_options.with_header(header);
        self
    }

    /// Set title line handling.
    pub fn with_title_line(mut self, title_line: TitleLine) -> Self {
        self.render_options = self.render_options.with_title_line(title_line);
        self
    }

    /// Set the timestamp UTC offset in whole hours.
    pub fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.render_options = self.render_options.with_utc_offset_hours(hours);
        self
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Parse an export file.
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<Export> {
        parse_file_with_options(path, self.parse_options.clone())
    }

    /// Parse and convert an export file.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ConvertedExport> {
        let export = self.parse(path)?;
        self.convert(&export)
    }

    /// Parse and convert an export held in memory.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<ConvertedExport> {
        let export = parse_bytes_with_options(data, self.parse_options.clone())?;
        self.convert(&export)
    }

    /// Convert an already-parsed export.
    pub fn convert(&self, export: &Export) -> Result<ConvertedExport> {
        let renderer = MarkdownRenderer::new(self.render_options.clone(), self.build_resolver()?);
        renderer.render(export)
    }

    fn build_resolver(&self) -> Result<Arc<dyn LinkResolver>> {
        if let Some(ref resolver) = self.resolver {
            return Ok(Arc::clone(resolver));
        }
        if self.offline {
            return Ok(Arc::new(PassthroughResolver));
        }
        default_resolver(&self.resolver_options)
    }
}

impl Default for Sb2md {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
fn default_resolver(options: &ResolverOptions) -> Result<Arc<dyn LinkResolver>> {
    resolve::http_resolver(options)
}

#[cfg(not(feature = "http"))]
fn default_resolver(_options: &ResolverOptions) -> Result<Arc<dyn LinkResolver>> {
    log::debug!("Built without the http feature; links are not resolved");
    Ok(Arc::new(PassthroughResolver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::GyazoResolver;

    const SAMPLE: &str = r#"{"pages": [
        {"title": "A/B", "created": 0, "updated": 0,
         "lines": ["A/B", "[https://gyazo.com/xyz]"]}
    ]}"#;

    #[test]
    fn test_builder_defaults() {
        let builder = Sb2md::default();
        assert!(!builder.offline);
        assert!(builder.resolver.is_none());
        assert_eq!(builder.parse_options.error_mode, ErrorMode::Strict);
        assert!(builder.render_options.parallel);
    }

    #[test]
    fn test_builder_chained() {
        let builder = Sb2md::new()
            .lenient()
            .sequential()
            .offline()
            .with_header(HeaderStyle::None)
            .with_title_line(TitleLine::Skip)
            .with_utc_offset_hours(1);

        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert!(!builder.render_options.parallel);
        assert!(builder.offline);
        assert_eq!(builder.render_options.header, HeaderStyle::None);
        assert_eq!(builder.render_options.title_line, TitleLine::Skip);
        assert_eq!(builder.render_options.utc_offset_secs, 3600);
    }

    #[test]
    fn test_convert_bytes_with_custom_resolver() {
        let resolver = GyazoResolver::new(|url: &str| url.ends_with(".png"));
        let converted = Sb2md::new()
            .with_header(HeaderStyle::None)
            .with_resolver(Arc::new(resolver))
            .convert_bytes(SAMPLE.as_bytes())
            .unwrap();

        let page = &converted.pages[0];
        assert_eq!(page.file_name, "A_B.md");
        assert_eq!(
            page.content,
            "\n![https://i.gyazo.com/xyz.png](https://i.gyazo.com/xyz.png)  \n"
        );
    }

    #[test]
    fn test_convert_bytes_offline() {
        let converted = Sb2md::new()
            .offline()
            .with_header(HeaderStyle::None)
            .convert_bytes(SAMPLE.as_bytes())
            .unwrap();
        assert!(converted.pages[0]
            .content
            .contains("![https://gyazo.com/xyz](https://gyazo.com/xyz)"));
    }

    #[test]
    fn test_parse_str_invalid() {
        assert!(parse_str("[]").is_err());
        assert!(parse_str("").is_err());
    }
}
