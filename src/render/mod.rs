//! Rendering module for converting pages to Markdown.
//!
//! Per page, a [`LineTracker`] decides block structure (code blocks,
//! tables) line by line and hands everything outside code blocks to the
//! [`InlineConverter`]; [`MarkdownRenderer`] adds the metadata header and
//! the hard line break rule.

mod header;
pub mod inline;
mod markdown;
pub mod mask;
mod options;
mod result;
pub mod tracker;

pub use header::{format_timestamp, render_header};
pub use inline::InlineConverter;
pub use markdown::{needs_hard_break, to_markdown, MarkdownRenderer};
pub use options::{
    HeaderStyle, RenderOptions, TitleLine, DEFAULT_TIME_FORMAT, DEFAULT_UTC_OFFSET_SECS,
};
pub use result::{ConversionStats, ConvertedExport, RenderedPage};
pub use tracker::{LineKind, LineState, LineTracker, RenderedLine};
