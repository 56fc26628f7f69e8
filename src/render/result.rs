//! Rendering results and conversion statistics.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One page rendered to Markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedPage {
    /// Original page title
    pub title: String,

    /// Output file name (sanitized title plus `.md`)
    pub file_name: String,

    /// Markdown document, every line newline-terminated
    pub content: String,

    /// Statistics for this page
    pub stats: ConversionStats,
}

impl RenderedPage {
    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// All pages of an export rendered to Markdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertedExport {
    /// Rendered pages in export order
    pub pages: Vec<RenderedPage>,

    /// Statistics summed over all pages
    pub stats: ConversionStats,
}

impl ConvertedExport {
    /// Collect rendered pages, summing their statistics.
    pub fn from_pages(pages: Vec<RenderedPage>) -> Self {
        let mut stats = ConversionStats::new();
        for page in &pages {
            stats.merge(&page.stats);
        }
        Self { pages, stats }
    }

    /// Write every page to `dir`, creating it if needed.
    ///
    /// Returns the written paths in page order. Pages whose titles sanitize
    /// to the same file name overwrite each other, last one wins.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let path = dir.join(&page.file_name);
            fs::write(&path, &page.content)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Find a rendered page by its original title.
    pub fn get_page(&self, title: &str) -> Option<&RenderedPage> {
        self.pages.iter().find(|p| p.title == title)
    }
}

/// Statistics collected during conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of pages rendered
    pub page_count: u32,

    /// Number of source lines processed
    pub line_count: u32,

    /// Number of fenced code blocks
    pub code_block_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of headings emitted
    pub heading_count: u32,

    /// Number of list items emitted
    pub list_item_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another set of statistics into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.page_count += other.page_count;
        self.line_count += other.line_count;
        self.code_block_count += other.code_block_count;
        self.table_count += other.table_count;
        self.heading_count += other.heading_count;
        self.list_item_count += other.list_item_count;
    }
}
