//! Export-level types.

use super::Page;
use serde::{Deserialize, Serialize};

/// A project export: an ordered set of pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    /// Project name (URL slug)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human-readable project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Export instant in Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported: Option<i64>,

    /// Pages in export order
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Export {
    /// Create a new empty export.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the export.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the export has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Find a page by exact title.
    pub fn get_page(&self, title: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.title == title)
    }

    /// Total number of lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}
