//! Page-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single page: a title plus an ordered sequence of raw text lines.
///
/// Line 0 conventionally repeats the title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Page title
    pub title: String,

    /// Raw lines in page order
    #[serde(default)]
    pub lines: Vec<Line>,

    /// Creation instant in Unix seconds
    #[serde(default)]
    pub created: i64,

    /// Last update instant in Unix seconds
    #[serde(default)]
    pub updated: i64,

    /// Page identifier, present in exports with metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Page {
    /// Create a page from a title and plain text lines.
    pub fn new<I, S>(title: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            lines: lines.into_iter().map(|l| Line::Plain(l.into())).collect(),
            ..Default::default()
        }
    }

    /// Set creation and update instants (Unix seconds).
    pub fn with_timestamps(mut self, created: i64, updated: i64) -> Self {
        self.created = created;
        self.updated = updated;
        self
    }

    /// Creation instant. Out-of-range values fall back to the Unix epoch.
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.created, 0).unwrap_or_default()
    }

    /// Update instant. Out-of-range values fall back to the Unix epoch.
    pub fn updated_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.updated, 0).unwrap_or_default()
    }

    /// Iterate over the raw text of each line.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(Line::text)
    }

    /// Title with path separators replaced, usable as a file stem.
    pub fn file_stem(&self) -> String {
        self.title.replace(['/', '\\'], "_")
    }

    /// Check if the page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A raw line of a page.
///
/// Plain exports store each line as a string; exports with metadata store
/// an object carrying the text and its own timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Line {
    /// Bare text line
    Plain(String),

    /// Line with per-line metadata
    Detailed {
        /// Raw text
        text: String,
        /// Creation instant in Unix seconds
        #[serde(default, skip_serializing_if = "Option::is_none")]
        created: Option<i64>,
        /// Update instant in Unix seconds
        #[serde(default, skip_serializing_if = "Option::is_none")]
        updated: Option<i64>,
        /// Author of the last edit
        #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
}

impl Line {
    /// Raw text of the line.
    pub fn text(&self) -> &str {
        match self {
            Line::Plain(text) => text,
            Line::Detailed { text, .. } => text,
        }
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::Plain(text.to_string())
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Line::Plain(text)
    }
}
