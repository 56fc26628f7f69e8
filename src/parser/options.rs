//! Parsing options and configuration.

/// Options for parsing project exports.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Page selection (which pages to keep)
    pub pages: PageSelection,

    /// Drop pages that have no lines at all
    pub skip_empty_pages: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip malformed pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable skipping of empty pages.
    pub fn with_skip_empty(mut self, skip: bool) -> Self {
        self.skip_empty_pages = skip;
        self
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any malformed page
    #[default]
    Strict,
    /// Skip malformed pages and continue
    Lenient,
}

/// Page selection for parsing.
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// Keep all pages
    #[default]
    All,
    /// Keep pages whose title is in the list
    Titles(Vec<String>),
}

impl PageSelection {
    /// Check if a page title should be included.
    pub fn includes(&self, title: &str) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Titles(titles) => titles.iter().any(|t| t == title),
        }
    }

    /// Build a selection from a list of titles; an empty list selects all pages.
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        if titles.is_empty() {
            PageSelection::All
        } else {
            PageSelection::Titles(titles)
        }
    }
}
