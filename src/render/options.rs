//! Rendering options and configuration.

/// Default offset of rendered timestamps: UTC+09:00.
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 9 * 3600;

/// Default timestamp format (chrono strftime syntax).
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Options for rendering pages to Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// What to emit for line 0, which repeats the page title
    pub title_line: TitleLine,

    /// Metadata header style
    pub header: HeaderStyle,

    /// Label of the creation timestamp in a plain header
    pub created_label: String,

    /// Label of the update timestamp in a plain header
    pub updated_label: String,

    /// Offset from UTC applied to timestamps, in seconds
    pub utc_offset_secs: i32,

    /// strftime-style timestamp format
    pub time_format: String,

    /// Append two spaces to paragraph lines to force line breaks
    pub hard_line_breaks: bool,

    /// Render pages in parallel
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title line handling.
    pub fn with_title_line(mut self, title_line: TitleLine) -> Self {
        self.title_line = title_line;
        self
    }

    /// Set the metadata header style.
    pub fn with_header(mut self, header: HeaderStyle) -> Self {
        self.header = header;
        self
    }

    /// Set the labels of a plain header.
    pub fn with_labels(mut self, created: impl Into<String>, updated: impl Into<String>) -> Self {
        self.created_label = created.into();
        self.updated_label = updated.into();
        self
    }

    /// Set the UTC offset in whole hours.
    pub fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_secs = hours.saturating_mul(3600);
        self
    }

    /// Set the UTC offset in seconds.
    pub fn with_utc_offset_secs(mut self, secs: i32) -> Self {
        self.utc_offset_secs = secs;
        self
    }

    /// Set the timestamp format.
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Enable or disable hard line breaks.
    pub fn with_hard_breaks(mut self, enabled: bool) -> Self {
        self.hard_line_breaks = enabled;
        self
    }

    /// Enable or disable parallel rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel rendering.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title_line: TitleLine::Blank,
            header: HeaderStyle::Plain,
            created_label: "作成日時".to_string(),
            updated_label: "更新日時".to_string(),
            utc_offset_secs: DEFAULT_UTC_OFFSET_SECS,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            hard_line_breaks: true,
            parallel: true,
        }
    }
}

/// Handling of a page's first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleLine {
    /// Replace it with an empty line
    #[default]
    Blank,
    /// Emit the title as a level 1 heading
    Heading,
    /// Drop it
    Skip,
}

/// Metadata header placed before the page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// `label: timestamp` lines
    #[default]
    Plain,
    /// YAML frontmatter block
    Frontmatter,
    /// No header
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_title_line(TitleLine::Heading)
            .with_header(HeaderStyle::Frontmatter)
            .with_utc_offset_hours(-5)
            .with_hard_breaks(false)
            .sequential();

        assert_eq!(options.title_line, TitleLine::Heading);
        assert_eq!(options.header, HeaderStyle::Frontmatter);
        assert_eq!(options.utc_offset_secs, -18_000);
        assert!(!options.hard_line_breaks);
        assert!(!options.parallel);
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.title_line, TitleLine::Blank);
        assert_eq!(options.header, HeaderStyle::Plain);
        assert_eq!(options.utc_offset_secs, DEFAULT_UTC_OFFSET_SECS);
        assert_eq!(options.time_format, DEFAULT_TIME_FORMAT);
        assert!(options.hard_line_breaks);
        assert!(options.parallel);
    }

    #[test]
    fn test_labels() {
        let options = RenderOptions::new().with_labels("Created", "Updated");
        assert_eq!(options.created_label, "Created");
        assert_eq!(options.updated_label, "Updated");
    }
}
