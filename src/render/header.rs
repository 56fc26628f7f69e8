//! Page metadata header.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::{Error, Result};
use crate::model::Page;

use super::{HeaderStyle, RenderOptions};

/// Render the metadata header for a page, including its trailing newline.
pub fn render_header(page: &Page, options: &RenderOptions) -> Result<String> {
    if options.header == HeaderStyle::None {
        return Ok(String::new());
    }

    let offset = FixedOffset::east_opt(options.utc_offset_secs)
        .ok_or(Error::InvalidOffset(options.utc_offset_secs))?;
    let created = format_timestamp(page.created_at(), offset, &options.time_format)?;
    let updated = format_timestamp(page.updated_at(), offset, &options.time_format)?;

    let header = match options.header {
        HeaderStyle::Plain => format!(
            "{}: {}\n{}: {}\n",
            options.created_label, created, options.updated_label, updated
        ),
        HeaderStyle::Frontmatter => format!(
            "---\ntitle: \"{}\"\ncreated: \"{}\"\nupdated: \"{}\"\n---\n",
            escape_yaml(&page.title),
            created,
            updated
        ),
        HeaderStyle::None => String::new(),
    };
    Ok(header)
}

/// Format an instant in the given offset.
pub fn format_timestamp(
    instant: DateTime<Utc>,
    offset: FixedOffset,
    format: &str,
) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", instant.with_timezone(&offset).format(format))
        .map_err(|_| Error::Render(format!("invalid time format: {}", format)))?;
    Ok(out)
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        // 2024-01-01 00:00:00 UTC
        Page::new("a \"quoted\" title", ["x"]).with_timestamps(1_704_067_200, 1_704_070_800)
    }

    #[test]
    fn test_plain_header() {
        let header = render_header(&page(), &RenderOptions::default()).unwrap();
        assert_eq!(
            header,
            "作成日時: 2024-01-01 09:00:00\n更新日時: 2024-01-01 10:00:00\n"
        );
    }

    #[test]
    fn test_header_in_utc() {
        let options = RenderOptions::new()
            .with_utc_offset_hours(0)
            .with_labels("Created", "Updated");
        let header = render_header(&page(), &options).unwrap();
        assert_eq!(
            header,
            "Created: 2024-01-01 00:00:00\nUpdated: 2024-01-01 01:00:00\n"
        );
    }

    #[test]
    fn test_frontmatter_header() {
        let options = RenderOptions::new().with_header(HeaderStyle::Frontmatter);
        let header = render_header(&page(), &options).unwrap();
        assert!(header.starts_with("---\n"));
        assert!(header.contains("title: \"a \\\"quoted\\\" title\""));
        assert!(header.contains("created: \"2024-01-01 09:00:00\""));
        assert!(header.ends_with("---\n"));
    }

    #[test]
    fn test_no_header() {
        let options = RenderOptions::new().with_header(HeaderStyle::None);
        assert_eq!(render_header(&page(), &options).unwrap(), "");
    }

    #[test]
    fn test_invalid_offset() {
        let options = RenderOptions::new().with_utc_offset_hours(30);
        let result = render_header(&page(), &options);
        assert!(matches!(result, Err(Error::InvalidOffset(108_000))));
    }
}
