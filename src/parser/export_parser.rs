//! Project export parser using serde_json.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Export, Page};

use super::options::{ErrorMode, ParseOptions};

/// Project export parser.
///
/// The container is decoded into a JSON value up front; pages are
/// deserialized individually so lenient mode can skip the broken ones.
pub struct ExportParser {
    value: Value,
    options: ParseOptions,
}

impl ExportParser {
    /// Open an export file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an export file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse an export from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse an export from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let value: Value = serde_json::from_slice(data)?;
        Self::from_value_with_options(value, options)
    }

    /// Parse an export from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse an export from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Wrap an already-decoded JSON value.
    pub fn from_value_with_options(value: Value, options: ParseOptions) -> Result<Self> {
        match value.get("pages") {
            Some(Value::Array(_)) => Ok(Self { value, options }),
            Some(_) => Err(Error::InvalidExport("\"pages\" is not an array".into())),
            None => Err(Error::InvalidExport("missing \"pages\" field".into())),
        }
    }

    /// Number of page entries in the container, before selection.
    pub fn raw_page_count(&self) -> usize {
        self.value
            .get("pages")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Parse the container into an [`Export`].
    pub fn parse(self) -> Result<Export> {
        let Self { mut value, options } = self;

        let raw_pages = match value.as_object_mut().and_then(|o| o.remove("pages")) {
            Some(Value::Array(pages)) => pages,
            _ => return Err(Error::InvalidExport("missing \"pages\" field".into())),
        };

        let mut export: Export = serde_json::from_value(value)?;

        for (index, raw) in raw_pages.into_iter().enumerate() {
            let page: Page = match serde_json::from_value(raw) {
                Ok(page) => page,
                Err(e) => match options.error_mode {
                    ErrorMode::Strict => return Err(e.into()),
                    ErrorMode::Lenient => {
                        log::warn!("Skipping malformed page #{}: {}", index, e);
                        continue;
                    }
                },
            };

            if !options.pages.includes(&page.title) {
                continue;
            }
            if options.skip_empty_pages && page.is_empty() {
                log::debug!("Skipping empty page: {}", page.title);
                continue;
            }
            export.add_page(page);
        }

        log::debug!("Parsed {} pages", export.page_count());
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::PageSelection;

    const SAMPLE: &str = r#"{
        "name": "notes",
        "pages": [
            {"title": "One", "created": 1, "updated": 2, "lines": ["One", "body"]},
            {"title": "Two", "created": 3, "updated": 4, "lines": ["Two"]}
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let export = ExportParser::from_bytes(SAMPLE.as_bytes())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(export.name.as_deref(), Some("notes"));
        assert_eq!(export.page_count(), 2);
        assert_eq!(export.pages[0].updated, 2);
    }

    #[test]
    fn test_missing_pages_is_invalid() {
        let result = ExportParser::from_bytes(br#"{"name": "x"}"#);
        assert!(matches!(result, Err(Error::InvalidExport(_))));

        let result = ExportParser::from_bytes(br#"{"pages": {}}"#);
        assert!(matches!(result, Err(Error::InvalidExport(_))));
    }

    #[test]
    fn test_not_json() {
        let result = ExportParser::from_bytes(b"not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_strict_fails_on_malformed_page() {
        let data = r#"{"pages": [{"title": "ok", "lines": []}, {"lines": 5}]}"#;
        let result = ExportParser::from_bytes(data.as_bytes()).unwrap().parse();
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_lenient_skips_malformed_page() {
        let data = r#"{"pages": [{"title": "ok", "lines": []}, {"lines": 5}]}"#;
        let export = ExportParser::from_bytes_with_options(data.as_bytes(), ParseOptions::new().lenient())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(export.page_count(), 1);
        assert_eq!(export.pages[0].title, "ok");
    }

    #[test]
    fn test_page_selection() {
        let options = ParseOptions::new().with_pages(PageSelection::from_titles(["Two"]));
        let parser = ExportParser::from_bytes_with_options(SAMPLE.as_bytes(), options).unwrap();
        assert_eq!(parser.raw_page_count(), 2);

        let export = parser.parse().unwrap();
        assert_eq!(export.page_count(), 1);
        assert_eq!(export.pages[0].title, "Two");
    }

    #[test]
    fn test_skip_empty_pages() {
        let data = r#"{"pages": [{"title": "empty", "lines": []}, {"title": "full", "lines": ["full"]}]}"#;
        let options = ParseOptions::new().with_skip_empty(true);
        let export = ExportParser::from_bytes_with_options(data.as_bytes(), options)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(export.page_count(), 1);
    }
}
