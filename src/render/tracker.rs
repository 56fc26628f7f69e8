//! Per-page block state: code blocks and tables.
//!
//! A code block or table opens on a sentinel line and stays open while the
//! following lines are indented. The first non-indented line closes it and is
//! then handled as an ordinary line, so it can open the next block itself.

use super::inline::InlineConverter;

/// Prefix opening a code block; the text after its last `.` names the language.
pub const CODE_SENTINEL: &str = "code:";

/// Prefix opening a table.
pub const TABLE_SENTINEL: &str = "table:";

/// Characters that continue an open block, including the ideographic space.
pub const INDENT_CHARS: [char; 3] = ['\t', ' ', '\u{3000}'];

const FENCE: &str = "```";
const DASH_GROUP: &str = "-----";

/// Where the tracker is within the current page.
///
/// Code blocks and tables never nest, so one enum covers both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    /// Ordinary paragraph text
    #[default]
    Normal,
    /// Inside a fenced code block
    InCodeBlock,
    /// Inside a table
    InTable {
        /// Rows emitted after the sentinel (0 until the header arrives)
        row: usize,
        /// Column count fixed by the header row
        columns: usize,
    },
}

/// What a rendered line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Paragraph text, eligible for a hard line break
    Text,
    /// Literal code-block content, including the sentinel line
    Code,
    /// An opening or closing fence
    Fence,
    /// A table sentinel, header, divider or data row
    Table,
}

/// A line of Markdown output with its block kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Output text without line terminator
    pub text: String,
    /// Block the line belongs to
    pub kind: LineKind,
}

impl RenderedLine {
    /// Create a rendered line.
    pub fn new(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Create a paragraph text line.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, LineKind::Text)
    }
}

/// Walks one page's lines and tracks open blocks.
pub struct LineTracker<'a> {
    converter: &'a InlineConverter,
    state: LineState,
    code_blocks: usize,
    tables: usize,
}

impl<'a> LineTracker<'a> {
    /// Create a tracker in the `Normal` state.
    pub fn new(converter: &'a InlineConverter) -> Self {
        Self {
            converter,
            state: LineState::Normal,
            code_blocks: 0,
            tables: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Number of code blocks opened so far.
    pub fn code_block_count(&self) -> usize {
        self.code_blocks
    }

    /// Number of tables opened so far.
    pub fn table_count(&self) -> usize {
        self.tables
    }

    /// Process one source line, appending its output to `out`.
    pub fn feed(&mut self, line: &str, out: &mut Vec<RenderedLine>) {
        let indented = is_indented(line);

        match self.state {
            LineState::InCodeBlock if indented => {
                out.push(RenderedLine::new(line, LineKind::Code));
                return;
            }
            LineState::InCodeBlock => {
                log::debug!("Closing code block");
                out.push(RenderedLine::new(FENCE, LineKind::Fence));
                self.state = LineState::Normal;
            }
            LineState::InTable { row, columns } if indented => {
                self.table_row(line, row, columns, out);
                return;
            }
            LineState::InTable { .. } => {
                log::debug!("Closing table");
                self.state = LineState::Normal;
            }
            LineState::Normal => {}
        }

        if line.starts_with(CODE_SENTINEL) {
            let language = fence_language(line);
            log::debug!("Opening code block (language: {:?})", language);
            out.push(RenderedLine::new(line, LineKind::Code));
            out.push(RenderedLine::new(
                format!("{}{}", FENCE, language),
                LineKind::Fence,
            ));
            self.state = LineState::InCodeBlock;
            self.code_blocks += 1;
        } else if line.starts_with(TABLE_SENTINEL) {
            log::debug!("Opening table");
            out.push(RenderedLine::new(
                self.converter.convert(line),
                LineKind::Table,
            ));
            self.state = LineState::InTable { row: 0, columns: 0 };
            self.tables += 1;
        } else {
            out.push(RenderedLine::text(self.converter.convert(line)));
        }
    }

    /// Close whatever is still open at end of page.
    pub fn finish(self, out: &mut Vec<RenderedLine>) {
        if self.state == LineState::InCodeBlock {
            out.push(RenderedLine::new(FENCE, LineKind::Fence));
        }
    }

    fn table_row(&mut self, line: &str, row: usize, columns: usize, out: &mut Vec<RenderedLine>) {
        let cells = delimit_row(line);

        if row == 0 {
            let columns = cells.matches('|').count().saturating_sub(1);
            out.push(RenderedLine::new(
                self.converter.convert(&cells),
                LineKind::Table,
            ));
            out.push(RenderedLine::new(divider(columns), LineKind::Table));
            self.state = LineState::InTable { row: 1, columns };
        } else {
            out.push(RenderedLine::new(
                self.converter.convert(&cells),
                LineKind::Table,
            ));
            self.state = LineState::InTable {
                row: row + 1,
                columns,
            };
        }
    }
}

/// Check if a line starts with an indentation character.
pub fn is_indented(line: &str) -> bool {
    line.chars().next().is_some_and(|c| INDENT_CHARS.contains(&c))
}

/// Language tag for a code sentinel: the text after its last `.`.
pub fn fence_language(line: &str) -> &str {
    line.rsplit_once('.').map_or("", |(_, ext)| ext.trim())
}

/// Turn an indented, tab-separated row into a `|`-delimited table row.
pub fn delimit_row(line: &str) -> String {
    let body = match line.chars().next() {
        Some(c) if INDENT_CHARS.contains(&c) => &line[c.len_utf8()..],
        _ => line,
    };
    format!("|{}|", body.replace('\t', "|"))
}

/// Header divider with one dash group per column.
pub fn divider(columns: usize) -> String {
    format!("|{}", format!("{}|", DASH_GROUP).repeat(columns))
}
