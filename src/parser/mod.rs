//! Export parsing module.

mod export_parser;
mod options;

pub use export_parser::ExportParser;
pub use options::{ErrorMode, PageSelection, ParseOptions};
