//! Model types for a project export.
//!
//! The model is the already-parsed form of the export container. It is
//! read-only input to the renderer: pages and lines are produced once at
//! load time and never mutated during conversion.

mod export;
mod page;

pub use export::Export;
pub use page::{Line, Page};
