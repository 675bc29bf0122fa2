//! Layout reconstruction from page content streams.
//!
//! Turns the raw bytes of a page's content stream into positioned text
//! runs, then into titled sections and tables.
//!
//! # Pipeline
//!
//! ```text
//! stream bytes → tokens → positioned runs → sections → column bounds → rows
//! ```
//!
//! | Stage | Module |
//! |-------|--------|
//! | Tokenize font selectors, numbers and string literals | [`tokenizer`] |
//! | Track font and position, unescape and decode text | [`positioner`] |
//! | Partition runs at bold capitalised titles | [`section`] |
//! | Column thresholds and row/column clustering | [`table`] |
//! | Locate page streams in a PDF file | [`pdf`] |
//!
//! # Example
//!
//! ```rust
//! use payslip::content::page_runs;
//!
//! let runs = page_runs(b"BT /F2 9 Tf 40 700 Td (LEAVE) Tj ET", "/F2").unwrap();
//! assert_eq!(runs[0].text, "LEAVE");
//! assert!(runs[0].bold);
//! ```

pub mod pdf;
pub mod positioner;
pub mod section;
pub mod table;
pub mod tokenizer;
pub mod types;

pub use section::{find_section, locate_sections, Section};
pub use table::{reconstruct_rows, ColumnBounds, Row};
pub use types::{PositionedRun, Token};

use crate::error::Result;

/// Positioned runs for one page content stream.
pub fn page_runs(stream: &[u8], bold_font: &str) -> Result<Vec<PositionedRun>> {
    let tokens = tokenizer::tokenize(stream);
    let runs = positioner::position_runs(&tokens, bold_font)?;
    tracing::debug!(tokens = tokens.len(), runs = runs.len(), "positioned page");
    Ok(runs)
}
