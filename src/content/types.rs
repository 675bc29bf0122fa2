//! Shared types for the content pipeline.
//!
//! Tokens flow from the tokenizer into the positioner, which emits
//! positioned runs consumed by section location and table reconstruction.
//! Kept separate so `positioner.rs` and `table.rs` don't depend on each other.

/// A primitive token from a page content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Font selector name, including the leading slash (e.g. `/F2`).
    Font(String),
    /// Numeric operand.
    Number(f64),
    /// Raw bytes between the parentheses of a string literal, still escaped.
    Literal(Vec<u8>),
}

/// A piece of text drawn by one text-showing operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRun {
    pub text: String,
    /// Horizontal position in PDF points.
    pub x: f64,
    /// Vertical position in PDF points (bottom-up, so lower rows have smaller y).
    pub y: f64,
    /// Drawn in the bold font: titles, column headers, labels and totals.
    pub bold: bool,
}

impl PositionedRun {
    pub fn new(text: impl Into<String>, x: f64, y: f64, bold: bool) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            bold,
        }
    }

    /// True for a bold run whose text is exactly `text`.
    pub fn is_label(&self, text: &str) -> bool {
        self.bold && self.text == text
    }
}
