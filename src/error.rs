//! Structural errors.
//!
//! Anything in here means the document does not follow the fixed payslip
//! layout, so extraction of the whole document is abandoned. Arithmetic
//! disagreements between printed and recomputed figures are *not* errors;
//! they are collected as warnings on [`crate::Payslip`].

use thiserror::Error;

/// Extraction pipeline errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("section title not found: {0:?}")]
    TitleNotFound(String),

    #[error("column titles not found: {}", .missing.join(", "))]
    ColumnTitlesNotFound { missing: Vec<String> },

    #[error("bad escape in text literal {literal:?}: {reason}")]
    BadEscape { literal: String, reason: &'static str },

    #[error("not a dollar value: {0:?}")]
    InvalidMoney(String),

    #[error("not a ten-thousandths value: {0:?}")]
    InvalidRate(String),

    #[error("not a dd-mm-yyyy date: {0:?}")]
    InvalidDate(String),

    #[error("not an integer: {0:?}")]
    InvalidInteger(String),

    #[error("aberrant cell above previous: {text:?} at y={y}, row at y={row_y}")]
    CellAbovePrevious { text: String, y: f64, row_y: f64 },

    #[error("aberrant cell to left of previous: {text:?} in column {column}")]
    CellOutOfOrder { text: String, column: usize },

    #[error("{section}: row has {count} populated cells, expected {min}-{max}")]
    UnexpectedCellCount {
        section: String,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("{0}: table unexpectedly empty")]
    EmptyTable(String),

    #[error("{0}: printed total not found")]
    MissingTotal(String),

    #[error("head field not found: {0}")]
    MissingField(&'static str),

    #[error("document has {0} page(s), need at least 2")]
    MissingBody(usize),

    #[error("glossary pair ({long})({short}) matches too many groups")]
    GlossaryConflict { short: String, long: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
