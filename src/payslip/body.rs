//! Itemised earnings from page 2 onwards ("body").
//!
//! The body is one long table split into four titled blocks, each closed by
//! a bold `Total` and its figure. Continuation pages repeat the column
//! header, which is cut off before the pages are joined.

use serde::{Deserialize, Serialize};

use super::fields::parse_cents;
use super::schema::{map_rows, BodyLine, LineItem};
use crate::content::{reconstruct_rows, ColumnBounds, PositionedRun};
use crate::error::{ExtractError, Result};

pub const PRIOR_TAXED: &str = "PRIOR PERIOD TAXED EARNINGS";
pub const CURRENT_TAXED: &str = "CURRENT PERIOD TAXED EARNINGS";
pub const PRIOR_UNTAXED: &str = "PRIOR PERIOD UNTAXED EARNINGS";
pub const CURRENT_UNTAXED: &str = "CURRENT PERIOD UNTAXED EARNINGS";
pub const TOTAL_TAXABLE: &str = "Total Taxable Earnings";
pub const TOTAL_UNTAXED: &str = "Total Untaxed Earnings";

/// Last run of the column header repeated at the top of continuation pages.
const HEADER_END: &str = "Amount";

/// Itemised earnings, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub prior_period_taxed_earnings: Vec<BodyLine>,
    pub current_period_taxed_earnings: Vec<BodyLine>,
    pub prior_period_untaxed_earnings: Vec<BodyLine>,
    pub current_period_untaxed_earnings: Vec<BodyLine>,
}

/// One titled block and the total printed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyTable {
    pub title: &'static str,
    pub lines: Vec<BodyLine>,
    pub printed_total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyTables {
    pub prior_taxed: BodyTable,
    pub current_taxed: BodyTable,
    pub prior_untaxed: BodyTable,
    pub current_untaxed: BodyTable,
    pub printed_taxable: i64,
    pub printed_untaxed: i64,
}

impl BodyTables {
    pub fn into_body(self) -> Body {
        Body {
            prior_period_taxed_earnings: self.prior_taxed.lines,
            current_period_taxed_earnings: self.current_taxed.lines,
            prior_period_untaxed_earnings: self.prior_untaxed.lines,
            current_period_untaxed_earnings: self.current_untaxed.lines,
        }
    }
}

/// Join the body pages into one run list.
///
/// `pages[0]` is the summary page and is ignored. Page 2 is taken whole; later
/// pages lose everything up to and including the bold `Amount` header.
pub fn body_runs(pages: &[Vec<PositionedRun>]) -> Result<Vec<PositionedRun>> {
    let mut runs = pages
        .get(1)
        .cloned()
        .ok_or(ExtractError::MissingBody(pages.len()))?;

    for page in &pages[2..] {
        let data = page
            .iter()
            .position(|r| r.is_label(HEADER_END))
            .map_or(&[][..], |i| &page[i + 1..]);
        runs.extend_from_slice(data);
    }

    tracing::debug!(pages = pages.len() - 1, runs = runs.len(), "joined body pages");
    Ok(runs)
}

fn bold_index(runs: &[PositionedRun], from: usize, text: &str) -> Option<usize> {
    runs[from..]
        .iter()
        .position(|r| r.is_label(text))
        .map(|i| from + i)
}

/// The figure drawn right after the bold label `text`.
fn printed_after(runs: &[PositionedRun], at: usize, label: &str) -> Result<i64> {
    let run = runs
        .get(at + 1)
        .ok_or_else(|| ExtractError::MissingTotal(label.to_string()))?;
    parse_cents(&run.text)
}

fn table(runs: &[PositionedRun], bounds: &ColumnBounds, title: &'static str) -> Result<BodyTable> {
    let start =
        bold_index(runs, 0, title).ok_or_else(|| ExtractError::TitleNotFound(title.to_string()))?;
    let end = bold_index(runs, start, "Total")
        .ok_or_else(|| ExtractError::MissingTotal(title.to_string()))?;

    let rows = reconstruct_rows(&runs[start..end], bounds)?;
    Ok(BodyTable {
        title,
        lines: map_rows(title, &rows)?,
        printed_total: printed_after(runs, end, title)?,
    })
}

fn grand_total(runs: &[PositionedRun], label: &str) -> Result<i64> {
    let at = bold_index(runs, 0, label)
        .ok_or_else(|| ExtractError::MissingTotal(label.to_string()))?;
    printed_after(runs, at, label)
}

/// Read the four body tables and the two grand totals.
pub fn extract_body(runs: &[PositionedRun]) -> Result<BodyTables> {
    let bounds = ColumnBounds::resolve(runs, BodyLine::COLUMNS)?;

    Ok(BodyTables {
        prior_taxed: table(runs, &bounds, PRIOR_TAXED)?,
        current_taxed: table(runs, &bounds, CURRENT_TAXED)?,
        prior_untaxed: table(runs, &bounds, PRIOR_UNTAXED)?,
        current_untaxed: table(runs, &bounds, CURRENT_UNTAXED)?,
        printed_taxable: grand_total(runs, TOTAL_TAXABLE)?,
        printed_untaxed: grand_total(runs, TOTAL_UNTAXED)?,
    })
}
