//! Page-1 summary tables ("stem").
//!
//! Page 1 is cut into sections at its bold capitalised titles. Each known
//! section holds one table; the five money tables end with a bold `Total`
//! label followed by the period total and the year-to-date total.

use serde::{Deserialize, Serialize};

use super::fields::parse_cents;
use super::schema::{
    map_rows, AmountLine, Disbursement, EarningLine, LeaveLine, LineItem, NetPayLine,
};
use crate::content::{
    find_section, locate_sections, reconstruct_rows, ColumnBounds, PositionedRun, Section,
};
use crate::error::{ExtractError, Result};

pub const TAXED_EARNINGS: &str = "1. TAXED EARNINGS";
pub const UNTAXED_EARNINGS: &str = "2. UNTAXED EARNINGS";
pub const TAX: &str = "4. TAX";
pub const DEDUCTIONS: &str = "5. DEDUCTIONS";
pub const SUPERANNUATION: &str = "6. SUPERANNUATION";
pub const NET_PAY: &str = "7. NET PAY";
pub const DISBURSEMENTS: &str = "DISBURSEMENTS (BANKED)";
pub const LEAVE: &str = "LEAVE";

/// Page-1 tables and their year-to-date totals, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stem {
    pub taxed_earnings_ytd: i64,
    pub untaxed_earnings_ytd: i64,
    pub tax_ytd: i64,
    pub deductions_ytd: i64,
    pub superannuation_ytd: i64,
    pub net_ytd: i64,
    pub taxed_earnings: Vec<EarningLine>,
    pub untaxed_earnings: Vec<EarningLine>,
    pub tax: Vec<AmountLine>,
    pub deductions: Vec<AmountLine>,
    pub superannuation: Vec<AmountLine>,
    pub net: Vec<Disbursement>,
    pub leave: Vec<LeaveLine>,
}

/// Figures printed in bold after a table's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    pub total: i64,
    pub ytd: i64,
}

/// A table whose printed trailer is checked against its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totalled<T> {
    pub title: &'static str,
    pub lines: Vec<T>,
    pub printed: Trailer,
}

/// Everything read off page 1, including figures only needed for checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemTables {
    pub taxed_earnings: Totalled<EarningLine>,
    pub untaxed_earnings: Totalled<EarningLine>,
    pub tax: Totalled<AmountLine>,
    pub deductions: Totalled<AmountLine>,
    pub superannuation: Totalled<AmountLine>,
    pub net_pay: Vec<NetPayLine>,
    pub net_ytd: i64,
    pub net: Vec<Disbursement>,
    pub leave: Vec<LeaveLine>,
    /// The audit note was the last leave row (and has been removed).
    pub leave_footer_found: bool,
}

impl StemTables {
    /// Drop the scratch tables, keeping what callers see.
    pub fn into_stem(self) -> Stem {
        Stem {
            taxed_earnings_ytd: self.taxed_earnings.printed.ytd,
            untaxed_earnings_ytd: self.untaxed_earnings.printed.ytd,
            tax_ytd: self.tax.printed.ytd,
            deductions_ytd: self.deductions.printed.ytd,
            superannuation_ytd: self.superannuation.printed.ytd,
            net_ytd: self.net_ytd,
            taxed_earnings: self.taxed_earnings.lines,
            untaxed_earnings: self.untaxed_earnings.lines,
            tax: self.tax.lines,
            deductions: self.deductions.lines,
            superannuation: self.superannuation.lines,
            net: self.net,
            leave: self.leave,
        }
    }
}

/// Reconstruct and map the table in `section`.
pub fn section_lines<T: LineItem>(section: &Section) -> Result<Vec<T>> {
    let bounds = ColumnBounds::resolve(&section.runs, T::COLUMNS)?;
    let rows = reconstruct_rows(&section.runs, &bounds)?;
    map_rows(&section.title, &rows)
}

/// The two bold figures after the section's bold `Total` label.
pub fn trailer(section: &Section) -> Result<Trailer> {
    let bold: Vec<&str> = section.bold_texts().collect();
    let missing = || ExtractError::MissingTotal(section.title.clone());
    let at = bold.iter().position(|t| *t == "Total").ok_or_else(missing)?;
    match (bold.get(at + 1), bold.get(at + 2)) {
        (Some(total), Some(ytd)) => Ok(Trailer {
            total: parse_cents(total)?,
            ytd: parse_cents(ytd)?,
        }),
        _ => Err(missing()),
    }
}

fn totalled<T: LineItem>(sections: &[Section], title: &'static str) -> Result<Totalled<T>> {
    let section = find_section(sections, title)?;
    Ok(Totalled {
        title,
        lines: section_lines(section)?,
        printed: trailer(section)?,
    })
}

fn plain<T: LineItem>(sections: &[Section], title: &'static str) -> Result<Vec<T>> {
    section_lines(find_section(sections, title)?)
}

/// Read every page-1 table.
///
/// `leave_footer` is the audit note expected as the final leave row.
pub fn extract_stem(runs: &[PositionedRun], leave_footer: &str) -> Result<StemTables> {
    let sections = locate_sections(runs);

    let net_pay: Vec<NetPayLine> = plain(&sections, NET_PAY)?;
    // The year-to-date column repeats one figure on every row.
    let net_ytd = net_pay
        .first()
        .ok_or_else(|| ExtractError::EmptyTable(NET_PAY.to_string()))?
        .ytd
        .ok_or_else(|| ExtractError::MissingTotal(NET_PAY.to_string()))?;

    let mut leave: Vec<LeaveLine> = plain(&sections, LEAVE)?;
    let last = leave
        .last()
        .ok_or_else(|| ExtractError::EmptyTable(LEAVE.to_string()))?;
    let leave_footer_found = last.leave_type.as_deref() == Some(leave_footer);
    if leave_footer_found {
        leave.pop();
    }

    Ok(StemTables {
        taxed_earnings: totalled(&sections, TAXED_EARNINGS)?,
        untaxed_earnings: totalled(&sections, UNTAXED_EARNINGS)?,
        tax: totalled(&sections, TAX)?,
        deductions: totalled(&sections, DEDUCTIONS)?,
        superannuation: totalled(&sections, SUPERANNUATION)?,
        net_pay,
        net_ytd,
        net: plain(&sections, DISBURSEMENTS)?,
        leave,
        leave_footer_found,
    })
}
