//! Field mapping: reconstructed rows to typed line items.
//!
//! Each table on the payslip has a fixed column layout, declared once per
//! line type through [`LineItem`]. The column titles double as the input to
//! [`ColumnBounds::resolve`](crate::content::ColumnBounds::resolve), so the
//! layout used to cut columns and the layout used to name them can't drift
//! apart.
//!
//! Rows are sparse: an earnings row with no units or rate fills only the
//! description and amount columns. How many cells a row may fill is part of
//! the layout, and a row outside that range is a structural error.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{parse_cents, parse_date, parse_ten_thousandths};
use crate::content::Row;
use crate::error::{ExtractError, Result};

/// A table line type with a fixed column layout.
pub trait LineItem: Sized {
    /// Column titles left to right. `~` marks a right-aligned column.
    const COLUMNS: &'static [&'static str];

    /// How many populated cells a row of this type may have.
    ///
    /// Rows rebuilt from a page always hold between one and `COLUMNS.len()`
    /// cells, so only a range narrower than that can reject them. The check
    /// otherwise guards rows assembled by hand.
    const CELLS: RangeInclusive<usize>;

    /// Build the line from the row's cells, read left to right.
    fn from_cells(cells: &mut Cells<'_>) -> Result<Self>;
}

/// Line items whose amounts are summed by the cross-checks.
pub trait Amounted {
    fn amount(&self) -> Option<i64>;
}

/// Sum of the amounts of `items`, counting empty cells as zero.
///
/// Summed as `i128`: any single amount fits `i64`, a column of them may not.
pub fn total<T: Amounted>(items: &[T]) -> i128 {
    items.iter().filter_map(Amounted::amount).map(i128::from).sum()
}

/// Left-to-right cursor over a row's cells with typed accessors.
pub struct Cells<'a> {
    row: &'a Row,
    next: usize,
}

impl<'a> Cells<'a> {
    fn new(row: &'a Row) -> Self {
        Self { row, next: 0 }
    }

    fn take(&mut self) -> Option<&'a str> {
        let cell = self.row.cell(self.next);
        self.next += 1;
        cell
    }

    pub fn text(&mut self) -> Option<String> {
        self.take().map(str::to_string)
    }

    pub fn cents(&mut self) -> Result<Option<i64>> {
        self.take().map(parse_cents).transpose()
    }

    pub fn ten_thousandths(&mut self) -> Result<Option<i64>> {
        self.take().map(parse_ten_thousandths).transpose()
    }

    pub fn date(&mut self) -> Result<Option<NaiveDate>> {
        self.take().map(parse_date).transpose()
    }
}

/// Map every row of a section to `T`, validating populated-cell counts.
pub fn map_rows<T: LineItem>(section: &str, rows: &[Row]) -> Result<Vec<T>> {
    rows.iter()
        .map(|row| {
            let count = row.populated();
            if !T::CELLS.contains(&count) {
                return Err(ExtractError::UnexpectedCellCount {
                    section: section.to_string(),
                    count,
                    min: *T::CELLS.start(),
                    max: *T::CELLS.end(),
                });
            }
            T::from_cells(&mut Cells::new(row))
        })
        .collect()
}

/// Page-1 earnings line (taxed or untaxed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningLine {
    pub units_x_100: Option<i64>,
    pub rate_x_100: Option<i64>,
    pub description: Option<String>,
    pub amount: Option<i64>,
}

impl LineItem for EarningLine {
    const COLUMNS: &'static [&'static str] = &["~Units", "~Rate", "Description", "~Amount"];
    const CELLS: RangeInclusive<usize> = 1..=4;

    fn from_cells(cells: &mut Cells<'_>) -> Result<Self> {
        Ok(Self {
            units_x_100: cells.cents()?,
            rate_x_100: cells.cents()?,
            description: cells.text(),
            amount: cells.cents()?,
        })
    }
}

/// Page-1 tax, deduction or superannuation line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountLine {
    pub description: Option<String>,
    pub amount: Option<i64>,
}

impl LineItem for AmountLine {
    const COLUMNS: &'static [&'static str] = &["Description", "~Amount"];
    const CELLS: RangeInclusive<usize> = 1..=2;

    fn from_cells(cells: &mut Cells<'_>) -> Result<Self> {
        Ok(Self {
            description: cells.text(),
            amount: cells.cents()?,
        })
    }
}

/// Row of the NET PAY table. Only used to cross-check disbursements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetPayLine {
    pub this_pay: Option<i64>,
    pub ytd: Option<i64>,
}

impl LineItem for NetPayLine {
    const COLUMNS: &'static [&'static str] = &["~This Pay", "~Year to Date"];
    const CELLS: RangeInclusive<usize> = 1..=2;

    fn from_cells(cells: &mut Cells<'_>) -> Result<Self> {
        Ok(Self {
            this_pay: cells.cents()?,
            ytd: cells.cents()?,
        })
    }
}

/// Net pay banked to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disbursement {
    pub bank: Option<String>,
    pub account: Option<String>,
    pub amount: Option<i64>,
}

impl LineItem for Disbursement {
    const COLUMNS: &'static [&'static str] = &["Bank", "Account", "~Amount"];
    const CELLS: RangeInclusive<usize> = 1..=3;

    fn from_cells(cells: &mut Cells<'_>) -> Result<Self> {
        Ok(Self {
            bank: cells.text(),
            account: cells.text(),
            amount: cells.cents()?,
        })
    }
}

/// Leave balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveLine {
    #[serde(rename = "type")]
    pub leave_type: Option<String>,
    pub balance_x_100: Option<i64>,
    pub calculated: Option<String>,
}

impl LineItem for LeaveLine {
    const COLUMNS: &'static [&'static str] = &["Leave Type", "~Balance", "Calculated"];
    const CELLS: RangeInclusive<usize> = 1..=3;

    fn from_cells(cells: &mut Cells<'_>) -> Result<Self> {
        Ok(Self {
            leave_type: cells.text(),
            balance_x_100: cells.cents()?,
            calculated: cells.text(),
        })
    }
}

/// Itemised earnings line from the body pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyLine {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub description: Option<String>,
    pub units_x_100: Option<i64>,
    pub rate_x_10000: Option<i64>,
    pub amount: Option<i64>,
}

impl LineItem for BodyLine {
    const COLUMNS: &'static [&'static str] = &[
        "~Date From",
        "~Date To",
        "Description",
        "~Units",
        "~Rate",
        "~Amount",
    ];
    const CELLS: RangeInclusive<usize> = 1..=6;

    fn from_cells(cells: &mut Cells<'_>) -> Result<Self> {
        Ok(Self {
            date_from: cells.date()?,
            date_to: cells.date()?,
            description: cells.text(),
            units_x_100: cells.cents()?,
            rate_x_10000: cells.ten_thousandths()?,
            amount: cells.cents()?,
        })
    }
}

macro_rules! amounted {
    ($($ty:ty),*) => {
        $(impl Amounted for $ty {
            fn amount(&self) -> Option<i64> {
                self.amount
            }
        })*
    };
}

amounted!(EarningLine, AmountLine, Disbursement, BodyLine);
