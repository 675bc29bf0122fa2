//! Table reconstruction from positioned runs.
//!
//! The payslip has no table structure, only text at coordinates. Tables are
//! recovered in two steps:
//!
//! 1. Resolve column bounds from the bold column-title runs
//! 2. Walk the non-bold runs in draw order, starting a row whenever y drops
//!    and picking the column by comparing x against the bounds
//!
//! Long descriptions wrap onto a second drawn line. The generator leaves a
//! trailing space on every cell of the first line, which is how wrapped rows
//! are recognised and stitched back together.

use super::types::PositionedRun;
use crate::error::{ExtractError, Result};

/// Marks a column title whose data is right-aligned, so its left edge
/// sits somewhere left of the title.
const APPROXIMATE: char = '~';

/// X-thresholds separating adjacent columns (`columns - 1` of them).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBounds(Vec<f64>);

impl ColumnBounds {
    /// Locate `headings` among the bold runs and derive the column thresholds.
    ///
    /// A heading prefixed with `~` is approximate: the boundary to its left is
    /// the midpoint between it and the previous title. Otherwise the boundary
    /// is the title's own x.
    ///
    /// A title printed more than once keeps the x of its first bold
    /// occurrence; later repeats are ignored.
    pub fn resolve(runs: &[PositionedRun], headings: &[&str]) -> Result<Self> {
        let titles: Vec<&str> = headings
            .iter()
            .map(|h| h.trim_start_matches(APPROXIMATE))
            .collect();
        let mut left_edges: Vec<Option<f64>> = vec![None; titles.len()];

        for run in runs.iter().filter(|r| r.bold) {
            if let Some(i) = titles.iter().position(|t| *t == run.text) {
                left_edges[i].get_or_insert(run.x);
            }
            if left_edges.iter().all(Option::is_some) {
                break;
            }
        }

        let missing: Vec<String> = titles
            .iter()
            .zip(&left_edges)
            .filter(|(_, edge)| edge.is_none())
            .map(|(t, _)| (*t).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ExtractError::ColumnTitlesNotFound { missing });
        }

        let edges: Vec<f64> = left_edges.into_iter().flatten().collect();
        let bounds = headings
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, heading)| {
                if heading.starts_with(APPROXIMATE) {
                    (edges[i - 1] + edges[i]) / 2.0
                } else {
                    edges[i]
                }
            })
            .collect();

        Ok(Self(bounds))
    }

    pub fn from_thresholds(thresholds: Vec<f64>) -> Self {
        Self(thresholds)
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.0
    }

    pub fn column_count(&self) -> usize {
        self.0.len() + 1
    }

    /// Column index for a run at `x`: the number of thresholds it meets or exceeds.
    pub fn column_of(&self, x: f64) -> usize {
        self.0.iter().filter(|&&left| x >= left).count()
    }
}

/// One reconstructed table row: at most one string per column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub cells: Vec<Option<String>>,
}

impl Row {
    pub fn new(columns: usize) -> Self {
        Self {
            cells: vec![None; columns],
        }
    }

    /// Build a row from literal cells (mostly for tests).
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(|c| c.map(Into::into)).collect(),
        }
    }

    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(Option::as_deref)
    }

    /// Number of cells holding text.
    pub fn populated(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Soft-wrapped: every filled cell ends in a space.
    fn is_wrapped(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|cell| cell.ends_with(' '))
    }
}

/// Cluster the non-bold runs into rows and columns.
///
/// Rows must come top to bottom and cells left to right within a row; any
/// run that breaks that order means the layout has drifted and is fatal.
pub fn reconstruct_rows(runs: &[PositionedRun], bounds: &ColumnBounds) -> Result<Vec<Row>> {
    let mut rows: Vec<Row> = Vec::new();
    let mut row_y = f64::INFINITY;
    let mut last_column: Option<usize> = None;

    for run in runs.iter().filter(|r| !r.bold) {
        if rows.is_empty() || run.y < row_y {
            rows.push(Row::new(bounds.column_count()));
            row_y = run.y;
            last_column = None;
        } else if run.y > row_y {
            return Err(ExtractError::CellAbovePrevious {
                text: run.text.clone(),
                y: run.y,
                row_y,
            });
        }

        let column = bounds.column_of(run.x);
        let current = rows.len() - 1;
        let row = &mut rows[current];
        if last_column.is_some_and(|last| column < last) || row.cells[column].is_some() {
            return Err(ExtractError::CellOutOfOrder {
                text: run.text.clone(),
                column,
            });
        }

        row.cells[column] = Some(run.text.clone());
        last_column = Some(column);
    }

    merge_wrapped(&mut rows);
    tracing::debug!(rows = rows.len(), "reconstructed table");
    Ok(rows)
}

/// Fold soft-wrapped rows into the row below them.
///
/// Each filled cell of a wrapped row is prepended to the matching cell of the
/// next row, then the wrapped row is removed. A wrapped last row has nothing
/// to join and is kept.
pub fn merge_wrapped(rows: &mut Vec<Row>) {
    let mut i = 0;
    while i + 1 < rows.len() {
        if !rows[i].is_wrapped() {
            i += 1;
            continue;
        }

        let wrapped = rows.remove(i);
        let next = &mut rows[i];
        for (head, tail) in wrapped.cells.into_iter().zip(next.cells.iter_mut()) {
            if let Some(head) = head {
                *tail = Some(match tail.take() {
                    Some(rest) => head + &rest,
                    None => head,
                });
            }
        }
        tracing::debug!(row = i, "merged wrapped row");
    }
}
