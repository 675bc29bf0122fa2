//! Payslip extraction: typed fields, tables and cross-checks.
//!
//! Page 1 carries the header ([`head`]) and the summary tables ([`stem`]);
//! pages 2 and on itemise earnings ([`body`]). All three are read from the
//! positioned runs produced by [`crate::content`], checked against each
//! other ([`checks`]) and assembled into a [`Payslip`].

pub mod body;
pub mod checks;
pub mod fields;
pub mod glossary;
pub mod head;
pub mod schema;
pub mod stem;

pub use body::Body;
pub use head::Head;
pub use stem::Stem;

use serde::{Deserialize, Serialize};

use crate::config::ExtractConfig;
use crate::content::{page_runs, PositionedRun};
use crate::error::{ExtractError, Result};

/// Everything extracted from one payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    pub head: Head,
    pub stem: Stem,
    pub body: Body,
    /// Failed consistency checks, in the order they were evaluated.
    pub warnings: Vec<String>,
}

/// Runs the pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract a payslip from its page content streams, in page order.
    pub fn extract(&self, pages: &[&[u8]]) -> Result<Payslip> {
        if pages.len() < 2 {
            return Err(ExtractError::MissingBody(pages.len()));
        }

        let pages = pages
            .iter()
            .map(|stream| page_runs(stream, &self.config.bold_font))
            .collect::<Result<Vec<_>>>()?;
        self.extract_runs(&pages)
    }

    /// Extract a payslip from already positioned pages.
    pub fn extract_runs(&self, pages: &[Vec<PositionedRun>]) -> Result<Payslip> {
        let body_runs = body::body_runs(pages)?;
        let summary = &pages[0];

        let head = head::extract_head(summary)?;
        let stem = stem::extract_stem(summary, &self.config.leave_footer)?;
        let body = body::extract_body(&body_runs)?;

        let mut invariants = checks::stem_invariants(&stem);
        invariants.extend(checks::body_invariants(&body));
        invariants.extend(checks::document_invariants(&stem, &body));
        let warnings = checks::evaluate(&invariants);

        tracing::debug!(
            period = head.period_number,
            warnings = warnings.len(),
            "extracted payslip"
        );

        Ok(Payslip {
            head,
            stem: stem.into_stem(),
            body: body.into_body(),
            warnings,
        })
    }
}

/// Extract with the default configuration.
pub fn extract(pages: &[&[u8]]) -> Result<Payslip> {
    Extractor::default().extract(pages)
}
