//! `payslip` - Payslip PDF table extraction
//!
//! # Features
//!
//! - **Layout reconstruction**: Rebuilds tables from positioned text runs using only geometry and the bold flag
//! - **Typed fields**: Money in cents, rates in ten-thousandths, ISO dates
//! - **Cross-checks**: Every printed total is recomputed; disagreements become warnings
//! - **Glossary**: Pairs abbreviated page-1 descriptions with their full body names
//!
//! # Example
//!
//! ```rust,no_run
//! use payslip::{content::pdf, Extractor, ExtractConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let bytes = std::fs::read("payslip.pdf")?;
//!     let pages = pdf::page_streams(&bytes);
//!     let payslip = Extractor::new(ExtractConfig::default()).extract(&pages)?;
//!     for warning in &payslip.warnings {
//!         eprintln!("{warning}");
//!     }
//!     println!("{}", payslip::output::to_json(&payslip)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod output;
pub mod payslip;

pub use config::{load_config, ExtractConfig};
pub use content::{PositionedRun, Row, Section};
pub use error::{ExtractError, Result};
pub use payslip::glossary::{build_glossary, render_glossary, Group};
pub use payslip::{extract, Body, Extractor, Head, Payslip, Stem};

/// Version of payslip
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
