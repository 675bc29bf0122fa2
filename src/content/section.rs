//! Section/title location.
//!
//! Bold runs written in capitals ("1. TAXED EARNINGS", "LEAVE",
//! "DISBURSEMENTS (BANKED)") partition a page into named sections. Every
//! run after a title, bold or not, belongs to that title until the next one.

use std::sync::LazyLock;

use regex::Regex;

use super::types::PositionedRun;
use crate::error::{ExtractError, Result};

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[. 0-9A-Z()]*[A-Z][. 0-9A-Z()]*$").unwrap());

/// A titled slice of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    /// Runs after the title, in draw order. The title run itself is not included.
    pub runs: Vec<PositionedRun>,
}

impl Section {
    pub fn bold_texts(&self) -> impl Iterator<Item = &str> {
        self.runs.iter().filter(|r| r.bold).map(|r| r.text.as_str())
    }
}

/// Does this run look like a section title?
pub fn is_title(run: &PositionedRun) -> bool {
    run.bold && TITLE.is_match(&run.text)
}

/// Split runs into sections at every title run.
///
/// Runs before the first title are dropped.
pub fn locate_sections(runs: &[PositionedRun]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for run in runs {
        if is_title(run) {
            sections.push(Section {
                title: run.text.clone(),
                runs: Vec::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.runs.push(run.clone());
        }
    }

    tracing::debug!(count = sections.len(), "located sections");
    sections
}

/// Find a section by title. When a title repeats, the last one wins.
pub fn find_section<'a>(sections: &'a [Section], title: &str) -> Result<&'a Section> {
    sections
        .iter()
        .rev()
        .find(|s| s.title == title)
        .ok_or_else(|| ExtractError::TitleNotFound(title.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(text: &str) -> PositionedRun {
        PositionedRun::new(text, 0.0, 0.0, true)
    }

    fn plain(text: &str) -> PositionedRun {
        PositionedRun::new(text, 0.0, 0.0, false)
    }

    #[test]
    fn title_pattern() {
        assert!(is_title(&bold("1. TAXED EARNINGS")));
        assert!(is_title(&bold("DISBURSEMENTS (BANKED)")));
        assert!(is_title(&bold("LEAVE")));
        assert!(!is_title(&bold("Total")));
        assert!(!is_title(&bold("1,234.56")));
        assert!(!is_title(&bold("350.00")));
        assert!(!is_title(&bold("Name:")));
        assert!(!is_title(&plain("LEAVE")));
    }

    #[test]
    fn runs_belong_to_most_recent_title() {
        let runs = vec![
            plain("preamble"),
            bold("4. TAX"),
            bold("Description"),
            plain("PAYG"),
            bold("LEAVE"),
            plain("Annual"),
        ];
        let sections = locate_sections(&runs);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "4. TAX");
        assert_eq!(sections[0].runs, vec![bold("Description"), plain("PAYG")]);
        assert_eq!(sections[1].runs, vec![plain("Annual")]);
    }

    #[test]
    fn missing_section_is_structural_error() {
        let sections = locate_sections(&[bold("LEAVE")]);
        assert_eq!(
            find_section(&sections, "4. TAX"),
            Err(ExtractError::TitleNotFound("4. TAX".into()))
        );
    }

    #[test]
    fn repeated_title_last_wins() {
        let runs = vec![bold("LEAVE"), plain("a"), bold("LEAVE"), plain("b")];
        let sections = locate_sections(&runs);
        let leave = find_section(&sections, "LEAVE").unwrap();
        assert_eq!(leave.runs, vec![plain("b")]);
    }
}
