//! Page-1 header: payer, employee and period details.
//!
//! Most values are the run drawn straight after a bold label such as
//! `Name:`. The address and comments span several runs and stop at the next
//! bold run.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::fields::{parse_cents, parse_date, parse_integer};
use crate::content::PositionedRun;
use crate::error::{ExtractError, Result};

static ABN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ABN: (\d{11})").unwrap());

/// Free-text key/value fields from the top of page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Head {
    pub payer: String,
    pub payer_abn: String,
    pub employee_name: String,
    pub employee_id: String,
    pub employee_email: String,
    pub employee_address: String,
    pub full_time_salary: i64,
    pub period_end_date: NaiveDate,
    pub period_number: u32,
    pub hss_contact: String,
    pub hss_telephone: String,
    pub comments: String,
}

/// Index of the first bold run reading exactly `label`.
fn label_index(runs: &[PositionedRun], label: &str) -> Option<usize> {
    runs.iter().position(|r| r.is_label(label))
}

/// Text of the run right after `label`.
fn value_after<'a>(runs: &'a [PositionedRun], label: &str, field: &'static str) -> Result<&'a str> {
    label_index(runs, label)
        .and_then(|i| runs.get(i + 1))
        .map(|r| r.text.as_str())
        .ok_or(ExtractError::MissingField(field))
}

/// Runs after `label` up to (not including) the next bold run.
fn block_after<'a>(
    runs: &'a [PositionedRun],
    label: &str,
    field: &'static str,
) -> Result<impl Iterator<Item = &'a PositionedRun>> {
    let start = label_index(runs, label).ok_or(ExtractError::MissingField(field))?;
    Ok(runs[start + 1..].iter().take_while(|r| !r.bold))
}

/// Join runs into lines: same-line runs with a space, lower runs with a newline.
fn join_lines<'a>(runs: impl Iterator<Item = &'a PositionedRun>) -> String {
    let mut text = String::new();
    let mut y = f64::INFINITY;
    for run in runs {
        text.push(if run.y < y { '\n' } else { ' ' });
        text.push_str(&run.text);
        y = run.y;
    }
    text.trim().to_string()
}

pub fn extract_head(runs: &[PositionedRun]) -> Result<Head> {
    let payer = runs.first().ok_or(ExtractError::MissingField("payer"))?;
    let payer_abn = runs
        .get(1)
        .and_then(|r| ABN.captures(&r.text))
        .map(|c| c[1].to_string())
        .ok_or(ExtractError::MissingField("payer_abn"))?;

    let employee_address = block_after(runs, "Address:", "employee_address")?
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let comments = join_lines(block_after(runs, "COMMENTS", "comments")?);

    Ok(Head {
        payer: payer.text.clone(),
        payer_abn,
        employee_name: value_after(runs, "Name:", "employee_name")?.to_string(),
        employee_id: value_after(runs, "Employee Id:", "employee_id")?.to_string(),
        employee_email: value_after(runs, "Home Email:", "employee_email")?.to_lowercase(),
        employee_address,
        full_time_salary: parse_cents(value_after(runs, "Full Time Salary:", "full_time_salary")?)?,
        period_end_date: parse_date(value_after(runs, "Period End Date:", "period_end_date")?)?,
        period_number: parse_integer(value_after(runs, "Period Number:", "period_number")?)?,
        hss_contact: value_after(runs, "HSS Contact:", "hss_contact")?.to_string(),
        hss_telephone: value_after(runs, "Telephone:", "hss_telephone")?.to_string(),
        comments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(text: &str, y: f64) -> PositionedRun {
        PositionedRun::new(text, 40.0, y, true)
    }

    fn plain(text: &str, x: f64, y: f64) -> PositionedRun {
        PositionedRun::new(text, x, y, false)
    }

    fn header_runs() -> Vec<PositionedRun> {
        vec![
            plain("Health Support Services", 40.0, 800.0),
            plain("ABN: 12345678901", 40.0, 790.0),
            bold("Name:", 770.0),
            plain("Jane Citizen", 120.0, 770.0),
            bold("Employee Id:", 760.0),
            plain("0123456", 120.0, 760.0),
            bold("Address:", 750.0),
            plain("1 Main Street", 120.0, 750.0),
            plain("PERTH WA 6000", 120.0, 740.0),
            bold("Home Email:", 730.0),
            plain("Jane.Citizen@Example.COM", 120.0, 730.0),
            bold("Full Time Salary:", 720.0),
            plain(" $100,000.00", 120.0, 720.0),
            bold("Period End Date:", 710.0),
            plain("05-03-2024", 120.0, 710.0),
            bold("Period Number:", 700.0),
            plain("12", 120.0, 700.0),
            bold("HSS Contact:", 690.0),
            plain("Payroll Services", 120.0, 690.0),
            bold("Telephone:", 680.0),
            plain("08 6373 3000", 120.0, 680.0),
            bold("COMMENTS", 670.0),
            plain("Back pay", 40.0, 660.0),
            plain("included.", 90.0, 660.0),
            plain("Thank you.", 40.0, 650.0),
            bold("1. TAXED EARNINGS", 600.0),
        ]
    }

    #[test]
    fn extracts_every_field() {
        let head = extract_head(&header_runs()).unwrap();
        assert_eq!(head.payer, "Health Support Services");
        assert_eq!(head.payer_abn, "12345678901");
        assert_eq!(head.employee_name, "Jane Citizen");
        assert_eq!(head.employee_id, "0123456");
        assert_eq!(head.employee_address, "1 Main Street\nPERTH WA 6000");
        assert_eq!(head.employee_email, "jane.citizen@example.com");
        assert_eq!(head.full_time_salary, 10_000_000);
        assert_eq!(head.period_end_date.to_string(), "2024-03-05");
        assert_eq!(head.period_number, 12);
        assert_eq!(head.hss_contact, "Payroll Services");
        assert_eq!(head.hss_telephone, "08 6373 3000");
        assert_eq!(head.comments, "Back pay included.\nThank you.");
    }

    #[test]
    fn missing_label_is_fatal() {
        let runs: Vec<_> = header_runs()
            .into_iter()
            .filter(|r| r.text != "Telephone:")
            .collect();
        assert_eq!(
            extract_head(&runs),
            Err(ExtractError::MissingField("hss_telephone"))
        );
    }

    #[test]
    fn missing_abn_is_fatal() {
        let mut runs = header_runs();
        runs[1].text = "ABN: pending".into();
        assert_eq!(extract_head(&runs), Err(ExtractError::MissingField("payer_abn")));
    }
}
