//! Cell value parsers.
//!
//! Money is kept as an integer count of minor units so totals compare
//! exactly: `"1,234.56"` is `123456` cents, a `"12.3456"` rate is `123456`
//! ten-thousandths.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{ExtractError, Result};

static FIXED_POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-)?\$? *(\d{1,3}(?:,\d{3})*|\d+)(?:\.(\d*))?$").unwrap()
});

static DMY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap());

/// Parse a decimal with up to `places` fraction digits into an integer
/// scaled by `10^places`.
///
/// Accepts an optional minus sign, an optional `$`, and either comma-grouped
/// or plain integer digits. Missing fraction digits are zero-padded.
fn parse_fixed(s: &str, places: u32) -> Option<i64> {
    let caps = FIXED_POINT.captures(s.trim())?;
    let negative = caps.get(1).is_some();
    let whole: String = caps[2].chars().filter(char::is_ascii_digit).collect();
    let fraction = caps.get(3).map_or("", |m| m.as_str());
    if fraction.len() > places as usize {
        return None;
    }

    let scale = 10_i64.pow(places);
    let mut value = whole.parse::<i64>().ok()?.checked_mul(scale)?;
    if !fraction.is_empty() {
        let pad = 10_i64.pow(places - u32::try_from(fraction.len()).ok()?);
        value = value.checked_add(fraction.parse::<i64>().ok()? * pad)?;
    }

    Some(if negative { -value } else { value })
}

/// Dollar amount to cents.
pub fn parse_cents(s: &str) -> Result<i64> {
    parse_fixed(s, 2).ok_or_else(|| ExtractError::InvalidMoney(s.to_string()))
}

/// Per-unit rate with four decimal places to ten-thousandths.
pub fn parse_ten_thousandths(s: &str) -> Result<i64> {
    parse_fixed(s, 4).ok_or_else(|| ExtractError::InvalidRate(s.to_string()))
}

/// `dd-mm-yyyy` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if !DMY.is_match(s) {
        return Err(ExtractError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%d-%m-%Y").map_err(|_| ExtractError::InvalidDate(s.to_string()))
}

pub fn parse_integer(s: &str) -> Result<u32> {
    s.trim()
        .parse()
        .map_err(|_| ExtractError::InvalidInteger(s.to_string()))
}

/// Render cents the way the document prints them (`-1234.50`).
pub fn format_cents(cents: i128) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
