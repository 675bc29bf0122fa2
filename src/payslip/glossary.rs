//! Abbreviation glossary across many payslips.
//!
//! Page 1 lists earnings under heavily abbreviated descriptions; the body
//! lists the same money under full ones. When exactly one short line and
//! exactly one long description share an amount on a payslip, they name the
//! same thing. Pairs collected across a library of payslips are merged into
//! groups of interchangeable names.

use std::collections::{BTreeMap, BTreeSet};

use super::schema::{BodyLine, EarningLine};
use super::Payslip;
use crate::error::{ExtractError, Result};

/// Names that were matched to each other, directly or through a chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub shorts: BTreeSet<String>,
    pub longs: BTreeSet<String>,
}

/// Descriptions keyed by amount.
type ByAmount = BTreeMap<i64, Vec<String>>;

fn short_side(lines: &[EarningLine]) -> ByAmount {
    let mut side = ByAmount::new();
    for line in lines {
        if let Some(desc) = &line.description {
            side.entry(line.amount.unwrap_or(0)).or_default().push(desc.clone());
        }
    }
    side
}

/// Body lines summed per description, then keyed by the sum.
fn long_side<'a>(lines: impl Iterator<Item = &'a BodyLine>) -> ByAmount {
    let mut sums: BTreeMap<&str, i64> = BTreeMap::new();
    for line in lines {
        if let Some(desc) = &line.description {
            *sums.entry(desc).or_default() += line.amount.unwrap_or(0);
        }
    }

    let mut side = ByAmount::new();
    for (desc, amount) in sums {
        side.entry(amount).or_default().push(desc.to_string());
    }
    side
}

/// Unambiguous (short, long) pairs on one side of one payslip.
fn pairs_for(short: &ByAmount, long: &ByAmount, into: &mut BTreeSet<(String, String)>) {
    for (amount, shorts) in short {
        if let (Some(longs), [s]) = (long.get(amount), shorts.as_slice()) {
            if let [l] = longs.as_slice() {
                into.insert((s.clone(), l.clone()));
            }
        }
    }
}

/// Build the glossary from extracted payslips.
///
/// Fails when a pair links two groups that were so far unrelated, which
/// means the amount match was a coincidence somewhere.
pub fn build_glossary(payslips: &[Payslip]) -> Result<Vec<Group>> {
    let mut pairs = BTreeSet::new();
    for payslip in payslips {
        let body = &payslip.body;
        pairs_for(
            &short_side(&payslip.stem.taxed_earnings),
            &long_side(
                body.prior_period_taxed_earnings
                    .iter()
                    .chain(&body.current_period_taxed_earnings),
            ),
            &mut pairs,
        );
        pairs_for(
            &short_side(&payslip.stem.untaxed_earnings),
            &long_side(
                body.prior_period_untaxed_earnings
                    .iter()
                    .chain(&body.current_period_untaxed_earnings),
            ),
            &mut pairs,
        );
    }

    let groups = merge_pairs(pairs)?;
    tracing::debug!(payslips = payslips.len(), groups = groups.len(), "built glossary");
    Ok(groups)
}

/// Merge pairs into many-to-many groups.
fn merge_pairs(pairs: BTreeSet<(String, String)>) -> Result<Vec<Group>> {
    let mut groups: Vec<Group> = Vec::new();
    for (short, long) in pairs {
        let hits: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.longs.contains(&long) || g.shorts.contains(&short))
            .map(|(i, _)| i)
            .collect();

        match hits.as_slice() {
            [] => groups.push(Group {
                shorts: BTreeSet::from([short]),
                longs: BTreeSet::from([long]),
            }),
            [i] => {
                groups[*i].shorts.insert(short);
                groups[*i].longs.insert(long);
            }
            _ => return Err(ExtractError::GlossaryConflict { short, long }),
        }
    }
    Ok(groups)
}

/// One `SHORT | SHORT = LONG | LONG` line per group, sorted, short side
/// right-aligned.
pub fn render_glossary(groups: &[Group]) -> String {
    let mut lines: Vec<(String, String)> = groups
        .iter()
        .map(|g| {
            (
                g.shorts.iter().map(String::as_str).collect::<Vec<_>>().join(" | "),
                g.longs.iter().map(String::as_str).collect::<Vec<_>>().join(" | "),
            )
        })
        .collect();
    lines.sort();

    let width = lines.iter().map(|(s, _)| s.chars().count()).max().unwrap_or(0);
    lines
        .iter()
        .map(|(s, l)| format!("{s:>width$} = {l}\n"))
        .collect()
}
