//! Cross-checks between printed and recomputed figures.
//!
//! The payslip prints most figures more than once: every table has a total,
//! the net pay table mirrors the disbursements, and the body itemises what
//! page 1 summarises. Each redundancy is written down as an [`Invariant`] and
//! evaluated uniformly. A failed invariant is a warning, never an error.

use super::body::BodyTables;
use super::fields::format_cents;
use super::schema::{total, Amounted};
use super::stem::{StemTables, Totalled};

/// One consistency rule over extracted figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invariant {
    /// A recomputed sum equals the figure printed for it.
    Printed {
        label: String,
        computed: i128,
        printed: i128,
    },
    /// Page 1 and the body agree on a category total.
    Agree {
        label: &'static str,
        stem: i128,
        body: i128,
    },
    /// Earnings less tax, deductions and net pay leave nothing over.
    ///
    /// Figures are widened to `i128` so the arithmetic cannot overflow.
    Balanced {
        prefix: &'static str,
        taxable: i128,
        untaxed: i128,
        tax: i128,
        deductions: i128,
        net: i128,
    },
    /// Two tables list the same figures row for row.
    ///
    /// A single zero row against an empty table is accepted: a payslip with
    /// no net pay still prints `0.00` under NET PAY but banks nothing.
    SameRows {
        message: &'static str,
        left: Vec<Option<i64>>,
        right: Vec<Option<i64>>,
    },
    Holds {
        message: &'static str,
        holds: bool,
    },
}

impl Invariant {
    /// The warning text when the rule is broken, `None` when it holds.
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Printed { label, computed, printed } => (computed != printed).then(|| {
                format!(
                    "{label}: expected {}, got {}",
                    format_cents(*computed),
                    format_cents(*printed)
                )
            }),
            Self::Agree { label, stem, body } => (stem != body).then(|| {
                format!(
                    "{label}: stem {} != body {}",
                    format_cents(*stem),
                    format_cents(*body)
                )
            }),
            Self::Balanced { prefix, taxable, untaxed, tax, deductions, net } => {
                let remainder = taxable + untaxed - tax - deductions - net;
                (remainder != 0).then(|| {
                    format!(
                        "{prefix}{} taxable + {} untaxed - {} tax - {} deduct - {} net = {}, \
                         not zero",
                        format_cents(*taxable),
                        format_cents(*untaxed),
                        format_cents(*tax),
                        format_cents(*deductions),
                        format_cents(*net),
                        format_cents(remainder),
                    )
                })
            }
            Self::SameRows { message, left, right } => {
                let zero_against_nothing = left[..] == [Some(0)] && right.is_empty();
                (left != right && !zero_against_nothing).then(|| (*message).to_string())
            }
            Self::Holds { message, holds } => (!holds).then(|| (*message).to_string()),
        }
    }
}

/// Warnings for every broken invariant, in order.
pub fn evaluate(invariants: &[Invariant]) -> Vec<String> {
    invariants
        .iter()
        .filter_map(Invariant::warning)
        .inspect(|w| tracing::debug!(warning = %w, "consistency check failed"))
        .collect()
}

fn printed_total<T: Amounted>(table: &Totalled<T>) -> Invariant {
    Invariant::Printed {
        label: format!("{} total incorrect", table.title),
        computed: total(&table.lines),
        printed: table.printed.total.into(),
    }
}

/// Rules internal to page 1.
pub fn stem_invariants(stem: &StemTables) -> Vec<Invariant> {
    vec![
        printed_total(&stem.taxed_earnings),
        printed_total(&stem.untaxed_earnings),
        printed_total(&stem.tax),
        printed_total(&stem.deductions),
        printed_total(&stem.superannuation),
        Invariant::Holds {
            message: "Last line of leave not where expected",
            holds: stem.leave_footer_found,
        },
        Invariant::SameRows {
            message: "NET PAY does not match DISBURSEMENTS",
            left: stem.net_pay.iter().map(|l| l.this_pay).collect(),
            right: stem.net.iter().map(|d| d.amount).collect(),
        },
        Invariant::Balanced {
            prefix: "",
            taxable: total(&stem.taxed_earnings.lines),
            untaxed: total(&stem.untaxed_earnings.lines),
            tax: total(&stem.tax.lines),
            deductions: total(&stem.deductions.lines),
            net: total(&stem.net),
        },
        Invariant::Balanced {
            prefix: "YTD ",
            taxable: stem.taxed_earnings.printed.ytd.into(),
            untaxed: stem.untaxed_earnings.printed.ytd.into(),
            tax: stem.tax.printed.ytd.into(),
            deductions: stem.deductions.printed.ytd.into(),
            net: stem.net_ytd.into(),
        },
    ]
}

/// Rules internal to the body pages.
pub fn body_invariants(body: &BodyTables) -> Vec<Invariant> {
    let mut rules: Vec<Invariant> = [
        &body.prior_taxed,
        &body.current_taxed,
        &body.prior_untaxed,
        &body.current_untaxed,
    ]
    .into_iter()
    .map(|table| Invariant::Printed {
        label: format!("Body {} total mismatch", table.title),
        computed: total(&table.lines),
        printed: table.printed_total.into(),
    })
    .collect();

    rules.push(Invariant::Printed {
        label: "Body total taxable earnings list miscalculated".into(),
        computed: taxed_body_total(body),
        printed: body.printed_taxable.into(),
    });
    rules.push(Invariant::Printed {
        label: "Body total untaxed earnings mismatch".into(),
        computed: untaxed_body_total(body),
        printed: body.printed_untaxed.into(),
    });
    rules
}

/// Rules tying page 1 to the body.
pub fn document_invariants(stem: &StemTables, body: &BodyTables) -> Vec<Invariant> {
    vec![
        Invariant::Agree {
            label: "Taxed income mismatch",
            stem: total(&stem.taxed_earnings.lines),
            body: taxed_body_total(body),
        },
        Invariant::Agree {
            label: "Untaxed income mismatch",
            stem: total(&stem.untaxed_earnings.lines),
            body: untaxed_body_total(body),
        },
    ]
}

fn taxed_body_total(body: &BodyTables) -> i128 {
    total(&body.prior_taxed.lines) + total(&body.current_taxed.lines)
}

fn untaxed_body_total(body: &BodyTables) -> i128 {
    total(&body.prior_untaxed.lines) + total(&body.current_untaxed.lines)
}
