//! Synthetic payslips built from content-stream text.
#![allow(dead_code)]

use std::fmt::Write;

pub const REGULAR: &str = "/F1";
pub const BOLD: &str = "/F2";

/// One page content stream, one `BT … ET` block per run.
#[derive(Default)]
pub struct Page {
    ops: String,
}

impl Page {
    pub fn text(&mut self, x: f64, y: f64, s: &str) -> &mut Self {
        self.show(REGULAR, x, y, s)
    }

    pub fn bold(&mut self, x: f64, y: f64, s: &str) -> &mut Self {
        self.show(BOLD, x, y, s)
    }

    fn show(&mut self, font: &str, x: f64, y: f64, s: &str) -> &mut Self {
        let escaped = s.replace('\\', r"\\").replace('(', r"\(").replace(')', r"\)");
        writeln!(self.ops, "BT {font} 9 Tf {x} {y} Td ({escaped}) Tj ET").unwrap();
        self
    }

    pub fn stream(&self) -> Vec<u8> {
        self.ops.clone().into_bytes()
    }
}

/// `1234567` cents as `12,345.67`.
pub fn money(cents: i64) -> String {
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped}.{:02}", cents % 100)
}

fn head(page: &mut Page) {
    page.text(40.0, 800.0, "Health Support Services")
        .text(40.0, 790.0, "ABN: 12345678901")
        .bold(40.0, 770.0, "Name:")
        .text(120.0, 770.0, "Jane Citizen")
        .bold(40.0, 760.0, "Employee Id:")
        .text(120.0, 760.0, "0123456")
        .bold(40.0, 750.0, "Address:")
        .text(120.0, 750.0, "1 Main Street")
        .text(120.0, 740.0, "PERTH WA 6000")
        .bold(40.0, 730.0, "Home Email:")
        .text(120.0, 730.0, "Jane.Citizen@Example.COM")
        .bold(40.0, 720.0, "Full Time Salary:")
        .text(120.0, 720.0, " $100,000.00")
        .bold(40.0, 710.0, "Period End Date:")
        .text(120.0, 710.0, "05-03-2024")
        .bold(40.0, 700.0, "Period Number:")
        .text(120.0, 700.0, "12")
        .bold(40.0, 690.0, "HSS Contact:")
        .text(120.0, 690.0, "Payroll Services")
        .bold(40.0, 680.0, "Telephone:")
        .text(120.0, 680.0, "08 6373 3000")
        .bold(40.0, 670.0, "COMMENTS")
        .text(40.0, 660.0, "Back pay")
        .text(90.0, 660.0, "included.");
}

fn earnings_header(page: &mut Page, title: &str, y: f64) {
    page.bold(40.0, y, title)
        .bold(40.0, y - 10.0, "Units")
        .bold(80.0, y - 10.0, "Rate")
        .bold(120.0, y - 10.0, "Description")
        .bold(300.0, y - 10.0, "Amount");
}

fn amount_section(page: &mut Page, title: &str, y: f64, desc: &str, amount: &str, ytd: &str) {
    page.bold(40.0, y, title)
        .bold(40.0, y - 10.0, "Description")
        .bold(300.0, y - 10.0, "Amount")
        .text(40.0, y - 20.0, desc)
        .text(280.0, y - 20.0, amount)
        .bold(40.0, y - 30.0, "Total")
        .bold(280.0, y - 30.0, amount)
        .bold(380.0, y - 30.0, ytd);
}

/// Page 1: header and summary tables. Taxed earnings total 5,000.00.
pub fn summary_page() -> Page {
    let mut page = Page::default();
    head(&mut page);

    earnings_header(&mut page, "1. TAXED EARNINGS", 620.0);
    page.text(35.0, 600.0, "76.00")
        .text(70.0, 600.0, "45.50")
        .text(120.0, 600.0, "ORD HRS")
        .text(280.0, 600.0, "3,458.00")
        .text(120.0, 590.0, "SHIFT PEN")
        .text(280.0, 590.0, "1,000.00")
        .text(120.0, 580.0, "ALW")
        .text(280.0, 580.0, "542.00")
        .bold(120.0, 570.0, "Total")
        .bold(280.0, 570.0, "5,000.00")
        .bold(380.0, 570.0, "60,000.00");

    earnings_header(&mut page, "2. UNTAXED EARNINGS", 550.0);
    page.text(120.0, 530.0, "MEAL ALW")
        .text(280.0, 530.0, "12.00")
        .bold(120.0, 520.0, "Total")
        .bold(280.0, 520.0, "12.00")
        .bold(380.0, 520.0, "144.00");

    amount_section(&mut page, "4. TAX", 500.0, "PAYG TAX", "1,500.00", "18,000.00");
    amount_section(&mut page, "5. DEDUCTIONS", 450.0, "UNION FEES", "50.00", "600.00");
    amount_section(&mut page, "6. SUPERANNUATION", 400.0, "SUPER GUARANTEE", "550.00", "6,600.00");

    page.bold(40.0, 350.0, "7. NET PAY")
        .bold(100.0, 340.0, "This Pay")
        .bold(300.0, 340.0, "Year to Date")
        .text(90.0, 330.0, "3,462.00")
        .text(280.0, 330.0, "41,544.00");

    page.bold(40.0, 310.0, "DISBURSEMENTS (BANKED)")
        .bold(40.0, 300.0, "Bank")
        .bold(160.0, 300.0, "Account")
        .bold(300.0, 300.0, "Amount")
        .text(40.0, 290.0, "CBA")
        .text(160.0, 290.0, "062000 12345678")
        .text(280.0, 290.0, "3,462.00");

    page.bold(40.0, 270.0, "LEAVE")
        .bold(40.0, 260.0, "Leave Type")
        .bold(200.0, 260.0, "Balance")
        .bold(300.0, 260.0, "Calculated")
        .text(40.0, 250.0, "Annual Leave")
        .text(180.0, 250.0, "152.00")
        .text(300.0, 250.0, "05-03-2024")
        .text(40.0, 240.0, "Personal Leave")
        .text(180.0, 240.0, "76.00")
        .text(300.0, 240.0, "05-03-2024")
        .text(40.0, 230.0, "Leave balances displayed are subject to audit");

    page
}

fn body_header(page: &mut Page, y: f64) {
    page.bold(40.0, y, "Date From")
        .bold(100.0, y, "Date To")
        .bold(160.0, y, "Description")
        .bold(350.0, y, "Units")
        .bold(420.0, y, "Rate")
        .bold(500.0, y, "Amount");
}

fn dated(page: &mut Page, y: f64) -> &mut Page {
    page.text(30.0, y, "19-02-2024").text(90.0, y, "03-03-2024")
}

/// Page 2: itemised earnings. The allowance line is `allowance` cents; the
/// page 1 summary expects 54,200.
pub fn body_page(allowance: i64) -> Page {
    let current_taxed = 345_800 + allowance;
    let mut page = Page::default();
    body_header(&mut page, 760.0);

    page.bold(40.0, 740.0, "PRIOR PERIOD TAXED EARNINGS");
    dated(&mut page, 730.0)
        .text(160.0, 730.0, "SHIFT PENALTY")
        .text(480.0, 730.0, "1,000.00")
        .bold(160.0, 720.0, "Total")
        .bold(480.0, 720.0, "1,000.00");

    page.bold(40.0, 700.0, "CURRENT PERIOD TAXED EARNINGS");
    dated(&mut page, 690.0)
        .text(160.0, 690.0, "ORDINARY HOURS")
        .text(340.0, 690.0, "76.00")
        .text(410.0, 690.0, "45.5000")
        .text(480.0, 690.0, "3,458.00")
        .text(160.0, 680.0, "DISTRICT ");
    dated(&mut page, 670.0)
        .text(160.0, 670.0, "ALLOWANCE")
        .text(480.0, 670.0, &money(allowance))
        .bold(160.0, 660.0, "Total")
        .bold(480.0, 660.0, &money(current_taxed))
        .bold(160.0, 640.0, "Total Taxable Earnings")
        .bold(480.0, 640.0, &money(100_000 + current_taxed));

    page.bold(40.0, 620.0, "PRIOR PERIOD UNTAXED EARNINGS")
        .bold(160.0, 610.0, "Total")
        .bold(480.0, 610.0, "0.00");

    page.bold(40.0, 590.0, "CURRENT PERIOD UNTAXED EARNINGS");
    dated(&mut page, 580.0)
        .text(160.0, 580.0, "MEAL ALLOWANCE")
        .text(480.0, 580.0, "12.00")
        .bold(160.0, 570.0, "Total")
        .bold(480.0, 570.0, "12.00")
        .bold(160.0, 550.0, "Total Untaxed Earnings")
        .bold(480.0, 550.0, "12.00");

    page
}

/// Content streams of a consistent two-page payslip.
pub fn consistent_pages() -> Vec<Vec<u8>> {
    vec![summary_page().stream(), body_page(54_200).stream()]
}

/// Wrap page streams in a minimal uncompressed PDF.
pub fn pdf(pages: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n".to_vec();
    for (i, stream) in pages.iter().enumerate() {
        out.extend_from_slice(
            format!("{} 0 obj\n<< /Length {} >>\nstream\n", i + 1, stream.len()).as_bytes(),
        );
        out.extend_from_slice(stream);
        out.extend_from_slice(b"endstream\nendobj\n");
    }
    out.extend_from_slice(b"%%EOF\n");
    out
}
