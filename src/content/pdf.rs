//! Page content streams from a PDF file.
//!
//! This is not a PDF parser. The payslips are written by one generator
//! that emits one uncompressed content stream per page, in page order, so
//! the bytes between each `stream` and `endstream` keyword line are enough.
//! Compressed, encrypted or object-stream PDFs are out of reach.

use std::sync::LazyLock;

use regex::bytes::Regex;

static STREAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms-u)^stream\r?\n(.*?)^endstream").unwrap());

/// Magic bytes every PDF starts with.
pub const PDF_MAGIC: &[u8] = b"%PDF";

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Return the raw bytes of every stream in file order, one per page.
pub fn page_streams(pdf: &[u8]) -> Vec<&[u8]> {
    let streams: Vec<&[u8]> = STREAM
        .captures_iter(pdf)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_bytes())
        .collect();
    tracing::debug!(pages = streams.len(), "found page streams");
    streams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_each_stream_body() {
        let pdf = b"%PDF-1.4\n1 0 obj\n<< /Length 9 >>\nstream\n(A) Tj\nendstream\nendobj\n\
                    2 0 obj\n<< >>\nstream\r\n(B) Tj\nendstream\nendobj\n";
        let streams = page_streams(pdf);
        assert_eq!(streams, vec![&b"(A) Tj\n"[..], &b"(B) Tj\n"[..]]);
    }

    #[test]
    fn keyword_must_start_a_line() {
        let pdf = b"%PDF-1.4\n(not a stream keyword) endstream\n";
        assert!(page_streams(pdf).is_empty());
    }

    #[test]
    fn magic_check() {
        assert!(is_pdf(b"%PDF-1.7\n"));
        assert!(!is_pdf(b"<html>"));
    }
}
