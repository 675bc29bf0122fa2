//! Text positioner.
//!
//! Folds the token stream into positioned runs. The payslip generator
//! always places text with a pair of numeric operands right before the
//! string, so position tracking is a two-slot shift register over the
//! numbers seen: each new number pushes the previous one into `y`.
//!
//! Literal text is unescaped per the PDF string rules and decoded as
//! windows-1252. Documents in any other encoding decode silently wrong.

use encoding_rs::WINDOWS_1252;

use super::types::{PositionedRun, Token};
use crate::error::{ExtractError, Result};

/// Interpreter registers threaded through the token fold.
#[derive(Debug, Default)]
struct TextState {
    font: Option<String>,
    x: f64,
    y: f64,
}

impl TextState {
    fn shift(&mut self, value: f64) {
        self.x = self.y;
        self.y = value;
    }
}

/// Turn tokens into positioned runs.
///
/// A run is bold when the current font equals `bold_font`.
pub fn position_runs(tokens: &[Token], bold_font: &str) -> Result<Vec<PositionedRun>> {
    let mut state = TextState::default();
    let mut runs = Vec::new();

    for token in tokens {
        match token {
            Token::Font(name) => state.font = Some(name.clone()),
            Token::Number(value) => state.shift(*value),
            Token::Literal(raw) => {
                let bytes = unescape(raw)?;
                runs.push(PositionedRun {
                    text: decode_western(&bytes),
                    x: state.x,
                    y: state.y,
                    bold: state.font.as_deref() == Some(bold_font),
                });
            }
        }
    }

    Ok(runs)
}

/// Resolve backslash escapes in a literal body.
///
/// Handles `\n \r \t \b \f \( \) \\`, line continuations (backslash before
/// an end-of-line, which is dropped along with the EOL) and octal codes of
/// up to three digits. Any other escaped byte stands for itself.
pub fn unescape(raw: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter().copied().peekable();

    while let Some(c) = bytes.next() {
        if c != b'\\' {
            out.push(c);
            continue;
        }

        let escaped = bytes.next().ok_or_else(|| bad_escape(raw, "trailing backslash"))?;
        match escaped {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'0'..=b'7' => {
                let mut value = u32::from(escaped - b'0');
                for _ in 0..2 {
                    match bytes.peek() {
                        Some(&d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            bytes.next();
                        }
                        Some(_) => break,
                        None => return Err(bad_escape(raw, "truncated octal code")),
                    }
                }
                // High-order overflow is ignored.
                out.push((value & 0xFF) as u8);
            }
            b'\r' => {
                if bytes.peek() == Some(&b'\n') {
                    bytes.next();
                }
            }
            b'\n' => {}
            other => out.push(other),
        }
    }

    Ok(out)
}

fn bad_escape(raw: &[u8], reason: &'static str) -> ExtractError {
    ExtractError::BadEscape {
        literal: String::from_utf8_lossy(raw).into_owned(),
        reason,
    }
}

/// Decode single-byte Western text.
pub fn decode_western(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}
