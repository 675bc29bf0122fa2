//! Content stream tokenizer.
//!
//! Splits the raw bytes of one page's content stream into the three token
//! kinds the positioner cares about: font selectors, numeric operands and
//! string literals. Everything else (operators, names, arrays, comments) is
//! recognised only far enough to be skipped.
//!
//! Tokenizing never fails. A literal left open at the end of the stream is
//! still returned, and unescaping it later reports the damage.

use super::types::Token;

/// Tokenize a page content stream.
pub fn tokenize(stream: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < stream.len() {
        match stream[pos] {
            b'(' => {
                let (literal, next) = read_literal(stream, pos + 1);
                tokens.push(Token::Literal(literal.to_vec()));
                pos = next;
            }
            b'%' => {
                pos = skip_comment(stream, pos);
            }
            b'[' | b']' => {
                pos += 1;
            }
            c if c.is_ascii_whitespace() => {
                pos += 1;
            }
            _ => {
                let start = pos;
                while pos < stream.len() && !is_delimiter(stream[pos]) {
                    pos += 1;
                }
                if let Some(token) = classify_word(&stream[start..pos]) {
                    tokens.push(token);
                }
            }
        }
    }

    tokens
}

/// Bytes that end a bare word.
fn is_delimiter(c: u8) -> bool {
    c.is_ascii_whitespace() || matches!(c, b'(' | b'[' | b']' | b'%')
}

/// Read a literal body starting just after its opening parenthesis.
///
/// Returns the body (without the closing parenthesis) and the position
/// after the literal. Backslash escapes the next byte, so `\)` does not
/// terminate; unescaped parentheses must balance.
fn read_literal(stream: &[u8], start: usize) -> (&[u8], usize) {
    let mut depth = 1usize;
    let mut pos = start;

    while pos < stream.len() {
        match stream[pos] {
            b'\\' => pos += 2,
            b'(' => {
                depth += 1;
                pos += 1;
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return (&stream[start..pos], pos + 1);
                }
                pos += 1;
            }
            _ => pos += 1,
        }
    }

    // Unterminated: hand back the rest of the stream.
    (&stream[start..], stream.len())
}

fn skip_comment(stream: &[u8], mut pos: usize) -> usize {
    while pos < stream.len() && stream[pos] != b'\n' && stream[pos] != b'\r' {
        pos += 1;
    }
    pos
}

fn classify_word(word: &[u8]) -> Option<Token> {
    if word.starts_with(b"/F") {
        return Some(Token::Font(String::from_utf8_lossy(word).into_owned()));
    }
    if word.first().is_some_and(u8::is_ascii_digit) {
        return std::str::from_utf8(word)
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .map(Token::Number);
    }
    None
}
