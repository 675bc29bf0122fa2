//! JSON rendering for extracted payslips.
//!
//! Output is two-space indented like `serde_json::to_string_pretty`, except
//! that line items (objects with an `amount` or `calculated` key and only
//! scalar values) are written on one line each, so a table reads as one row
//! per line:
//!
//! ```text
//! "tax": [
//!   {"description": "PAYG TAX", "amount": 100000}
//! ],
//! ```

use std::fmt::Write;

use serde::Serialize;
use serde_json::{Map, Value};

const INDENT: &str = "  ";

/// Render `value` as indented JSON with one line per line item.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let value = serde_json::to_value(value)?;
    let mut out = String::new();
    write_block(&mut out, &value, 0);
    Ok(out)
}

fn is_line_item(map: &Map<String, Value>) -> bool {
    (map.contains_key("amount") || map.contains_key("calculated"))
        && map.values().all(|v| !v.is_object() && !v.is_array())
}

fn write_block(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Object(map) if !map.is_empty() && !is_line_item(map) => {
            out.push('{');
            for (i, (key, child)) in map.iter().enumerate() {
                out.push_str(if i == 0 { "\n" } else { ",\n" });
                push_indent(out, depth + 1);
                let _ = write!(out, "{}: ", Value::from(key.as_str()));
                write_block(out, child, depth + 1);
            }
            out.push('\n');
            push_indent(out, depth);
            out.push('}');
        }
        Value::Array(items) if !items.is_empty() => {
            out.push('[');
            for (i, child) in items.iter().enumerate() {
                out.push_str(if i == 0 { "\n" } else { ",\n" });
                push_indent(out, depth + 1);
                write_block(out, child, depth + 1);
            }
            out.push('\n');
            push_indent(out, depth);
            out.push(']');
        }
        _ => write_inline(out, value),
    }
}

/// Single-line form with `", "` and `": "` separators.
fn write_inline(out: &mut String, value: &Value) {
    match value {
        Value::Object(map) => {
            out.push('{');
            for (i, (key, child)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}: ", Value::from(key.as_str()));
                write_inline(out, child);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, child) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline(out, child);
            }
            out.push(']');
        }
        scalar => {
            let _ = write!(out, "{scalar}");
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
