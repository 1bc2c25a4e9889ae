use serde_json::Value;
use std::cmp::Ordering;

/// String form of a cell used for searching.
///
/// Null stringifies to "null" so a literal search can still find it;
/// compound values fall back to their compact JSON form.
pub fn search_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::from("null"),
        other => other.to_string(),
    }
}

/// String form of a cell used for display. Nulls render empty.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Whether a resolved cell counts as missing for sort purposes.
pub fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Compare two non-null cell values.
///
/// Centralizes comparison so every caller ranks values identically:
/// numbers compare numerically (integers and floats cross-compare),
/// strings compare case-insensitively with raw ordering as tie-break,
/// booleans false < true. Cross-type pairs use a fixed type order
/// Bool < Number < String < compound, so mixed columns still produce a
/// total, deterministic order.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => compare_strings(x, y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),

        (Value::Bool(_), Value::Number(_)) => Ordering::Less,
        (Value::Bool(_), Value::String(_)) => Ordering::Less,
        (Value::Number(_), Value::Bool(_)) => Ordering::Greater,
        (Value::Number(_), Value::String(_)) => Ordering::Less,
        (Value::String(_), Value::Bool(_)) => Ordering::Greater,
        (Value::String(_), Value::Number(_)) => Ordering::Greater,

        // Arrays/objects rank after scalars and compare by string form
        (x, y) => {
            let xs = x.is_array() || x.is_object();
            let ys = y.is_array() || y.is_object();
            match (xs, ys) {
                (true, true) => x.to_string().cmp(&y.to_string()),
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => Ordering::Equal,
            }
        }
    }
}

/// Case-insensitive string ordering with raw ordering as tie-break.
fn compare_strings(a: &str, b: &str) -> Ordering {
    match a.to_lowercase().cmp(&b.to_lowercase()) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}
