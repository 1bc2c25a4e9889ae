use serde_json::Value;

/// Resolve a dot-path like "address.city" against a JSON row.
///
/// Walks one object level per segment and short-circuits to None as soon as
/// an intermediate is missing or not an object. Filtering, sorting, and
/// default cell display all go through this single helper so a path means
/// the same thing everywhere.
pub fn resolve_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = row;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Extract the row's identifier as a string key.
///
/// Numbers are stringified, strings are used as-is. A row without the
/// identifier field yields an empty key; that is a caller contract
/// violation and duplicate empty keys will collapse in the selection set.
pub fn row_key(row: &Value, id_field: &str) -> String {
    match resolve_path(row, id_field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
