use serde_json::Value;

/// Render a field of a server record as a single table cell.
///
/// Nested objects such as `public_ip` or `volumes` collapse to
/// `key=value` pairs; null members are left out.
pub fn value_to_short_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(value_to_short_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(obj) => obj
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| match v {
                Value::Object(_) => format!("{}=({})", k, value_to_short_string(v)),
                _ => format!("{}={}", k, value_to_short_string(v)),
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}
