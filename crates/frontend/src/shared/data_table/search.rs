//! Client-side refinement search over already-fetched rows.

use serde_json::Value;

/// Case-insensitive containment check over every scalar reachable in the
/// value. Numbers and booleans are matched by their textual form.
pub fn deep_search(value: &Value, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    matches_lower(value, &needle)
}

fn matches_lower(value: &Value, needle: &str) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Number(n) => n.to_string().contains(needle),
        Value::Bool(b) => b.to_string().contains(needle),
        Value::Array(items) => items.iter().any(|item| matches_lower(item, needle)),
        Value::Object(map) => map.values().any(|item| matches_lower(item, needle)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_nested_strings_case_insensitively() {
        let row = json!({
            "name": "Paracetamol",
            "meta": { "tags": ["Analgesic", "OTC"] },
        });
        assert!(deep_search(&row, "paraceta"));
        assert!(deep_search(&row, "otc"));
        assert!(!deep_search(&row, "ibuprofen"));
    }

    #[test]
    fn matches_numbers_by_text() {
        let row = json!({ "stock": 1250 });
        assert!(deep_search(&row, "125"));
        assert!(!deep_search(&row, "999"));
    }

    #[test]
    fn empty_term_matches_everything() {
        assert!(deep_search(&json!({}), ""));
    }
}
