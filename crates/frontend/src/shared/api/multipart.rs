//! Record to `FormData` projection for file-carrying submissions.
//!
//! PHP-style multipart conventions: booleans become `"1"` / `"0"`, nulls
//! become empty strings, array fields repeat under `key[]`, and an edited
//! resource is sent as POST with a `_method=PUT` override field because
//! multipart bodies are only parsed on POST.

use serde_json::{Map, Value};

pub const METHOD_FIELD: &str = "_method";
pub const METHOD_PUT: &str = "PUT";

/// Text form of one scalar value. Nested objects are rare in flat resource
/// records but survive as their JSON text rather than being dropped.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flattens a record into `(name, value)` text pairs, expanding arrays into
/// repeated `key[]` entries. Field order follows the record.
pub fn text_fields(record: &Map<String, Value>) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for (key, value) in record {
        match value {
            Value::Array(items) => {
                let name = format!("{key}[]");
                for item in items {
                    fields.push((name.clone(), scalar_text(item)));
                }
            }
            other => fields.push((key.clone(), scalar_text(other))),
        }
    }
    fields
}

/// Builds the multipart body: text fields from the record (skipping keys that
/// have a staged file, which replaces any stale text value), then the staged
/// files, then the method override for edits.
pub fn build_form_data(
    record: &Map<String, Value>,
    files: &std::collections::HashMap<String, web_sys::File>,
    method_override: Option<&str>,
) -> Result<web_sys::FormData, wasm_bindgen::JsValue> {
    let form = web_sys::FormData::new()?;
    for (name, value) in text_fields(record) {
        let key = name.strip_suffix("[]").unwrap_or(&name);
        if files.contains_key(key) {
            continue;
        }
        form.append_with_str(&name, &value)?;
    }
    for (key, file) in files {
        form.append_with_blob_and_filename(key, file, &file.name())?;
    }
    if let Some(method) = method_override {
        form.append_with_str(METHOD_FIELD, method)?;
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn scalars_follow_wire_conventions() {
        assert_eq!(scalar_text(&json!(null)), "");
        assert_eq!(scalar_text(&json!(true)), "1");
        assert_eq!(scalar_text(&json!(false)), "0");
        assert_eq!(scalar_text(&json!(7)), "7");
        assert_eq!(scalar_text(&json!("x")), "x");
    }

    #[test]
    fn arrays_expand_to_bracketed_keys() {
        let rec = record(json!({
            "name": "Paracetamol",
            "tags": ["otc", "analgesic"],
            "is_active": true,
            "description": null,
        }));
        let fields = text_fields(&rec);
        assert!(fields.contains(&("tags[]".to_string(), "otc".to_string())));
        assert!(fields.contains(&("tags[]".to_string(), "analgesic".to_string())));
        assert!(fields.contains(&("is_active".to_string(), "1".to_string())));
        assert!(fields.contains(&("description".to_string(), String::new())));
    }

    #[test]
    fn empty_array_contributes_no_fields() {
        let rec = record(json!({ "tags": [] }));
        assert!(text_fields(&rec).is_empty());
    }
}
