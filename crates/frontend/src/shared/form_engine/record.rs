//! Pure dirty-state model for resource forms.
//!
//! A form holds two JSON records: the pristine snapshot (as fetched or last
//! saved) and the working copy the inputs mutate. Dirtiness is structural
//! equality per field, recomputed from scratch on every change; a staged
//! file marks its field dirty regardless of the text value.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub type FormRecord = Map<String, Value>;

/// Structural equality: object key order is irrelevant, array order is
/// significant. Numbers compare by `serde_json::Number` equality.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| deep_equal(value, other)))
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (a, b) => a == b,
    }
}

/// Per-field dirty flags over the union of pristine and working keys.
/// `staged` lists the fields with a file picked but not yet uploaded.
pub fn dirty_map<'a>(
    pristine: &FormRecord,
    working: &FormRecord,
    staged: impl Iterator<Item = &'a str>,
) -> BTreeMap<String, bool> {
    let mut dirty = BTreeMap::new();
    for key in pristine.keys().chain(working.keys()) {
        if dirty.contains_key(key) {
            continue;
        }
        let flag = match (pristine.get(key), working.get(key)) {
            (Some(a), Some(b)) => !deep_equal(a, b),
            (None, Some(value)) | (Some(value), None) => !matches!(value, Value::Null),
            (None, None) => false,
        };
        dirty.insert(key.clone(), flag);
    }
    for key in staged {
        dirty.insert(key.to_string(), true);
    }
    dirty
}

pub fn is_dirty(dirty: &BTreeMap<String, bool>) -> bool {
    dirty.values().any(|flag| *flag)
}

/// JSON submission body: the working record with null fields omitted, so
/// absent optionals are not sent as explicit nulls.
pub fn json_payload(working: &FormRecord) -> Value {
    let filtered: FormRecord = working
        .iter()
        .filter(|(_, value)| !matches!(value, Value::Null))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Value::Object(filtered)
}

/// Projects any serializable DTO into a form record.
pub fn record_from<T: serde::Serialize>(value: &T) -> FormRecord {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => FormRecord::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> FormRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn deep_equal_ignores_object_key_order() {
        let a = json!({ "x": 1, "y": { "b": 2, "a": 1 } });
        let b = json!({ "y": { "a": 1, "b": 2 }, "x": 1 });
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn deep_equal_respects_array_order() {
        assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(deep_equal(&json!([1, 2]), &json!([1, 2])));
    }

    #[test]
    fn clean_form_has_no_dirty_fields() {
        let pristine = record(json!({ "name": "Aspirin", "tags": ["otc"] }));
        let dirty = dirty_map(&pristine, &pristine.clone(), std::iter::empty());
        assert!(!is_dirty(&dirty));
    }

    #[test]
    fn edited_field_is_flagged_and_reverting_clears_it() {
        let pristine = record(json!({ "name": "Aspirin" }));
        let mut working = pristine.clone();
        working.insert("name".into(), json!("Ibuprofen"));
        let dirty = dirty_map(&pristine, &working, std::iter::empty());
        assert_eq!(dirty["name"], true);

        working.insert("name".into(), json!("Aspirin"));
        let dirty = dirty_map(&pristine, &working, std::iter::empty());
        assert!(!is_dirty(&dirty));
    }

    #[test]
    fn staged_file_forces_its_field_dirty() {
        let pristine = record(json!({ "image": "old.png" }));
        let dirty = dirty_map(&pristine, &pristine.clone(), ["image"].into_iter());
        assert_eq!(dirty["image"], true);
        assert!(is_dirty(&dirty));
    }

    #[test]
    fn added_null_field_stays_clean() {
        let pristine = record(json!({ "name": "Aspirin" }));
        let mut working = pristine.clone();
        working.insert("description".into(), Value::Null);
        let dirty = dirty_map(&pristine, &working, std::iter::empty());
        assert!(!is_dirty(&dirty));
    }

    #[test]
    fn json_payload_omits_nulls() {
        let working = record(json!({ "name": "Aspirin", "description": null }));
        let payload = json_payload(&working);
        assert_eq!(payload, json!({ "name": "Aspirin" }));
    }
}
