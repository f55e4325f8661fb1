//! Field projection: copy a fixed set of keys out of a record.
//!
//! Projection never fails. A key the source lacks is still written to the
//! result, as `null`, so every exported object has the same shape no matter
//! what the host populated. The source is only borrowed; values are cloned
//! into a fresh record.

use crate::schema::{PostField, Record};
use serde_json::Value;

/// Project `source` onto `keys`, in `keys` order.
pub fn project<K: AsRef<str>>(source: &Record, keys: &[K]) -> Record {
    keys.iter()
        .map(|key| {
            let key = key.as_ref();
            let value = source.get(key).cloned().unwrap_or(Value::Null);
            (key.to_string(), value)
        })
        .collect()
}

/// Project `source` onto a schema field list.
pub fn project_fields(source: &Record, fields: &[PostField]) -> Record {
    let keys: Vec<&str> = fields.iter().map(|f| f.key()).collect();
    project(source, keys.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SUMMARY_FIELDS;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn copies_present_keys() {
        let source = record(json!({"title": "Hello", "path": "hello/", "tags": ["a"]}));
        let projected = project(&source, &["title", "path"]);
        assert_eq!(Value::Object(projected), json!({"title": "Hello", "path": "hello/"}));
    }

    #[test]
    fn missing_keys_become_null() {
        let source = record(json!({"title": "Hello"}));
        let projected = project(&source, &["title", "excerpt"]);
        assert_eq!(projected.get("excerpt"), Some(&Value::Null));
        assert_eq!(projected.len(), 2);
    }

    #[test]
    fn result_follows_key_order() {
        let source = record(json!({"b": 2, "a": 1}));
        let projected = project(&source, &["a", "b"]);
        let keys: Vec<&str> = projected.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn projection_is_idempotent() {
        let source = record(json!({"title": "T", "content": "<p>x</p>", "photos": []}));
        let once = project_fields(&source, &SUMMARY_FIELDS);
        let twice = project_fields(&once, &SUMMARY_FIELDS);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_source_yields_all_null_fields() {
        let projected = project_fields(&Record::new(), &SUMMARY_FIELDS);
        assert_eq!(projected.len(), SUMMARY_FIELDS.len());
        assert!(projected.values().all(Value::is_null));
    }

    #[test]
    fn source_is_left_untouched() {
        let source = record(json!({"title": "T"}));
        let before = source.clone();
        let _ = project(&source, &["title", "date"]);
        assert_eq!(source, before);
    }
}
