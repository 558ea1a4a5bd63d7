// File: ./src/fields.rs
//! Selecting and partitioning record fields.
use crate::value::{Record, is_truthy};
use serde_json::Value;

/// Copies the listed keys that hold a meaningful value.
///
/// Falsy values (`null`, `false`, `0`, `""`) are dropped along with missing
/// keys. Use [`split_fields`] when present-but-empty values must survive.
pub fn extract_fields(obj: &Record, keys: &[&str]) -> Record {
    let mut out = Record::new();
    for key in keys {
        if let Some(value) = obj.get(*key)
            && is_truthy(value)
        {
            out.insert((*key).to_string(), value.clone());
        }
    }
    out
}

/// The two halves produced by [`split_fields`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitFields {
    pub selected: Record,
    pub others: Record,
}

/// Output key names for [`SplitFields::into_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitNames {
    pub selected: String,
    pub others: String,
}

impl Default for SplitNames {
    fn default() -> Self {
        Self {
            selected: "selected".to_string(),
            others: "others".to_string(),
        }
    }
}

impl SplitNames {
    pub fn new(selected: &str, others: &str) -> Self {
        Self {
            selected: selected.to_string(),
            others: others.to_string(),
        }
    }
}

impl SplitFields {
    pub fn into_record(self, names: &SplitNames) -> Record {
        let mut out = Record::new();
        out.insert(names.selected.clone(), Value::Object(self.selected));
        out.insert(names.others.clone(), Value::Object(self.others));
        out
    }
}

/// Partitions `obj` into the listed keys that exist (values kept as-is,
/// null included) and everything else. Both halves keep `obj`'s key order.
pub fn split_fields(obj: &Record, selected_keys: &[&str]) -> SplitFields {
    let mut split = SplitFields::default();
    for (key, value) in obj {
        if selected_keys.contains(&key.as_str()) {
            split.selected.insert(key.clone(), value.clone());
        } else {
            split.others.insert(key.clone(), value.clone());
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn extract_drops_falsy_values() {
        let obj = record(json!({
            "id": 1,
            "name": null,
            "done": false,
            "count": 0,
            "email": "x",
            "tag": ""
        }));
        let out = extract_fields(&obj, &["id", "name", "done", "count", "email", "tag", "nope"]);
        assert_eq!(out, record(json!({"id": 1, "email": "x"})));
    }

    #[test]
    fn split_keeps_nulls_and_partitions() {
        let obj = record(json!({"id": 1, "name": null, "email": "x", "extra": true}));
        let split = split_fields(&obj, &["id", "name", "email", "absent"]);
        assert_eq!(split.selected, record(json!({"id": 1, "name": null, "email": "x"})));
        assert_eq!(split.others, record(json!({"extra": true})));
        // source untouched
        assert_eq!(obj.len(), 4);
    }

    #[test]
    fn split_names_can_be_renamed() {
        let obj = record(json!({"title": "a", "color": "red"}));
        let out = split_fields(&obj, &["title"]).into_record(&SplitNames::new("data", "style"));
        assert_eq!(out, record(json!({"data": {"title": "a"}, "style": {"color": "red"}})));

        let default = split_fields(&obj, &[]).into_record(&SplitNames::default());
        assert_eq!(default["selected"], json!({}));
        assert_eq!(default["others"], json!({"title": "a", "color": "red"}));
    }
}
