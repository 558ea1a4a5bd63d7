// File: ./src/template.rs
//! One-line `key:value` template format used by quick entry.
//!
//! A line looks like `title:Buy milk;due:2024-07-19;done:false`. The
//! separator is configurable and falls back to the stored preference, then
//! to `;`. Only the first colon of a segment is structural, so values may
//! contain colons (`at:23:59`).
use crate::prefs::{MemoryPreferences, SEPARATOR_KEY, SharedPreferences};
use crate::value::{Record, display_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub const DEFAULT_SEPARATOR: &str = ";";

/// Selects and orders the fields of a template line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// External (typed) name -> record field name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub aliases: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<String>,
}

impl FieldConfig {
    pub fn include(mut self, keys: &[&str]) -> Self {
        self.include = Some(keys.iter().map(|k| k.to_string()).collect());
        self
    }

    pub fn exclude(mut self, keys: &[&str]) -> Self {
        self.exclude = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn order(mut self, keys: &[&str]) -> Self {
        self.order = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn alias(mut self, external: &str, field: &str) -> Self {
        self.aliases.insert(external.to_string(), field.to_string());
        self
    }

    /// Applies include, then exclude, then order to `keys`.
    pub fn ordered_fields<I, S>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = keys.into_iter().map(Into::into).collect();

        if let Some(include) = &self.include {
            fields.retain(|f| include.contains(f));
        }
        fields.retain(|f| !self.exclude.contains(f));

        if self.order.is_empty() {
            return fields;
        }

        let mut ordered: Vec<String> = Vec::with_capacity(fields.len());
        for k in &self.order {
            if fields.contains(k) && !ordered.contains(k) {
                ordered.push(k.clone());
            }
        }
        for f in fields {
            if !ordered.contains(&f) {
                ordered.push(f);
            }
        }
        ordered
    }

    fn field_name<'a>(&'a self, raw_key: &'a str) -> &'a str {
        self.aliases.get(raw_key).map(String::as_str).unwrap_or(raw_key)
    }
}

/// Serializes records to template lines and back.
#[derive(Debug, Clone)]
pub struct TemplateProcessor {
    prefs: SharedPreferences,
}

impl Default for TemplateProcessor {
    fn default() -> Self {
        Self::new(Arc::new(MemoryPreferences::new()))
    }
}

impl TemplateProcessor {
    pub fn new(prefs: SharedPreferences) -> Self {
        Self { prefs }
    }

    /// Explicit separator, else the stored preference, else `;`. Empty
    /// values count as unset.
    pub fn separator(&self, explicit: Option<&str>) -> String {
        explicit
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.prefs.get(SEPARATOR_KEY).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string())
    }

    pub fn set_separator(&self, separator: &str) {
        self.prefs.set(SEPARATOR_KEY, separator);
    }

    pub fn reset_separator(&self) {
        self.prefs.remove(SEPARATOR_KEY);
    }

    pub fn object_to_text(
        &self,
        obj: &Record,
        config: &FieldConfig,
        separator: Option<&str>,
    ) -> String {
        let sep = self.separator(separator);
        config
            .ordered_fields(obj.keys().cloned())
            .iter()
            .map(|field| {
                let value = obj.get(field).map(display_value).unwrap_or_default();
                format!("{}:{}", field, value)
            })
            .collect::<Vec<_>>()
            .join(&sep)
    }

    /// Parses a template line. Segments without a colon or with an empty
    /// value are skipped; an empty key is kept as the field `""`. When
    /// nothing is recognized and `fallback` is given, its result is returned
    /// instead.
    pub fn text_to_object(
        &self,
        input: &str,
        config: &FieldConfig,
        separator: Option<&str>,
        fallback: Option<&dyn Fn(Record, &str) -> Record>,
    ) -> Record {
        let sep = self.separator(separator);
        let mut obj = Record::new();

        for part in input.split(sep.as_str()) {
            if part.is_empty() {
                continue;
            }
            let Some((raw_key, value)) = part.split_once(':') else {
                log::debug!("skipping template segment without a key: {:?}", part);
                continue;
            };
            let raw_key = raw_key.trim();
            if value.is_empty() {
                continue;
            }
            let field = config.field_name(raw_key);
            obj.insert(field.to_string(), coerce(value));
        }

        if obj.is_empty()
            && let Some(fallback) = fallback
        {
            return fallback(obj, input);
        }
        obj
    }

    /// Placeholder form of a record, e.g. `title:{title};due:{due}`.
    pub fn generate_template(
        &self,
        obj: &Record,
        config: &FieldConfig,
        separator: Option<&str>,
    ) -> String {
        let sep = self.separator(separator);
        config
            .ordered_fields(obj.keys().cloned())
            .iter()
            .map(|field| format!("{}:{{{}}}", field, field))
            .collect::<Vec<_>>()
            .join(&sep)
    }
}

// Only booleans are recognized; numbers stay strings for the caller to interpret.
fn coerce(value: &str) -> Value {
    if value.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if value.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn include_exclude_then_order() {
        let cfg = FieldConfig::default()
            .include(&["a", "b", "c", "d"])
            .exclude(&["b"])
            .order(&["d", "zz", "a"]);
        let fields = cfg.ordered_fields(["e", "a", "b", "c", "d"]);
        assert_eq!(fields, vec!["d", "a", "c"]);
    }

    #[test]
    fn empty_include_keeps_nothing() {
        let cfg = FieldConfig {
            include: Some(vec![]),
            ..Default::default()
        };
        assert!(cfg.ordered_fields(["a", "b"]).is_empty());
    }

    #[test]
    fn empty_separator_preference_is_ignored() {
        let tp = TemplateProcessor::new(Arc::new(MemoryPreferences::with(SEPARATOR_KEY, "")));
        assert_eq!(tp.separator(None), ";");
        assert_eq!(tp.separator(Some("")), ";");
        assert_eq!(tp.separator(Some("|")), "|");
    }

    #[test]
    fn serializes_nulls_as_empty() {
        let tp = TemplateProcessor::default();
        let obj = record(json!({"title": "x", "note": null, "tags": ["a", "b"]}));
        assert_eq!(
            tp.object_to_text(&obj, &FieldConfig::default(), None),
            "title:x;note:;tags:a,b"
        );
    }

    #[test]
    fn empty_key_is_assigned_and_suppresses_fallback() {
        let tp = TemplateProcessor::default();
        let as_title = |mut obj: Record, input: &str| -> Record {
            obj.insert("title".into(), json!(input));
            obj
        };
        let parsed = tp.text_to_object(":odd", &FieldConfig::default(), None, Some(&as_title));
        assert_eq!(parsed, record(json!({"": "odd"})));
    }

    #[test]
    fn coercion_is_boolean_only() {
        assert_eq!(coerce("TRUE"), json!(true));
        assert_eq!(coerce("False"), json!(false));
        assert_eq!(coerce("42"), json!("42"));
        assert_eq!(coerce("truthy"), json!("truthy"));
    }

    #[test]
    fn template_lists_placeholders() {
        let tp = TemplateProcessor::default();
        let obj = record(json!({"title": "x", "due": "y", "id": 3}));
        let cfg = FieldConfig::default().exclude(&["id"]);
        assert_eq!(tp.generate_template(&obj, &cfg, Some(" | ")), "title:{title} | due:{due}");
    }
}
