// File: tests/template_roundtrip.rs
// Line format: serialization, parsing and round trips.
use notedo::Record;
use notedo::prefs::{MemoryPreferences, SEPARATOR_KEY};
use notedo::template::{FieldConfig, TemplateProcessor};
use serde_json::{Value, json};
use std::sync::Arc;

fn record(v: Value) -> Record {
    v.as_object().cloned().expect("object")
}

/// Fields that should survive a round trip, in their expected parsed form.
fn expected_after_roundtrip(r: &Record, config: &FieldConfig) -> Record {
    let mut out = Record::new();
    for field in config.ordered_fields(r.keys().cloned()) {
        match &r[&field] {
            Value::Null => {}
            Value::String(s) if s.is_empty() => {}
            Value::Bool(b) => {
                out.insert(field, Value::Bool(*b));
            }
            other => {
                out.insert(field, Value::String(notedo::value::display_value(other)));
            }
        }
    }
    out
}

#[test]
fn test_roundtrip_recovers_meaningful_fields() {
    let tp = TemplateProcessor::default();
    let r = record(json!({
        "title": "Buy milk",
        "due": "2024-07-19",
        "done": false,
        "pinned": true,
        "count": 3,
        "note": "",
        "color": null,
    }));

    let configs = [
        FieldConfig::default(),
        FieldConfig::default().exclude(&["count"]),
        FieldConfig::default().include(&["title", "done", "count"]),
        FieldConfig::default().order(&["done", "title"]),
    ];
    for sep in [";", "|", " :: ", "\t"] {
        for cfg in &configs {
            let line = tp.object_to_text(&r, cfg, Some(sep));
            let parsed = tp.text_to_object(&line, cfg, Some(sep), None);
            assert_eq!(
                parsed,
                expected_after_roundtrip(&r, cfg),
                "line {:?} with sep {:?}",
                line,
                sep
            );
        }
    }
}

#[test]
fn test_value_colons_belong_to_value() {
    let tp = TemplateProcessor::default();
    let cfg = FieldConfig::default();
    let parsed = tp.text_to_object("at:23:59;url:https://x.org/a:b", &cfg, None, None);
    assert_eq!(parsed["at"], json!("23:59"));
    assert_eq!(parsed["url"], json!("https://x.org/a:b"));
}

#[test]
fn test_malformed_segments_are_skipped() {
    let tp = TemplateProcessor::default();
    let parsed = tp.text_to_object(
        ";;title:ok;garbage; note : kept ;empty:;:",
        &FieldConfig::default(),
        None,
        None,
    );
    assert_eq!(parsed, record(json!({"title": "ok", "note": " kept "})));
}

#[test]
fn test_field_name_aliases_map_to_internal_names() {
    let tp = TemplateProcessor::default();
    let cfg = FieldConfig::default().alias("t", "title").alias("d", "due");
    let parsed = tp.text_to_object("t:Call mom;d:tmr;x:1", &cfg, None, None);
    assert_eq!(parsed, record(json!({"title": "Call mom", "due": "tmr", "x": "1"})));
}

#[test]
fn test_no_numeric_coercion() {
    let tp = TemplateProcessor::default();
    let parsed = tp.text_to_object("n:42;f:1.5;b:TRUE", &FieldConfig::default(), None, None);
    assert_eq!(parsed["n"], json!("42"));
    assert_eq!(parsed["f"], json!("1.5"));
    assert_eq!(parsed["b"], json!(true));
}

#[test]
fn test_fallback_only_when_nothing_parsed() {
    let tp = TemplateProcessor::default();
    let as_title = |mut obj: Record, input: &str| -> Record {
        obj.insert("title".into(), json!(input));
        obj
    };

    let cfg = FieldConfig::default();
    let freeform = tp.text_to_object("Water the plants", &cfg, None, Some(&as_title));
    assert_eq!(freeform, record(json!({"title": "Water the plants"})));

    let structured = tp.text_to_object("note:x", &cfg, None, Some(&as_title));
    assert_eq!(structured, record(json!({"note": "x"})));

    let nothing = tp.text_to_object("Water the plants", &FieldConfig::default(), None, None);
    assert!(nothing.is_empty());
}

#[test]
fn test_separator_preference_is_used() {
    let prefs = Arc::new(MemoryPreferences::with(SEPARATOR_KEY, "|"));
    let tp = TemplateProcessor::new(prefs.clone());
    let r = record(json!({"title": "a;b", "done": true}));

    let line = tp.object_to_text(&r, &FieldConfig::default(), None);
    assert_eq!(line, "title:a;b|done:true");
    assert_eq!(tp.text_to_object(&line, &FieldConfig::default(), None, None), r);

    // explicit argument wins over the preference
    assert_eq!(tp.object_to_text(&r, &FieldConfig::default(), Some("/")), "title:a;b/done:true");

    tp.reset_separator();
    assert_eq!(tp.object_to_text(&r, &FieldConfig::default(), None), "title:a;b;done:true");
}

#[test]
fn test_lossy_containers() {
    let tp = TemplateProcessor::default();
    let r = record(json!({"tags": ["home", "garden"], "meta": {"k": 1}}));
    let line = tp.object_to_text(&r, &FieldConfig::default(), None);
    assert_eq!(line, "tags:home,garden;meta:[object Object]");
}

#[test]
fn test_generate_template_ignores_values() {
    let tp = TemplateProcessor::default();
    let r = record(json!({"id": 9, "title": null, "due": "x"}));
    let cfg = FieldConfig::default().exclude(&["id"]).order(&["due"]);
    assert_eq!(tp.generate_template(&r, &cfg, None), "due:{due};title:{title}");
}
