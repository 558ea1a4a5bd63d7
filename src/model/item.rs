// File: ./src/model/item.rs
use crate::value::{Record, display_value, is_truthy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

fn default_uid() -> String {
    Uuid::new_v4().to_string()
}

const TEXT_FIELDS: [&str; 5] = ["id", "title", "due", "remind", "note"];

/// A todo item as stored. Dates and times are plain strings
/// (`YYYY-MM-DD`, `HH:MM`) once aliases have been flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "default_uid")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub remind: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub note: Option<String>,
}

impl Default for Task {
    fn default() -> Self {
        Self::new("")
    }
}

impl Task {
    pub fn new(title: &str) -> Self {
        Self {
            id: default_uid(),
            title: title.to_string(),
            due: None,
            remind: None,
            done: false,
            note: None,
        }
    }

    /// All fields in declaration order, unset ones as null.
    pub fn to_record(&self) -> Record {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Record::new(),
        }
    }

    /// Builds a task from a parsed record. Text fields that arrived as other
    /// scalar types (e.g. `title:true`) are turned back into text, and a null
    /// `id` is replaced by a fresh one.
    pub fn from_record(record: &Record) -> Result<Self> {
        let mut normalized = record.clone();
        if normalized.get("id").is_some_and(Value::is_null) {
            normalized.remove("id");
        }
        for field in TEXT_FIELDS {
            if let Some(v) = normalized.get_mut(field)
                && !v.is_string()
                && !v.is_null()
            {
                *v = Value::String(display_value(v));
            }
        }
        if let Some(done) = normalized.get_mut("done")
            && !done.is_boolean()
        {
            let flag = match done.as_str() {
                Some(s) => s.eq_ignore_ascii_case("true"),
                None => is_truthy(done),
            };
            *done = Value::Bool(flag);
        }
        serde_json::from_value(Value::Object(normalized)).context("Record is not a valid task")
    }
}
