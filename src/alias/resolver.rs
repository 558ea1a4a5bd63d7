// File: ./src/alias/resolver.rs
use crate::alias::definition::{AliasDefinition, AliasValue, Sentinel, find_alias};
use crate::clock::Clock;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const END_OF_DAY: &str = "23:59";

/// A value produced by an alias, tagged with the alias that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasResolution {
    pub alias: String,
    pub resolved: Value,
}

/// On-record form of a resolution. The explicit `kind` tag keeps user data
/// that happens to have `alias`/`resolved` keys from being taken for one.
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum FieldWrapper {
    Wrapped(AliasResolution),
}

impl AliasResolution {
    pub fn new(alias: &str, resolved: impl Into<Value>) -> Self {
        Self {
            alias: alias.to_string(),
            resolved: resolved.into(),
        }
    }

    /// Encodes the resolution for storage on a record field.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(FieldWrapper::Wrapped(self.clone())).unwrap_or(Value::Null)
    }

    /// Reads a tagged wrapper back from a record field.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.get("kind").and_then(Value::as_str) != Some("wrapped") {
            return None;
        }
        match serde_json::from_value::<FieldWrapper>(value.clone()) {
            Ok(FieldWrapper::Wrapped(res)) => Some(res),
            Err(_) => None,
        }
    }

    pub fn is_wrapper(value: &Value) -> bool {
        Self::from_value(value).is_some()
    }
}

/// Outcome of resolving user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Input was empty or whitespace.
    Absent,
    /// Not an alias; the trimmed text as typed.
    Literal(String),
    Alias(AliasResolution),
}

impl Resolution {
    /// The value a record field should hold for this resolution.
    pub fn to_field_value(&self) -> Value {
        match self {
            Resolution::Absent => Value::Null,
            Resolution::Literal(s) => Value::String(s.clone()),
            Resolution::Alias(res) => res.to_value(),
        }
    }

    pub fn as_alias(&self) -> Option<&AliasResolution> {
        match self {
            Resolution::Alias(res) => Some(res),
            _ => None,
        }
    }
}

/// Resolves `input` against `aliases` at the clock's current time.
///
/// Lookup is case-insensitive; the returned alias is the definition's own
/// spelling, lowercased.
pub fn resolve_alias(input: &str, aliases: &[AliasDefinition], clock: &dyn Clock) -> Resolution {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Resolution::Absent;
    }

    let Some(def) = find_alias(aliases, trimmed) else {
        return Resolution::Literal(trimmed.to_string());
    };

    let resolved = resolve_value(&def.value, clock);
    log::debug!("alias '{}' resolved to {}", def.alias, resolved);

    Resolution::Alias(AliasResolution {
        alias: def.alias.to_lowercase(),
        resolved,
    })
}

fn resolve_value(value: &AliasValue, clock: &dyn Clock) -> Value {
    match value {
        AliasValue::Sentinel(Sentinel::Today) => {
            Value::String(clock.today().format(DATE_FORMAT).to_string())
        }
        AliasValue::Sentinel(Sentinel::Tomorrow) => {
            let date = clock.today() + Duration::days(1);
            Value::String(date.format(DATE_FORMAT).to_string())
        }
        AliasValue::Sentinel(Sentinel::Now) => {
            Value::String(clock.now().format(TIME_FORMAT).to_string())
        }
        AliasValue::Sentinel(Sentinel::Eod) => {
            let mut stamp = Map::new();
            stamp.insert("at".to_string(), Value::String(END_OF_DAY.to_string()));
            stamp.insert(
                "date".to_string(),
                Value::String(clock.today().format(DATE_FORMAT).to_string()),
            );
            Value::Object(stamp)
        }
        AliasValue::Literal(s) => Value::String(s.clone()),
    }
}
