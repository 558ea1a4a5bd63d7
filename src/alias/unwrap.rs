// File: ./src/alias/unwrap.rs
use crate::alias::resolver::AliasResolution;
use crate::value::{Record, display_value};
use serde_json::Value;
use std::fmt;

type PayloadResolver = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// A record field to flatten, with optional custom logic for structured
/// payloads such as `{at, date}`.
pub struct UnwrapField {
    pub field: String,
    resolver: Option<PayloadResolver>,
}

impl UnwrapField {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            resolver: None,
        }
    }

    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.resolver = Some(Box::new(resolver));
        self
    }

    fn flatten(&self, payload: &Value) -> Value {
        match payload {
            Value::Object(_) | Value::Array(_) => match &self.resolver {
                Some(resolve) => resolve(payload),
                None => Value::String(join_values(payload)),
            },
            other => other.clone(),
        }
    }
}

impl fmt::Debug for UnwrapField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnwrapField")
            .field("field", &self.field)
            .field("custom_resolver", &self.resolver.is_some())
            .finish()
    }
}

impl From<&str> for UnwrapField {
    fn from(field: &str) -> Self {
        UnwrapField::new(field)
    }
}

/// Space-joined stringified values, in the payload's own key order.
fn join_values(payload: &Value) -> String {
    let parts: Vec<String> = match payload {
        Value::Object(map) => map.values().map(display_value).collect(),
        Value::Array(items) => items.iter().map(display_value).collect(),
        other => vec![display_value(other)],
    };
    parts.join(" ")
}

/// Returns a copy of `input` with the listed alias-wrapped fields replaced
/// by their plain values. Anything else is copied through unchanged.
pub fn unwrap_alias(input: &Record, fields: &[UnwrapField]) -> Record {
    let mut out = input.clone();
    for spec in fields {
        let Some(current) = out.get(&spec.field) else {
            continue;
        };
        if let Some(wrapped) = AliasResolution::from_value(current) {
            let flat = spec.flatten(&wrapped.resolved);
            out.insert(spec.field.clone(), flat);
        }
    }
    out
}
