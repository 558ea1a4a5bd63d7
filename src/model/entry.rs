// File: ./src/model/entry.rs
//! Quick entry: one template line in, one stored task out.
//!
//! The line is parsed into a record, configured fields are run through
//! alias resolution (keeping provenance), and the record is flattened before
//! it becomes a [`Task`]. Records that still carry wrappers can be checked
//! for staleness with [`QuickEntry::review`].
use crate::alias::{
    AliasResolution, AliasValidationResult, Resolution, UnwrapField, resolve_alias,
    unwrap_alias, validate_alias,
};
use crate::clock::Clock;
use crate::config::Config;
use crate::fields::{extract_fields, split_fields};
use crate::model::item::Task;
use crate::template::TemplateProcessor;
use crate::value::Record;
use anyhow::Result;
use serde_json::Value;

pub struct QuickEntry<'a> {
    config: &'a Config,
    clock: &'a dyn Clock,
    templates: &'a TemplateProcessor,
}

impl<'a> QuickEntry<'a> {
    pub fn new(config: &'a Config, clock: &'a dyn Clock, templates: &'a TemplateProcessor) -> Self {
        Self {
            config,
            clock,
            templates,
        }
    }

    /// Parses a line into a record whose alias fields hold wrapped
    /// resolutions. A line with no `key:value` pairs becomes the title.
    pub fn parse(&self, line: &str, separator: Option<&str>) -> Record {
        let as_title = |mut obj: Record, input: &str| -> Record {
            let title = input.trim();
            if !title.is_empty() {
                obj.insert("title".to_string(), Value::String(title.to_string()));
            }
            obj
        };
        let mut record =
            self.templates
                .text_to_object(line, &self.config.template, separator, Some(&as_title));

        for field in &self.config.alias_fields {
            let Some(text) = record.get(field).and_then(Value::as_str) else {
                continue;
            };
            match resolve_alias(text, self.config.active_aliases(), self.clock) {
                Resolution::Absent => {
                    record.remove(field);
                }
                resolution => {
                    record.insert(field.clone(), resolution.to_field_value());
                }
            }
        }
        record
    }

    /// Validation results for every wrapped alias field, in record order.
    pub fn review(&self, record: &Record) -> Vec<(String, AliasValidationResult)> {
        let keys: Vec<&str> = self.config.alias_fields.iter().map(String::as_str).collect();
        let selected = split_fields(record, &keys).selected;

        selected
            .iter()
            .filter_map(|(field, value)| {
                let wrapped = AliasResolution::from_value(value)?;
                let result =
                    validate_alias(&wrapped, self.config.active_aliases(), self.clock);
                if !result.is_aligned {
                    log::info!("field '{}' holds a stale '{}' value", field, result.alias);
                }
                Some((field.clone(), result))
            })
            .collect()
    }

    /// Drops provenance from alias fields.
    pub fn flatten(&self, record: &Record) -> Record {
        let date_only = self.config.date_only_due;
        let fields: Vec<UnwrapField> = self
            .config
            .alias_fields
            .iter()
            .map(|field| {
                let spec = UnwrapField::new(field);
                if date_only && field == "due" {
                    spec.with_resolver(|payload| match payload.get("date") {
                        Some(date) => date.clone(),
                        None => payload.clone(),
                    })
                } else {
                    spec
                }
            })
            .collect();
        unwrap_alias(record, &fields)
    }

    pub fn to_task(&self, line: &str, separator: Option<&str>) -> Result<Task> {
        let record = self.flatten(&self.parse(line, separator));
        Task::from_record(&record)
    }

    /// The task as a compact line; empty and false fields are left out.
    pub fn to_line(&self, task: &Task, separator: Option<&str>) -> String {
        let record = task.to_record();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        let compact = extract_fields(&record, &keys);
        self.templates
            .object_to_text(&compact, &self.config.template, separator)
    }

    /// Fill-in-the-blanks form of the task fields.
    pub fn template_line(&self, separator: Option<&str>) -> String {
        self.templates
            .generate_template(&Task::default().to_record(), &self.config.template, separator)
    }
}
