// File: ./src/alias/definition.rs
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

/// Placeholder values computed from the clock at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Sentinel {
    Today,
    Tomorrow,
    Now,
    Eod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AliasType {
    #[default]
    Date,
    Time,
    Datetime,
}

/// What an alias stands for: a clock sentinel or a fixed string.
///
/// Serialized as the bare string, e.g. `"TODAY"` or `"12:00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AliasValue {
    Sentinel(Sentinel),
    Literal(String),
}

impl From<String> for AliasValue {
    fn from(s: String) -> Self {
        // Sentinels are matched exactly; "today" as a value is a literal.
        match Sentinel::from_str(&s) {
            Ok(sentinel) if sentinel.to_string() == s => AliasValue::Sentinel(sentinel),
            _ => AliasValue::Literal(s),
        }
    }
}

impl From<&str> for AliasValue {
    fn from(s: &str) -> Self {
        AliasValue::from(s.to_string())
    }
}

impl From<AliasValue> for String {
    fn from(v: AliasValue) -> Self {
        v.to_string()
    }
}

impl fmt::Display for AliasValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasValue::Sentinel(s) => write!(f, "{}", s),
            AliasValue::Literal(l) => write!(f, "{}", l),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDefinition {
    pub id: String,
    pub alias: String,
    pub value: AliasValue,
    #[serde(rename = "type", default)]
    pub kind: AliasType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AliasDefinition {
    pub fn new(id: &str, alias: &str, value: impl Into<AliasValue>, kind: AliasType) -> Self {
        Self {
            id: id.to_string(),
            alias: alias.to_string(),
            value: value.into(),
            kind,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        self.alias.to_lowercase() == input.to_lowercase()
    }
}

static DEFAULT_ALIASES: Lazy<Vec<AliasDefinition>> = Lazy::new(|| {
    use AliasType::*;
    vec![
        AliasDefinition::new("today", "today", AliasValue::Sentinel(Sentinel::Today), Date)
            .with_description("Current date"),
        AliasDefinition::new(
            "tomorrow",
            "tomorrow",
            AliasValue::Sentinel(Sentinel::Tomorrow),
            Date,
        )
        .with_description("Next calendar day"),
        AliasDefinition::new("tmr", "tmr", AliasValue::Sentinel(Sentinel::Tomorrow), Date)
            .with_description("Short for tomorrow"),
        AliasDefinition::new("now", "now", AliasValue::Sentinel(Sentinel::Now), Time)
            .with_description("Current time"),
        AliasDefinition::new("eod", "eod", AliasValue::Sentinel(Sentinel::Eod), Datetime)
            .with_description("End of day (23:59 today)"),
        AliasDefinition::new("midnight", "midnight", "00:00", Time).with_description("00:00"),
        AliasDefinition::new("noon", "noon", "12:00", Time).with_description("12:00"),
    ]
});

/// The built-in alias list.
pub fn default_aliases() -> &'static [AliasDefinition] {
    &DEFAULT_ALIASES
}

/// Case-insensitive lookup on the `alias` field.
pub fn find_alias<'a>(aliases: &'a [AliasDefinition], input: &str) -> Option<&'a AliasDefinition> {
    aliases.iter().find(|def| def.matches(input))
}

/// Checks a user-supplied alias list before it replaces the defaults.
pub fn validate_definitions(aliases: &[AliasDefinition]) -> Result<(), String> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for def in aliases {
        let name = def.alias.trim().to_lowercase();
        if name.is_empty() {
            return Err(format!("Alias '{}' has an empty name.", def.id));
        }
        if name != def.alias.to_lowercase() {
            return Err(format!(
                "Alias '{}' has surrounding whitespace and can never match.",
                def.alias
            ));
        }
        if !ids.insert(def.id.as_str()) {
            return Err(format!("Duplicate alias id '{}'.", def.id));
        }
        if !names.insert(name) {
            return Err(format!("Alias '{}' is defined more than once.", def.alias));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        assert_eq!(default_aliases().len(), 7);
        assert!(validate_definitions(default_aliases()).is_ok());
    }

    #[test]
    fn sentinel_parsing_is_exact() {
        assert_eq!(AliasValue::from("EOD"), AliasValue::Sentinel(Sentinel::Eod));
        assert_eq!(
            AliasValue::from("today"),
            AliasValue::Literal("today".to_string())
        );
        assert_eq!(String::from(AliasValue::from("TOMORROW")), "TOMORROW");
    }

    #[test]
    fn lookup_ignores_case() {
        let def = find_alias(default_aliases(), "NoOn").unwrap();
        assert_eq!(def.id, "noon");
        assert!(find_alias(default_aliases(), "later").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let list = vec![
            AliasDefinition::new("a", "Lunch", "12:30", AliasType::Time),
            AliasDefinition::new("b", "lunch", "13:00", AliasType::Time),
        ];
        let err = validate_definitions(&list).unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn definitions_deserialize_from_toml() {
        let src = r#"
            id = "standup"
            alias = "standup"
            value = "09:15"
            type = "time"
        "#;
        let def: AliasDefinition = toml::from_str(src).unwrap();
        assert_eq!(def.kind, AliasType::Time);
        assert_eq!(def.value, AliasValue::Literal("09:15".to_string()));
    }
}
