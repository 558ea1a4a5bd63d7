// File: ./src/alias/mod.rs
//! Time aliases: human shorthand such as `today`, `eod` or `tmr` that stands
//! in for a concrete date or time.
pub mod definition;
pub mod resolver;
pub mod unwrap;
pub mod validator;

pub use definition::{
    AliasDefinition, AliasType, AliasValue, Sentinel, default_aliases, find_alias,
    validate_definitions,
};
pub use resolver::{AliasResolution, Resolution, resolve_alias};
pub use unwrap::{UnwrapField, unwrap_alias};
pub use validator::{AliasValidationResult, validate_alias};
