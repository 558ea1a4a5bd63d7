// File: ./src/alias/validator.rs
use crate::alias::definition::{AliasDefinition, find_alias};
use crate::alias::resolver::{AliasResolution, Resolution, resolve_alias};
use crate::clock::Clock;
use crate::value::deep_equal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasValidationResult {
    pub is_aligned: bool,
    pub alias: String,
    /// The value to display: the fresh resolution when aligned, otherwise
    /// the stored face value.
    pub resolved: Value,
}

/// Checks whether a stored resolution still matches what its alias
/// resolves to right now.
///
/// Unknown aliases are reported as aligned with their stored values, since
/// there is no definition to judge them against. For known aliases the
/// result always carries the definition's name, lowercased.
pub fn validate_alias(
    input: &AliasResolution,
    aliases: &[AliasDefinition],
    clock: &dyn Clock,
) -> AliasValidationResult {
    if find_alias(aliases, &input.alias).is_none() {
        log::debug!("alias '{}' has no definition; assuming aligned", input.alias);
        return AliasValidationResult {
            is_aligned: true,
            alias: input.alias.clone(),
            resolved: input.resolved.clone(),
        };
    }

    let current = match resolve_alias(&input.alias, aliases, clock) {
        Resolution::Alias(res) => res,
        Resolution::Literal(s) => AliasResolution::new(&input.alias, s),
        Resolution::Absent => AliasResolution::new(&input.alias, Value::Null),
    };

    if deep_equal(&input.resolved, &current.resolved) {
        AliasValidationResult {
            is_aligned: true,
            alias: current.alias,
            resolved: current.resolved,
        }
    } else {
        log::debug!(
            "alias '{}' is stale: stored {}, now {}",
            input.alias,
            input.resolved,
            current.resolved
        );
        AliasValidationResult {
            is_aligned: false,
            alias: current.alias,
            resolved: input.resolved.clone(),
        }
    }
}
