//! Keyed-map validator (`dict`)
//!
//! Supported rule options:
//!
//! - `strict`: boolean, reject keys not named in `elements` (default `false`)
//! - `min_length` / `max_length`: bounds on the number of keys, as for `array`
//! - `elements`: per-key rules, described below
//!
//! # Element rules
//!
//! ```json
//! {
//!     "id":    { "type": "int", "required": true, "rules": { "min": 1 } },
//!     "tags":  { "type": "array", "rules": { "data": "string" } },
//!     "note":  {},
//!     "*":     { "regex": "x-[a-z]+$", "regex_mode": "i", "type": "string" }
//! }
//! ```
//!
//! - `type`: alias of the validator for the element; omit to only check the key
//! - `required`: boolean, the key must be present (default `false`)
//! - `rules`: rule passed to the element validator (default `{}`)
//!
//! The `*` entry is the catch-all rule for keys not named elsewhere. It may
//! restrict those keys with `regex` / `regex_mode`, and its `required` flag is
//! ignored. With a catch-all present, `strict` has no effect.
//!
//! A list is treated as a map keyed by its indices, so `[1, 2, 3, 4]` has the
//! key `"3"`.

use crate::errors::{ConfigError, ValidationError, ValidationResult};
use crate::registry::Registry;
use crate::rules::{self, LengthBounds, Rule};
use crate::types::{Key, Value};
use crate::validators::Validator;
use serde_json::Value as Json;

const EXPECTED: &str = "dictionary";

/// Key of the catch-all element rule
pub const WILDCARD: &str = "*";

/// Validator for keyed maps
#[derive(Debug, Clone, Copy, Default)]
pub struct DictValidator;

impl Validator for DictValidator {
    fn name(&self) -> &'static str {
        "dict"
    }

    fn validate(&self, registry: &Registry, value: &Value, rule: &Rule) -> ValidationResult {
        let (Some(entries), Some(len)) = (value.entries(), value.len()) else {
            return Ok(Some(ValidationError::invalid_type(EXPECTED)));
        };

        let strict = rules::bool_option(rule, "strict", false)?;

        let bounds = LengthBounds::for_collection(rule)?;
        if bounds.is_set() {
            if let Some(err) = bounds.check(len) {
                return Ok(Some(err));
            }
        }

        let Some(elements) = rules::option(rule, "elements") else {
            for (key, _) in entries {
                if key.name().is_none() {
                    return Ok(Some(invalid_key(&key)));
                }
            }
            return Ok(None);
        };

        let elements = ElementRules::parse(elements)?;
        if let Some(missing) = elements.missing_required(value)? {
            return Ok(Some(ValidationError::element(missing, "not found, but required")));
        }

        for (key, element) in entries {
            let Some(name) = key.name() else {
                return Ok(Some(invalid_key(&key)));
            };

            let verdict = match (elements.named(&name), elements.wildcard) {
                (Some(entry), _) => check_entry(registry, &name, element, entry)?,
                (None, Some(wildcard)) => check_catch_all(registry, &name, element, wildcard)?,
                (None, None) if strict => Some(ValidationError::element(name, "is not valid key")),
                (None, None) => None,
            };

            if verdict.is_some() {
                return Ok(verdict);
            }
        }

        Ok(None)
    }
}

fn invalid_key(key: &Key<'_>) -> ValidationError {
    ValidationError::element(key.describe(), "(key) is not a string")
}

/// The `elements` option, split into named entries and the catch-all
struct ElementRules<'a> {
    all: &'a Rule,
    wildcard: Option<&'a Rule>,
}

impl<'a> ElementRules<'a> {
    fn parse(raw: &'a Json) -> Result<Self, ConfigError> {
        let Json::Object(all) = raw else {
            return Err(ConfigError::rule("elements must be an object, or just omit it"));
        };

        let mut wildcard = None;
        for (name, entry) in all {
            let Json::Object(entry) = entry else {
                return Err(ConfigError::rule(format!(
                    "element rule for {} must be an object",
                    name
                )));
            };
            if name == WILDCARD {
                wildcard = Some(entry);
            }
        }

        Ok(Self { all, wildcard })
    }

    fn named(&self, name: &str) -> Option<&'a Rule> {
        if name == WILDCARD {
            return None;
        }
        match self.all.get(name) {
            Some(Json::Object(entry)) => Some(entry),
            _ => None,
        }
    }

    /// First named key marked `required` that `value` lacks
    fn missing_required(&self, value: &Value) -> Result<Option<&'a str>, ConfigError> {
        for (name, entry) in self.all {
            if name == WILDCARD {
                continue;
            }
            let Json::Object(entry) = entry else {
                continue;
            };
            if rules::bool_option(entry, "required", false)? && !value.contains_key(name) {
                return Ok(Some(name.as_str()));
            }
        }
        Ok(None)
    }
}

fn check_catch_all(
    registry: &Registry,
    name: &str,
    element: &Value,
    wildcard: &Rule,
) -> Result<Option<ValidationError>, ConfigError> {
    if let Some(pattern) = rules::str_option(wildcard, "regex")? {
        let mode = rules::str_option(wildcard, "regex_mode")?.unwrap_or_default();
        if !registry.pattern(pattern, mode)?.is_match(name) {
            return Ok(Some(ValidationError::element(name, "is not a catch-all key")));
        }
    }

    check_entry(registry, name, element, wildcard)
}

fn check_entry(
    registry: &Registry,
    name: &str,
    element: &Value,
    entry: &Rule,
) -> Result<Option<ValidationError>, ConfigError> {
    let Some(alias) = rules::str_option(entry, "type")? else {
        return Ok(None);
    };

    let element_rules = rules::rule_option(entry, "rules")?;
    let validator = registry.resolve(alias)?;
    Ok(validator
        .validate(registry, element, element_rules)?
        .map(|err| ValidationError::wrap(name, err)))
}
