//! Leaf validators for booleans and strings

use crate::errors::{ValidationError, ValidationResult};
use crate::registry::Registry;
use crate::rules::{self, LengthBounds, Rule};
use crate::types::Value;
use crate::validators::Validator;

// ============================================================================
// Bool
// ============================================================================

/// Type check for booleans, no options
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolValidator;

impl Validator for BoolValidator {
    fn name(&self) -> &'static str {
        "bool"
    }

    fn validate(&self, _registry: &Registry, value: &Value, _rule: &Rule) -> ValidationResult {
        match value {
            Value::Bool(_) => Ok(None),
            _ => Ok(Some(ValidationError::invalid_type("bool"))),
        }
    }
}

// ============================================================================
// String
// ============================================================================

/// String validator
///
/// Supported rule options:
///
/// - `empty`: boolean, `false` rejects the empty string (default `true`)
/// - `min_length` / `max_length`: integers `>= 1`, counted in characters
/// - `regex`: pattern matched from the start of the string
/// - `regex_mode`: mode letters for `regex`, see [`rules::compile_pattern`]
///
/// ```
/// use ouroboros_rulecheck::{rules, Registry, Value};
/// use serde_json::json;
///
/// let registry = Registry::with_defaults();
/// let rule = rules::from_json(json!({
///     "empty": false,
///     "regex": "[0-9]+(true|false)",
///     "min_length": 5,
///     "max_length": 20,
/// })).unwrap();
///
/// assert_eq!(registry.check(&Value::from("123true"), "string", &rule), Ok(None));
/// assert!(registry.check(&Value::from("true"), "string", &rule).unwrap().is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl Validator for StringValidator {
    fn name(&self) -> &'static str {
        "string"
    }

    fn validate(&self, registry: &Registry, value: &Value, rule: &Rule) -> ValidationResult {
        let Value::String(s) = value else {
            return Ok(Some(ValidationError::invalid_type("string")));
        };

        if !rules::bool_option(rule, "empty", true)? && s.is_empty() {
            return Ok(Some(ValidationError::InvalidFormat));
        }

        let bounds = LengthBounds::for_string(rule)?;
        if bounds.is_set() {
            if let Some(err) = bounds.check(s.chars().count()) {
                return Ok(Some(err));
            }
        }

        if let Some(pattern) = rules::str_option(rule, "regex")? {
            let mode = rules::str_option(rule, "regex_mode")?.unwrap_or_default();
            if !registry.pattern(pattern, mode)?.is_match(s) {
                return Ok(Some(ValidationError::InvalidFormat));
            }
        }

        Ok(None)
    }
}
