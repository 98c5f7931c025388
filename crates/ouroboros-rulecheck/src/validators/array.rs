//! Sequence validator (`array`)
//!
//! Accepts integer-indexed sequences: every key is a non-negative integer and,
//! in strict mode, the keys are exactly `0..len`.
//!
//! Supported rule options:
//!
//! - `min_length`: integer `>= 0`, inclusive
//! - `max_length`: integer `>= 1`, inclusive
//! - `strict`: boolean, reject gapped indices (default `true`)
//! - `data`: alias of the validator applied to every element
//! - `data_rules`: rule passed to the element validator (default `{}`)

use crate::errors::{ValidationError, ValidationResult};
use crate::registry::Registry;
use crate::rules::{self, LengthBounds, Rule};
use crate::types::{Key, Value};
use crate::validators::Validator;

const EXPECTED: &str = "indexed array";

/// Validator for indexed sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayValidator;

impl Validator for ArrayValidator {
    fn name(&self) -> &'static str {
        "array"
    }

    fn validate(&self, registry: &Registry, value: &Value, rule: &Rule) -> ValidationResult {
        let (Some(entries), Some(len)) = (value.entries(), value.len()) else {
            return Ok(Some(ValidationError::invalid_type(EXPECTED)));
        };

        let bounds = LengthBounds::for_collection(rule)?;
        if bounds.is_set() {
            if let Some(err) = bounds.check(len) {
                return Ok(Some(err));
            }
        }

        let mut elements = Vec::with_capacity(len);
        let mut max_index = 0u64;
        for (key, element) in entries {
            let index = match key {
                Key::Int(i) if i >= 0 => i as u64,
                _ => return Ok(Some(ValidationError::invalid_type(EXPECTED))),
            };
            max_index = max_index.max(index);
            elements.push((index, element));
        }

        if rules::bool_option(rule, "strict", true)? && len != 0 && max_index + 1 != len as u64 {
            return Ok(Some(ValidationError::invalid_type(EXPECTED)));
        }

        let Some(alias) = rules::str_option(rule, "data")? else {
            return Ok(None);
        };
        let data_rules = rules::rule_option(rule, "data_rules")?;
        let validator = registry.resolve(alias)?;

        elements.sort_by_key(|(index, _)| *index);
        for (index, element) in elements {
            if let Some(err) = validator.validate(registry, element, data_rules)? {
                return Ok(Some(ValidationError::wrap(index.to_string(), err)));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use crate::rules::from_json;
    use serde_json::{json, Value as Json};

    fn sparse(pairs: &[(i64, &str)]) -> Value {
        Value::map(pairs.iter().map(|(k, v)| (Value::Int(*k), Value::from(*v))))
    }

    fn check(value: &Value, rule: Json) -> ValidationResult {
        ArrayValidator.validate(&Registry::with_defaults(), value, &from_json(rule).unwrap())
    }

    fn type_error() -> ValidationResult {
        Ok(Some(ValidationError::invalid_type(EXPECTED)))
    }

    #[test]
    fn test_rejects_non_sequences() {
        for wrong in [Value::from("string"), Value::Bool(true), Value::Int(0), Value::Null] {
            assert_eq!(check(&wrong, json!({})), type_error());
        }
    }

    #[test]
    fn test_default_rule() {
        assert_eq!(check(&Value::List(vec![]), json!({})), Ok(None));
        assert_eq!(check(&Value::List(vec![Value::Int(1)]), json!({})), Ok(None));
        assert_eq!(check(&sparse(&[(0, "a"), (1, "b")]), json!({})), Ok(None));
        assert_eq!(check(&sparse(&[(1, "b"), (0, "a")]), json!({})), Ok(None));
        assert_eq!(check(&sparse(&[(0, "a"), (2, "b")]), json!({})), type_error());
    }

    #[test]
    fn test_non_strict_allows_gaps() {
        let rule = json!({"strict": false});
        assert_eq!(check(&sparse(&[(0, "a"), (2, "b")]), rule.clone()), Ok(None));
        assert_eq!(check(&sparse(&[(-1, "a")]), rule.clone()), type_error());

        let string_keys = Value::map([("a", 1)]);
        assert_eq!(check(&string_keys, rule), type_error());
    }

    #[test]
    fn test_length_bounds() {
        let rule = json!({"min_length": 2, "max_length": 3});
        let ints = |n: i64| Value::List((0..n).map(Value::Int).collect());

        assert_eq!(check(&ints(1), rule.clone()), Ok(Some(ValidationError::InvalidFormat)));
        assert_eq!(check(&ints(2), rule.clone()), Ok(None));
        assert_eq!(check(&ints(3), rule.clone()), Ok(None));
        assert_eq!(check(&ints(4), rule.clone()), Ok(Some(ValidationError::InvalidFormat)));
        assert_eq!(
            check(&sparse(&[(1, "a")]), rule.clone()),
            Ok(Some(ValidationError::InvalidFormat))
        );
        assert_eq!(check(&sparse(&[(0, "a"), (2, "b")]), rule), type_error());
    }

    #[test]
    fn test_invalid_rules() {
        let value = Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        for rule in [
            json!({"max_length": "str"}),
            json!({"min_length": "str"}),
            json!({"max_length": 0}),
            json!({"min_length": -1}),
            json!({"max_length": 1.0}),
            json!({"min_length": 1.0}),
            json!({"max_length": 1, "min_length": 2}),
            json!({"strict": "yes"}),
            json!({"data": 1}),
            json!({"data": "int", "data_rules": []}),
        ] {
            assert!(
                matches!(check(&value, rule.clone()), Err(ConfigError::Rule(_))),
                "{} should be rejected",
                rule
            );
        }
    }

    #[test]
    fn test_element_validation() {
        let value = Value::List(vec![Value::Int(1), Value::Int(2), Value::from("3")]);
        let result = check(&value, json!({"data": "int"})).unwrap().unwrap();
        assert_eq!(result.key(), Some("2"));
        assert_eq!(result.root_cause(), &ValidationError::invalid_type("int"));
        assert_eq!(result.to_string(), "2: data is not a int");
    }

    #[test]
    fn test_element_rules_and_order() {
        let rule = json!({"data": "int", "data_rules": {"min": 2}, "strict": false});
        let value = Value::map([(Value::Int(5), Value::Int(9)), (Value::Int(3), Value::Int(1))]);
        let result = check(&value, rule).unwrap().unwrap();
        assert_eq!(result.key(), Some("3"));
    }

    #[test]
    fn test_unknown_element_alias() {
        let value = Value::List(vec![Value::Int(1)]);
        assert!(matches!(
            check(&value, json!({"data": "nope"})),
            Err(ConfigError::Registry(_))
        ));
    }
}
