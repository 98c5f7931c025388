//! Numeric validators: `int`, `float` and `numeric`
//!
//! All three share one range-checking algorithm, parameterized by a
//! [`NumberKind`] that decides which values (and which rule bounds) have the
//! right type.
//!
//! Supported rule options:
//!
//! - `min`: lower bound
//! - `max`: upper bound
//! - `inc`: boolean, `true` (default) for inclusive bounds, `false` for exclusive

use crate::errors::{ConfigError, ValidationError, ValidationResult};
use crate::registry::Registry;
use crate::rules::{self, Rule};
use crate::types::Value;
use crate::validators::Validator;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as Json;
use std::marker::PhantomData;

/// Decimal number with optional sign, fraction and exponent, surrounding
/// whitespace allowed. No hex, octal prefixes, `inf` or `nan`.
static NUMERIC_STRING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[ \t\n\r\x0B\x0C]*",
        r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?",
        r"[ \t\n\r\x0B\x0C]*$",
    ))
    .unwrap()
});

/// Parse a numeric string
pub fn parse_numeric(s: &str) -> Option<f64> {
    if !NUMERIC_STRING_REGEX.is_match(s) {
        return None;
    }
    s.trim().parse().ok()
}

// ============================================================================
// Number Kinds
// ============================================================================

/// Type policy of a numeric validator
pub trait NumberKind: Send + Sync + 'static {
    /// Comparable representation of accepted values
    type Num: PartialOrd + Copy;

    /// Kind name used in type errors and log output
    const NAME: &'static str;

    /// Extract a number from data, `None` if the type is wrong
    fn from_value(value: &Value) -> Option<Self::Num>;

    /// Extract a number from a rule bound, `None` if the type is wrong
    fn from_bound(bound: &Json) -> Option<Self::Num>;
}

/// Whole numbers only
#[derive(Debug, Clone, Copy, Default)]
pub struct IntKind;

impl NumberKind for IntKind {
    type Num = i64;
    const NAME: &'static str = "int";

    fn from_value(value: &Value) -> Option<i64> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn from_bound(bound: &Json) -> Option<i64> {
        rules::as_integer(bound)
    }
}

/// Floating point or whole numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatKind;

impl NumberKind for FloatKind {
    type Num = f64;
    const NAME: &'static str = "float";

    fn from_value(value: &Value) -> Option<f64> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn from_bound(bound: &Json) -> Option<f64> {
        bound.as_f64()
    }
}

/// Anything that reads as a number, numeric strings included
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericKind;

impl NumberKind for NumericKind {
    type Num = f64;
    const NAME: &'static str = "numeric";

    fn from_value(value: &Value) -> Option<f64> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            Value::String(s) => parse_numeric(s),
            _ => None,
        }
    }

    fn from_bound(bound: &Json) -> Option<f64> {
        match bound {
            Json::Number(n) => n.as_f64(),
            Json::String(s) => parse_numeric(s),
            _ => None,
        }
    }
}

// ============================================================================
// Number Validator
// ============================================================================

/// Range-checking validator shared by all numeric kinds
pub struct NumberValidator<K> {
    _kind: PhantomData<fn() -> K>,
}

/// `int` validator
pub type IntValidator = NumberValidator<IntKind>;
/// `float` validator
pub type FloatValidator = NumberValidator<FloatKind>;
/// `numeric` validator
pub type NumericValidator = NumberValidator<NumericKind>;

impl<K: NumberKind> NumberValidator<K> {
    /// Create a validator
    pub fn new() -> Self {
        Self { _kind: PhantomData }
    }
}

impl<K: NumberKind> Default for NumberValidator<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parsed `min` / `max` / `inc` options
struct Range<T> {
    min: Option<T>,
    max: Option<T>,
    inclusive: bool,
}

impl<T: PartialOrd + Copy> Range<T> {
    fn contains(&self, n: T) -> bool {
        let above_min = self.min.map_or(true, |min| {
            if self.inclusive {
                n >= min
            } else {
                n > min
            }
        });
        let below_max = self.max.map_or(true, |max| {
            if self.inclusive {
                n <= max
            } else {
                n < max
            }
        });
        above_min && below_max
    }
}

impl<K: NumberKind> NumberValidator<K> {
    fn bound(rule: &Rule, name: &str) -> Result<Option<K::Num>, ConfigError> {
        match rules::option(rule, name) {
            None => Ok(None),
            Some(raw) => K::from_bound(raw)
                .map(Some)
                .ok_or_else(|| ConfigError::rule(format!("{} must be {} value", name, K::NAME))),
        }
    }

    fn range(rule: &Rule) -> Result<Range<K::Num>, ConfigError> {
        let min = Self::bound(rule, "min")?;
        let max = Self::bound(rule, "max")?;

        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(ConfigError::rule("min must be less or equal than max"));
            }
        }

        let inclusive = rules::bool_option(rule, "inc", true)?;
        Ok(Range { min, max, inclusive })
    }
}

impl<K: NumberKind> Validator for NumberValidator<K> {
    fn name(&self) -> &'static str {
        K::NAME
    }

    fn validate(&self, _registry: &Registry, value: &Value, rule: &Rule) -> ValidationResult {
        // Bounds are read before the value so a broken rule fails for every input
        let range = Self::range(rule)?;

        let Some(n) = K::from_value(value) else {
            return Ok(Some(ValidationError::invalid_type(K::NAME)));
        };

        if range.contains(n) {
            Ok(None)
        } else {
            Ok(Some(ValidationError::InvalidFormat))
        }
    }
}
