//! Rule representation and typed option access
//!
//! A rule is a plain JSON object mapping option names to values. Options the
//! validator does not know are ignored, and an option set to `null` counts as
//! absent. Helpers here turn a wrongly typed option into [`ConfigError::Rule`].

use crate::errors::{ConfigError, ValidationError};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde_json::Value as Json;

/// Validation rule: option name to option value
pub type Rule = serde_json::Map<String, Json>;

static EMPTY_RULE: Lazy<Rule> = Lazy::new(Rule::new);

/// Shared empty rule, used when a nested rule is omitted
pub fn empty() -> &'static Rule {
    &EMPTY_RULE
}

/// Convert a JSON value into a rule, which must be an object
///
/// ```
/// use ouroboros_rulecheck::rules;
/// use serde_json::json;
///
/// let rule = rules::from_json(json!({"min": 1, "max": 3})).unwrap();
/// assert_eq!(rule.len(), 2);
/// assert!(rules::from_json(json!([1, 2])).is_err());
/// ```
pub fn from_json(value: Json) -> Result<Rule, ConfigError> {
    match value {
        Json::Object(rule) => Ok(rule),
        other => Err(ConfigError::rule(format!("rule must be an object, got {}", other))),
    }
}

/// Parse a rule from JSON text
pub fn parse_json(text: &str) -> Result<Rule, ConfigError> {
    serde_json::from_str(text)
        .map_err(|e| ConfigError::rule(format!("rule is not a JSON object: {}", e)))
}

/// Parse a rule from YAML text
#[cfg(feature = "yaml")]
pub fn parse_yaml(text: &str) -> Result<Rule, ConfigError> {
    serde_yaml::from_str(text)
        .map_err(|e| ConfigError::rule(format!("rule is not a YAML mapping: {}", e)))
}

// ============================================================================
// Option Readers
// ============================================================================

/// Get an option, treating `null` as absent
pub fn option<'a>(rule: &'a Rule, name: &str) -> Option<&'a Json> {
    rule.get(name).filter(|v| !v.is_null())
}

/// Read a boolean option with a default
pub fn bool_option(rule: &Rule, name: &str, default: bool) -> Result<bool, ConfigError> {
    match option(rule, name) {
        None => Ok(default),
        Some(Json::Bool(b)) => Ok(*b),
        Some(_) => Err(ConfigError::rule(format!("{} must be boolean", name))),
    }
}

/// Read an optional string option
pub fn str_option<'a>(rule: &'a Rule, name: &str) -> Result<Option<&'a str>, ConfigError> {
    match option(rule, name) {
        None => Ok(None),
        Some(Json::String(s)) => Ok(Some(s)),
        Some(_) => Err(ConfigError::rule(format!("{} must be string", name))),
    }
}

/// Read a nested rule option, defaulting to the empty rule
pub fn rule_option<'a>(rule: &'a Rule, name: &str) -> Result<&'a Rule, ConfigError> {
    match option(rule, name) {
        None => Ok(empty()),
        Some(Json::Object(nested)) => Ok(nested),
        Some(_) => Err(ConfigError::rule(format!("{} must be an object", name))),
    }
}

/// Integer value of a JSON number, `None` for floats and non-numbers
pub fn as_integer(value: &Json) -> Option<i64> {
    match value {
        Json::Number(n) if n.is_i64() || n.is_u64() => n.as_i64(),
        _ => None,
    }
}

// ============================================================================
// Length Bounds
// ============================================================================

/// `min_length` / `max_length` pair, both inclusive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthBounds {
    /// Minimum length
    pub min: Option<usize>,
    /// Maximum length
    pub max: Option<usize>,
}

impl LengthBounds {
    /// Read bounds for collections: `min_length >= 0`, `max_length >= 1`
    pub fn for_collection(rule: &Rule) -> Result<Self, ConfigError> {
        Self::read(rule, 0)
    }

    /// Read bounds for strings: both `>= 1`
    pub fn for_string(rule: &Rule) -> Result<Self, ConfigError> {
        Self::read(rule, 1)
    }

    fn read(rule: &Rule, min_floor: i64) -> Result<Self, ConfigError> {
        let min = length_option(rule, "min_length", min_floor)?;
        let max = length_option(rule, "max_length", 1)?;

        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(ConfigError::rule("max_length must >= min_length"));
            }
        }

        Ok(Self { min, max })
    }

    /// Whether any bound is configured
    pub fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Check a length, `InvalidFormat` when out of bounds
    pub fn check(&self, len: usize) -> Option<ValidationError> {
        let too_short = self.min.is_some_and(|min| len < min);
        let too_long = self.max.is_some_and(|max| len > max);
        (too_short || too_long).then_some(ValidationError::InvalidFormat)
    }
}

fn length_option(rule: &Rule, name: &str, floor: i64) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = option(rule, name) else {
        return Ok(None);
    };

    let n = as_integer(raw).ok_or_else(|| ConfigError::rule(format!("{} must be integer", name)))?;
    if n < floor {
        return Err(ConfigError::rule(format!("{} must >= {}", name, floor)));
    }

    usize::try_from(n)
        .map(Some)
        .map_err(|_| ConfigError::rule(format!("{} is out of range", name)))
}

// ============================================================================
// Patterns
// ============================================================================

/// Pattern that must match at the start of the subject
///
/// The pattern is compiled as given and anchoring happens at match time, so
/// the pattern text can neither escape the anchor nor be broken by it.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Check whether a match starts at the beginning of `subject`
    pub fn is_match(&self, subject: &str) -> bool {
        // Leftmost-first search, so a match at 0 is found whenever one exists
        self.regex
            .find(subject)
            .is_some_and(|m| m.start() == 0)
    }

    /// The pattern source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Compile a `regex` / `regex_mode` pair
///
/// Matching is anchored at the start of the subject but not at its end; use
/// `$` to require a full match. Mode letters:
///
/// - `i`: case-insensitive
/// - `x`: ignore whitespace and allow `#` comments in the pattern
/// - `m` / `s`: `.` also matches newline
/// - `u`: Unicode (always on, accepted for compatibility)
pub fn compile_pattern(pattern: &str, mode: &str) -> Result<Pattern, ConfigError> {
    let mut builder = RegexBuilder::new(pattern);

    for flag in mode.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            'm' | 's' => {
                builder.dot_matches_new_line(true);
            }
            'u' => {}
            other => {
                return Err(ConfigError::rule(format!(
                    "unsupported regex_mode flag '{}'",
                    other
                )));
            }
        }
    }

    builder
        .build()
        .map(|regex| Pattern { regex })
        .map_err(|e| ConfigError::rule(format!("invalid regex {:?}: {}", pattern, e)))
}
