//! Validator contract and built-in validators
//!
//! Every validator is a stateless `Send + Sync` object. A single instance is
//! shared by all aliases that resolve to it and by concurrent callers.
//!
//! # Contract
//!
//! `validate(registry, value, rule)`:
//!
//! 1. Returns `Ok(None)` when `value` satisfies `rule`.
//! 2. Returns `Ok(Some(err))` when `value` is invalid.
//! 3. Returns `Err(ConfigError)` when `rule` is malformed. Options that only
//!    matter after an earlier check already failed may go unchecked.
//! 4. Nested values are checked through `registry.resolve(alias)`, never by
//!    constructing another validator directly.

use crate::errors::ValidationResult;
use crate::registry::Registry;
use crate::rules::Rule;
use crate::types::Value;

pub mod array;
pub mod dict;
pub mod number;
pub mod scalar;

pub use array::ArrayValidator;
pub use dict::DictValidator;
pub use number::{FloatValidator, IntValidator, NumberKind, NumberValidator, NumericValidator};
pub use scalar::{BoolValidator, StringValidator};

/// A rule-driven checker for one kind of value
pub trait Validator: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Check `value` against `rule`
    fn validate(&self, registry: &Registry, value: &Value, rule: &Rule) -> ValidationResult;
}
