//! Ouroboros Rulecheck
//!
//! Rule-driven validation of nested runtime data.
//!
//! A rule is a plain map of option names to values, and validators are looked
//! up by alias in a [`Registry`]. Composite validators (`array`, `dict`)
//! resolve the validators for their elements through the same registry, so
//! rules nest to any depth and may reference themselves.
//!
//! Results come back on two channels:
//! - `Ok(None)`: the value conforms
//! - `Ok(Some(ValidationError))`: the value does not, with the first violation
//! - `Err(ConfigError)`: the rule itself is malformed or names an unknown alias
//!
//! # Features
//!
//! - **yaml** (default): parse rules, values and registry configs from YAML
//!
//! # Example
//!
//! ```rust
//! use ouroboros_rulecheck::{rules, Registry, Value};
//! use serde_json::json;
//!
//! let registry = Registry::with_defaults();
//! let rule = rules::from_json(json!({
//!     "elements": {
//!         "name": {"type": "string", "required": true, "rules": {"empty": false}},
//!         "tags": {"type": "array", "rules": {"data": "string"}},
//!     }
//! })).unwrap();
//!
//! let ok = Value::from(json!({"name": "ouroboros", "tags": ["a", "b"]}));
//! assert_eq!(registry.check(&ok, "dict", &rule), Ok(None));
//!
//! let bad = Value::from(json!({"name": "ouroboros", "tags": ["a", 2]}));
//! let err = registry.check(&bad, "dict", &rule).unwrap().unwrap();
//! assert_eq!(err.to_string(), "tags: 1: data is not a string");
//! ```

// Public modules
pub mod config;
pub mod errors;
pub mod registry;
pub mod rules;
pub mod types;
pub mod validators;

// Re-export commonly used types
pub use config::RegistryConfig;
pub use errors::{CheckError, ConfigError, RegistryError, ValidationError, ValidationResult};
pub use registry::{global_registry, BoxedValidator, Builtin, Factory, Registration, Registry};
pub use rules::{LengthBounds, Pattern, Rule};
pub use types::{Key, Value};
pub use validators::{
    ArrayValidator, BoolValidator, DictValidator, FloatValidator, IntValidator, NumberKind,
    NumberValidator, NumericValidator, StringValidator, Validator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
