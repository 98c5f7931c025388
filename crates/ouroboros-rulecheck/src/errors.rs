//! Error types for rule checking
//!
//! Two channels are kept apart:
//!
//! - [`ValidationError`] describes bad *data*. Validators return it as a value
//!   (`Ok(Some(err))`) so callers can try several rules against one record and
//!   composite validators can wrap element failures into keyed paths.
//! - [`ConfigError`] describes a bad *rule* or an alias that cannot be resolved.
//!   It travels on the `Err` side and aborts the whole check.

use thiserror::Error;

// ============================================================================
// Result Types
// ============================================================================

/// Outcome of a single `validate` call
///
/// `Ok(None)` means the value conforms, `Ok(Some(_))` carries the first
/// violation, and `Err(_)` means the rule (or registry setup) is broken.
pub type ValidationResult = Result<Option<ValidationError>, ConfigError>;

// ============================================================================
// Data Errors
// ============================================================================

/// A violation found in the validated data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The value has the wrong type or shape
    #[error("data is not a {expected}")]
    InvalidType {
        /// Human-readable name of the expected kind (e.g. "int", "indexed array")
        expected: String,
    },

    /// Correct type, but a constraint (range, length, pattern, emptiness) failed
    #[error("data format is invalid")]
    InvalidFormat,

    /// An element of a sequence or map failed
    #[error("{key}: {message}")]
    InvalidElement {
        /// Index or key of the failing element
        key: String,
        /// Description of the failure, the nested error's message when wrapping
        message: String,
        /// Nested error, if the element failed its own validator
        cause: Option<Box<ValidationError>>,
    },
}

impl ValidationError {
    /// Create a type error
    pub fn invalid_type(expected: impl Into<String>) -> Self {
        Self::InvalidType {
            expected: expected.into(),
        }
    }

    /// Create an element error with a fixed description
    pub fn element(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidElement {
            key: key.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap a nested failure under `key`
    pub fn wrap(key: impl Into<String>, nested: ValidationError) -> Self {
        Self::InvalidElement {
            key: key.into(),
            message: nested.to_string(),
            cause: Some(Box::new(nested)),
        }
    }

    /// Key of this error if it is an element error
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidElement { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Keys from the outermost element down to the failing one
    ///
    /// ```
    /// use ouroboros_rulecheck::ValidationError;
    ///
    /// let inner = ValidationError::wrap("2", ValidationError::invalid_type("int"));
    /// let outer = ValidationError::wrap("items", inner);
    /// assert_eq!(outer.path(), vec!["items", "2"]);
    /// ```
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::InvalidElement { key, cause, .. } = current {
            path.push(key.as_str());
            match cause {
                Some(next) => current = next.as_ref(),
                None => break,
            }
        }
        path
    }

    /// Innermost error of the chain
    pub fn root_cause(&self) -> &ValidationError {
        let mut current = self;
        while let Self::InvalidElement {
            cause: Some(next), ..
        } = current
        {
            current = next.as_ref();
        }
        current
    }
}

// ============================================================================
// Registry Errors
// ============================================================================

/// Failures of the alias table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Alias is taken
    #[error("{0} is already registered")]
    AlreadyRegistered(String),

    /// Alias is unknown
    #[error("{0} is not registered")]
    NotRegistered(String),

    /// Alias was resolved already and can no longer be replaced
    #[error("{0} is already in use and cannot be replaced")]
    AliasInUse(String),

    /// Descriptor does not name a validator implementation
    #[error("{0} is not a valid validator")]
    UnknownValidator(String),
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// A malformed rule, or a nested alias that could not be resolved
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Rule option has the wrong type or an impossible combination
    #[error("invalid rule: {0}")]
    Rule(String),

    /// Registry lookup failed while dispatching
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Registry configuration could not be read or parsed
    #[error("invalid configuration: {0}")]
    Load(String),
}

impl ConfigError {
    /// Create a rule error
    pub fn rule(message: impl Into<String>) -> Self {
        Self::Rule(message.into())
    }
}

// ============================================================================
// Top-level Check Error
// ============================================================================

/// Error returned by `Registry::check_and_throw`
///
/// Folds both channels into one `Err` for callers that prefer `?` at the top
/// level. Validators never produce this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    /// Data did not conform
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Rule or registry setup is broken
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<RegistryError> for CheckError {
    fn from(err: RegistryError) -> Self {
        Self::Config(err.into())
    }
}
