//! Validator registry
//!
//! The registry maps aliases to validator implementations. Entries are
//! resolved lazily: a factory registration is constructed on first use and
//! cached by implementation identity, so every alias pointing at the same
//! validator type shares one instance.
//!
//! Composite validators receive the registry on every call and look nested
//! validators up by alias, which lets a `dict` rule reference `dict` again.

use crate::errors::{CheckError, ConfigError, RegistryError, ValidationError, ValidationResult};
use crate::rules::{self, Pattern, Rule};
use crate::types::Value;
use crate::validators::{
    ArrayValidator, BoolValidator, DictValidator, FloatValidator, IntValidator, NumericValidator,
    StringValidator, Validator,
};
use dashmap::DashMap;
use parking_lot::RwLock;
use once_cell::sync::OnceCell;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Shared validator handle
pub type BoxedValidator = Arc<dyn Validator>;

// ============================================================================
// Registration
// ============================================================================

/// Deferred constructor with the identity of the type it builds
#[derive(Clone)]
pub struct Factory {
    id: TypeId,
    type_name: &'static str,
    make: Arc<dyn Fn() -> BoxedValidator + Send + Sync>,
}

impl Factory {
    /// Wrap a constructor for validator type `V`
    pub fn new<V, F>(make: F) -> Self
    where
        V: Validator + 'static,
        F: Fn() -> V + Send + Sync + 'static,
    {
        Self {
            id: TypeId::of::<V>(),
            type_name: type_name::<V>(),
            make: Arc::new(move || Arc::new(make()) as BoxedValidator),
        }
    }

    /// Name of the type this factory builds
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// What an alias points at
#[derive(Clone)]
pub enum Registration {
    /// A ready-made validator, shared as is
    Instance(BoxedValidator),
    /// A constructor run on first resolution, cached per implementation type
    Factory(Factory),
}

impl Registration {
    /// Register an already built validator
    pub fn instance(validator: impl Validator + 'static) -> Self {
        Self::Instance(Arc::new(validator))
    }

    /// Register a constructor
    pub fn factory<V, F>(make: F) -> Self
    where
        V: Validator + 'static,
        F: Fn() -> V + Send + Sync + 'static,
    {
        Self::Factory(Factory::new(make))
    }

    /// Register a validator type by its `Default` constructor
    pub fn of<V: Validator + Default + 'static>() -> Self {
        Self::factory(V::default)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(v) => f.debug_tuple("Instance").field(&v.name()).finish(),
            Self::Factory(factory) => f.debug_tuple("Factory").field(factory).finish(),
        }
    }
}

// ============================================================================
// Built-in Validators
// ============================================================================

/// Built-in validator implementations, addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Array,
    Bool,
    Dict,
    Float,
    Int,
    Numeric,
    String,
}

impl Builtin {
    /// All built-ins, in default alias order
    pub const ALL: [Builtin; 7] = [
        Self::Array,
        Self::Bool,
        Self::Dict,
        Self::Float,
        Self::Int,
        Self::Numeric,
        Self::String,
    ];

    /// Default alias of this built-in
    pub fn alias(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Bool => "bool",
            Self::Dict => "dict",
            Self::Float => "float",
            Self::Int => "int",
            Self::Numeric => "numeric",
            Self::String => "string",
        }
    }
}

impl FromStr for Builtin {
    type Err = RegistryError;

    /// Accepts the default alias or the type name, e.g. `int` or `IntValidator`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let short = s.strip_suffix("Validator").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|b| b.alias().eq_ignore_ascii_case(short))
            .ok_or_else(|| RegistryError::UnknownValidator(s.to_string()))
    }
}

impl From<Builtin> for Registration {
    fn from(builtin: Builtin) -> Self {
        match builtin {
            Builtin::Array => Registration::of::<ArrayValidator>(),
            Builtin::Bool => Registration::of::<BoolValidator>(),
            Builtin::Dict => Registration::of::<DictValidator>(),
            Builtin::Float => Registration::of::<FloatValidator>(),
            Builtin::Int => Registration::of::<IntValidator>(),
            Builtin::Numeric => Registration::of::<NumericValidator>(),
            Builtin::String => Registration::of::<StringValidator>(),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

struct Entry {
    registration: Registration,
    /// Set on first resolution, after which the alias is frozen
    used: AtomicBool,
}

impl Entry {
    fn new(registration: Registration) -> Self {
        Self {
            registration,
            used: AtomicBool::new(false),
        }
    }
}

/// Alias table plus instance cache (thread-safe)
pub struct Registry {
    aliases: RwLock<HashMap<String, Entry>>,
    instances: DashMap<TypeId, Arc<OnceCell<BoxedValidator>>>,
    patterns: DashMap<(String, String), Pattern>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            aliases: RwLock::new(HashMap::new()),
            instances: DashMap::new(),
            patterns: DashMap::new(),
        }
    }

    /// Create a registry seeded with the built-in aliases
    /// (`array`, `bool`, `dict`, `float`, `int`, `numeric`, `string`)
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        {
            let mut aliases = registry.aliases.write();
            for builtin in Builtin::ALL {
                aliases.insert(builtin.alias().to_string(), Entry::new(builtin.into()));
            }
        }
        debug!("Seeded registry with {} built-in validators", Builtin::ALL.len());
        registry
    }

    /// Register `alias`, failing if it is taken
    pub fn register(
        &self,
        alias: impl Into<String>,
        registration: impl Into<Registration>,
    ) -> Result<(), RegistryError> {
        let alias = alias.into();
        let registration = registration.into();
        let mut aliases = self.aliases.write();

        if aliases.contains_key(&alias) {
            return Err(RegistryError::AlreadyRegistered(alias));
        }

        debug!("Registering validator alias: {} ({:?})", alias, registration);
        aliases.insert(alias, Entry::new(registration));
        Ok(())
    }

    /// Register `alias` for a built-in named by `validator`
    ///
    /// `validator` is a default alias or type name such as `"int"` or
    /// `"StringValidator"`.
    pub fn register_builtin(
        &self,
        alias: impl Into<String>,
        validator: &str,
    ) -> Result<(), RegistryError> {
        let builtin: Builtin = validator.parse()?;
        self.register(alias, builtin)
    }

    /// Point an existing alias elsewhere, allowed only before its first use
    pub fn replace(
        &self,
        alias: &str,
        registration: impl Into<Registration>,
    ) -> Result<(), RegistryError> {
        let mut aliases = self.aliases.write();
        let entry = aliases
            .get_mut(alias)
            .ok_or_else(|| RegistryError::NotRegistered(alias.to_string()))?;

        if entry.used.load(Ordering::Acquire) {
            return Err(RegistryError::AliasInUse(alias.to_string()));
        }

        let registration = registration.into();
        debug!("Replacing validator alias: {} ({:?})", alias, registration);
        entry.registration = registration;
        Ok(())
    }

    /// Resolve an alias, constructing the validator on first use
    ///
    /// Concurrent first resolutions of one implementation build it once. A
    /// factory may resolve other aliases, but not one that builds its own type.
    pub fn resolve(&self, alias: &str) -> Result<BoxedValidator, RegistryError> {
        let registration = {
            let aliases = self.aliases.read();
            let entry = aliases
                .get(alias)
                .ok_or_else(|| RegistryError::NotRegistered(alias.to_string()))?;
            entry.used.store(true, Ordering::Release);
            entry.registration.clone()
        };

        match registration {
            Registration::Instance(validator) => Ok(validator),
            Registration::Factory(factory) => {
                // Only the cell is created under the shard lock; `make` runs
                // outside it, so a factory may resolve other aliases.
                let cell = self.instances.entry(factory.id).or_default().value().clone();
                let validator = cell.get_or_init(|| {
                    debug!("Instantiating validator {} for alias {}", factory.type_name, alias);
                    (factory.make)()
                });
                Ok(validator.clone())
            }
        }
    }

    /// Check whether an alias is registered
    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.read().contains_key(alias)
    }

    /// Registered aliases, sorted
    pub fn aliases(&self) -> Vec<String> {
        let mut names: Vec<String> = self.aliases.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered aliases
    pub fn len(&self) -> usize {
        self.aliases.read().len()
    }

    /// Check if no alias is registered
    pub fn is_empty(&self) -> bool {
        self.aliases.read().is_empty()
    }

    // ------------------------------------------------------------------------
    // Checking
    // ------------------------------------------------------------------------

    /// Validate `value` with the validator registered as `alias`
    pub fn check(&self, value: &Value, alias: &str, rule: &Rule) -> ValidationResult {
        trace!("Checking {} value with {}", value.type_name(), alias);
        self.resolve(alias)?.validate(self, value, rule)
    }

    /// Like [`Registry::check`], but invalid data is returned as `Err` too
    pub fn check_and_throw(
        &self,
        value: &Value,
        alias: &str,
        rule: &Rule,
    ) -> Result<(), CheckError> {
        match self.check(value, alias, rule)? {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Check many records against one rule
    ///
    /// Each record gets its own verdict; the first configuration error aborts
    /// the batch.
    pub fn check_many<'a, I>(
        &self,
        values: I,
        alias: &str,
        rule: &Rule,
    ) -> Result<Vec<Option<ValidationError>>, ConfigError>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let validator = self.resolve(alias)?;
        values
            .into_iter()
            .map(|value| validator.validate(self, value, rule))
            .collect()
    }

    /// Compiled pattern for a `regex` / `regex_mode` pair, cached
    pub fn pattern(&self, pattern: &str, mode: &str) -> Result<Pattern, ConfigError> {
        let key = (pattern.to_string(), mode.to_string());
        if let Some(re) = self.patterns.get(&key) {
            return Ok(re.value().clone());
        }

        let re = rules::compile_pattern(pattern, mode)?;
        self.patterns.insert(key, re.clone());
        Ok(re)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("aliases", &self.aliases())
            .field("instances", &self.instances.len())
            .finish()
    }
}

/// Global registry seeded with the built-in aliases
static GLOBAL_REGISTRY: once_cell::sync::Lazy<Registry> =
    once_cell::sync::Lazy::new(Registry::with_defaults);

/// Get the global registry
pub fn global_registry() -> &'static Registry {
    &GLOBAL_REGISTRY
}
