use crate::functions;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// A builtin math function, resolved by name and arity at parse time.
///
/// Entries are declared with `#[calc_macros::builtin]` and live for the whole
/// program, so the tree holds `&'static Builtin` rather than a name to look up
/// again later.
pub struct Builtin {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub func: fn(&[f64]) -> f64,
}

impl Builtin {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Applies the function. `args` must hold exactly `arity()` values.
    pub fn call(&self, args: &[f64]) -> f64 {
        debug_assert_eq!(args.len(), self.arity());
        (self.func)(args)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.params == other.params
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(", "))
    }
}

/// Read-only table of builtin functions and named constants.
pub struct Registry {
    functions: HashMap<&'static str, Vec<&'static Builtin>>,
    constants: HashMap<&'static str, f64>,
}

impl Registry {
    fn new() -> Self {
        let mut functions: HashMap<&'static str, Vec<&'static Builtin>> = HashMap::new();
        for builtin in functions::builtins() {
            functions.entry(builtin.name).or_default().push(builtin);
        }

        let constants = HashMap::from([
            ("PI", std::f64::consts::PI),
            ("E", std::f64::consts::E),
            ("Tau", std::f64::consts::TAU),
        ]);

        debug!(
            "Registry initialised with {} function names and {} constants",
            functions.len(),
            constants.len()
        );
        Self {
            functions,
            constants,
        }
    }

    /// Finds the overload of `name` taking exactly `arity` arguments.
    pub fn function(&self, name: &str, arity: usize) -> Option<&'static Builtin> {
        self.functions
            .get(name)?
            .iter()
            .find(|builtin| builtin.arity() == arity)
            .copied()
    }

    /// Looks up a named constant, returning its canonical name and value.
    pub fn constant(&self, name: &str) -> Option<(&'static str, f64)> {
        self.constants
            .get_key_value(name)
            .map(|(name, value)| (*name, *value))
    }

    pub fn function_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn constant_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constants.keys().copied()
    }
}

/// The process-wide registry, built on first use.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::new)
}
