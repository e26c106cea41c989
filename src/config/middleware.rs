//! Middleware directives and the registry that turns them into middleware.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A request-processing step attached to a site.
///
/// Execution is up to the server consuming the configuration; this crate
/// only constructs and orders middleware.
pub trait Middleware: fmt::Debug + Send + Sync {
    /// The directive name this middleware was built from.
    fn name(&self) -> &str;
}

/// A single middleware statement from a site block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub args: Vec<String>,
}

type Constructor = Arc<dyn Fn(&Directive) -> Result<Arc<dyn Middleware>, String> + Send + Sync>;

/// Maps directive names to middleware constructors.
#[derive(Clone, Default)]
pub struct MiddlewareRegistry {
    constructors: HashMap<String, Constructor>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor for `name`, replacing any previous one.
    pub fn register<F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&Directive) -> Result<Arc<dyn Middleware>, String> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Builds middleware for `directive`.
    ///
    /// Returns `None` if no constructor is registered under its name.
    pub fn construct(&self, directive: &Directive) -> Option<Result<Arc<dyn Middleware>, String>> {
        self.constructors
            .get(&directive.name)
            .map(|constructor| constructor(directive))
    }
}

impl fmt::Debug for MiddlewareRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.constructors.keys().collect();
        names.sort();
        f.debug_struct("MiddlewareRegistry")
            .field("directives", &names)
            .finish()
    }
}
