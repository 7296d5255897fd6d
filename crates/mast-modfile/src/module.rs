use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::key::ModuleKey;

/// Resolved module descriptor: the module's own identity plus its dependency
/// edges.
///
/// `deps` maps a *local dependency alias* (the name sibling code uses to
/// refer to the dependency) to the identity of the depended-on module. The
/// mapping keeps declaration order; that order is observable in diagnostics.
///
/// A `Module` is immutable once built. Edge rewriting during discovery
/// produces a new `Module` via [`Module::builder`] rather than mutating in
/// place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    name: String,
    version: String,
    deps: IndexMap<String, ModuleKey>,
}

impl Module {
    /// Create a new module builder with empty identity and no dependencies.
    pub fn builder() -> ModuleBuilder {
        ModuleBuilder {
            module: Self {
                name: String::new(),
                version: String::new(),
                deps: IndexMap::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Dependency edges, keyed by local alias, in declaration order.
    pub fn deps(&self) -> &IndexMap<String, ModuleKey> {
        &self.deps
    }
}

/// Consuming builder for [`Module`].
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.module.name = name.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.module.version = version.into();
        self
    }

    /// Add a single dependency edge. Last write wins on a duplicate alias;
    /// alias collision checks belong to declaration-file evaluation.
    pub fn dep(mut self, alias: impl Into<String>, key: ModuleKey) -> Self {
        self.module.deps.insert(alias.into(), key);
        self
    }

    /// Replace all dependency edges at once.
    pub fn deps(mut self, deps: IndexMap<String, ModuleKey>) -> Self {
        self.module.deps = deps;
        self
    }

    pub fn build(self) -> Module {
        self.module
    }
}
