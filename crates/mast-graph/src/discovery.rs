//! Dependency graph discovery.
//!
//! Breadth-first expansion from the root module: every newly discovered,
//! not-yet-resolved dependency identity is resolved and its edges rewritten
//! against the root's override table, until the graph is closed or blocked
//! on inputs the incremental engine has not produced yet.

use std::collections::VecDeque;

use indexmap::IndexMap;
use serde::Serialize;

use mast_modfile::{Module, ModuleKey, ModuleOverride, OverrideSet};

use crate::error::Result;
use crate::fs::{Readiness, ready};
use crate::resolve::ModfileResolver;

/// A fully discovered dependency graph: every module reachable from the
/// root, with every dependency edge already override-adjusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub root_module_name: String,
    pub dep_graph: IndexMap<ModuleKey, Module>,
    pub overrides: OverrideSet,
}

/// Compute the dependency graph reachable from the workspace's root module.
///
/// Overrides declared by non-root modules have no effect: edges are
/// rewritten exactly once, before a node's dependencies are expanded, using
/// the root's override table only.
///
/// A missing dependency never aborts the pass — a pending placeholder is
/// recorded and expansion continues, so one invocation requests as many
/// independent inputs as possible. Any placeholder left after the worklist
/// drains makes the whole computation `Pending`; the engine retries once
/// the inputs land. All state is rebuilt fresh per invocation, so identical
/// inputs always produce an identical graph.
pub fn discover(resolver: &ModfileResolver) -> Result<Readiness<Discovery>> {
    let root = ready!(resolver.resolve_root()?);
    let root_key = ModuleKey::new(root.module.name(), "");

    // `None` marks a node whose declaration file is not yet available.
    let mut dep_graph: IndexMap<ModuleKey, Option<Module>> = IndexMap::new();
    dep_graph.insert(
        root_key.clone(),
        Some(rewrite_dep_keys(&root.module, &root.overrides)),
    );

    let mut unexpanded = VecDeque::from([root_key]);
    while let Some(key) = unexpanded.pop_front() {
        let Some(module) = dep_graph.get(&key).cloned().flatten() else {
            continue;
        };
        for dep_key in module.deps().values() {
            if dep_graph.contains_key(dep_key) {
                continue;
            }
            match resolver.resolve(dep_key, &root)? {
                Readiness::Pending => {
                    // Keep expanding other nodes before reporting pending.
                    dep_graph.insert(dep_key.clone(), None);
                }
                Readiness::Ready(dep) => {
                    dep_graph.insert(
                        dep_key.clone(),
                        Some(rewrite_dep_keys(&dep, &root.overrides)),
                    );
                    unexpanded.push_back(dep_key.clone());
                }
            }
        }
    }

    let mut graph = IndexMap::with_capacity(dep_graph.len());
    for (key, module) in dep_graph {
        match module {
            Some(module) => {
                graph.insert(key, module);
            }
            None => {
                tracing::debug!(module = %key, "discovery blocked on a pending module file");
                return Ok(Readiness::Pending);
            }
        }
    }

    tracing::debug!(modules = graph.len(), "discovery complete");
    Ok(Readiness::Ready(Discovery {
        root_module_name: root.module.name().to_string(),
        dep_graph: graph,
        overrides: root.overrides,
    }))
}

/// Rewrite every dependency edge of `module` per the override table,
/// producing a new `Module`.
pub fn rewrite_dep_keys(module: &Module, overrides: &OverrideSet) -> Module {
    let deps = module
        .deps()
        .iter()
        .map(|(alias, dep_key)| (alias.clone(), rewrite_dep_key(dep_key, overrides)))
        .collect();
    Module::builder()
        .name(module.name())
        .version(module.version())
        .deps(deps)
        .build()
}

/// Apply the edge rewrite rule to one dependency target identity.
///
/// Overrides are looked up by the target's *name*, never its version: a
/// non-registry override clears the version (the override's source decides),
/// a single-version override with a non-empty pin forces that version, and
/// anything else leaves the declared version unchanged.
pub fn rewrite_dep_key(key: &ModuleKey, overrides: &OverrideSet) -> ModuleKey {
    match overrides.get(key.name()) {
        Some(ModuleOverride::Archive { .. } | ModuleOverride::LocalPath { .. }) => {
            ModuleKey::new(key.name(), "")
        }
        Some(ModuleOverride::SingleVersion { version, .. }) if !version.is_empty() => {
            ModuleKey::new(key.name(), version.clone())
        }
        Some(ModuleOverride::SingleVersion { .. }) | None => key.clone(),
    }
}
