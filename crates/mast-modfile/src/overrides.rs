use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A root-module-declared redirection of how a named dependency's source or
/// version is obtained.
///
/// Two families exist:
///
/// - *Non-registry* ([`Archive`](Self::Archive),
///   [`LocalPath`](Self::LocalPath)): the module's source is obtained
///   directly, bypassing registries entirely.
/// - *Registry* ([`SingleVersion`](Self::SingleVersion)): the module still
///   comes from a registry, but with the version pinned and/or the registry
///   list narrowed to a single entry.
///
/// Both dispatch points (early-fetch capability in `mast-graph`, and the
/// edge-rewrite rule) match on this enum exhaustively, so adding a variant
/// is a compile error until every dispatch site handles it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleOverride {
    /// Fetch the module from a downloadable archive.
    Archive { url: String, integrity: String },
    /// Use a local directory as the module's source. An empty path means
    /// the project root itself.
    LocalPath { path: String },
    /// Pin the dependency's version (when `version` is non-empty) and/or
    /// resolve it from exactly one registry (when `registry` is non-empty).
    SingleVersion { version: String, registry: String },
}

impl ModuleOverride {
    /// True for overrides that bypass registries in favor of a direct fetch.
    pub fn is_non_registry(&self) -> bool {
        match self {
            Self::Archive { .. } | Self::LocalPath { .. } => true,
            Self::SingleVersion { .. } => false,
        }
    }
}

/// Formats in declaration-file syntax, for diagnostics.
impl fmt::Display for ModuleOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archive { url, integrity } => {
                write!(f, "archive_override(url='{url}', integrity='{integrity}')")
            }
            Self::LocalPath { path } => write!(f, "local_path_override(path='{path}')"),
            Self::SingleVersion { version, registry } => write!(
                f,
                "single_version_override(version='{version}', registry='{registry}')"
            ),
        }
    }
}

/// Override table: module *name* (not key — overrides apply irrespective of
/// version) to the single override declared for it.
pub type OverrideSet = IndexMap<String, ModuleOverride>;
