//! Registry seams.
//!
//! A registry is an ordered source of module declarations, queried by exact
//! identity. Real implementations (index-backed, HTTP) live outside this
//! core; discovery only needs these two traits.

use std::fmt;
use std::sync::Arc;

use mast_modfile::ModuleKey;

use crate::fetch::Fetcher;

pub trait Registry: fmt::Debug + Send + Sync {
    /// Stable URL identifying this registry in configuration and overrides.
    fn url(&self) -> &str;

    /// Raw declaration bytes for `key`, or `None` when this registry does
    /// not serve that exact module. Absence is a normal outcome; the caller
    /// moves on to the next registry in its list.
    fn module_file(&self, key: &ModuleKey) -> Option<Vec<u8>>;

    /// Fetcher for the module's full sources at build time, or `None` when
    /// the registry does not serve that module.
    fn fetcher(&self, key: &ModuleKey) -> Option<Box<dyn Fetcher>>;
}

/// Resolves registry URLs to registry handles.
pub trait RegistryHub: fmt::Debug + Send + Sync {
    /// `None` when the URL does not name a known registry. Resolution
    /// treats that as a configuration error rather than silently-absent
    /// input.
    fn registry(&self, url: &str) -> Option<Arc<dyn Registry>>;
}
