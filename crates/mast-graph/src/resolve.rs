//! Per-module resolution: locate a module's declaration file and evaluate it.
//!
//! The root module reads straight from the workspace; every other module is
//! located through its override (non-registry overrides fetch directly,
//! registry overrides narrow the registry list) or through the default
//! registry cascade, probing registries in configured order with the first
//! match winning.

use std::path::PathBuf;
use std::sync::Arc;

use mast_modfile::{
    MODULE_FILE_NAME, ModfileError, ModfileOutput, Module, ModuleKey, ModuleOverride, OverrideSet,
    eval_module_file,
};

use crate::error::{GraphError, Result};
use crate::fetch::{Fetcher, FetcherFactory};
use crate::fs::{Filesystem, Readiness, ready};
use crate::registry::RegistryHub;

/// The root module's resolved declaration plus its override table (with the
/// synthesized local-path override for the root's own name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    pub module: Module,
    pub overrides: OverrideSet,
}

/// Locates and evaluates module declaration files.
#[derive(Debug)]
pub struct ModfileResolver {
    workspace_root: PathBuf,
    registries: Vec<String>,
    hub: Arc<dyn RegistryHub>,
    fetchers: FetcherFactory,
    fs: Arc<dyn Filesystem>,
}

impl ModfileResolver {
    pub fn new(
        workspace_root: PathBuf,
        cache_root: PathBuf,
        registries: Vec<String>,
        hub: Arc<dyn RegistryHub>,
        fs: Arc<dyn Filesystem>,
    ) -> Self {
        let fetchers = FetcherFactory::new(workspace_root.clone(), cache_root);
        Self {
            workspace_root,
            registries,
            hub,
            fetchers,
            fs,
        }
    }

    /// Resolve the root module from the workspace's own declaration file.
    ///
    /// An override declared for the root module's own name is a
    /// configuration error; in its place a local-path override with an empty
    /// path (the workspace root itself) is synthesized, so that modules
    /// depending on the root by name resolve to the workspace rather than a
    /// registry.
    pub fn resolve_root(&self) -> Result<Readiness<ResolvedRoot>> {
        let path = self.workspace_root.join(MODULE_FILE_NAME);
        let bytes = ready!(self.fs.read(&path)?)
            .ok_or_else(|| GraphError::MissingModfile(self.workspace_root.clone()))?;
        let ModfileOutput {
            module,
            mut overrides,
        } = exec_module_file(&bytes, &ModuleKey::root())?;

        if let Some(ov) = overrides.get(module.name()) {
            return Err(GraphError::RootOverride(ov.clone()));
        }
        overrides.insert(
            module.name().to_string(),
            ModuleOverride::LocalPath {
                path: String::new(),
            },
        );

        tracing::debug!(root = module.name(), overrides = overrides.len(), "resolved root module");
        Ok(Readiness::Ready(ResolvedRoot { module, overrides }))
    }

    /// Resolve one module identity under the root's override table.
    pub fn resolve(&self, key: &ModuleKey, root: &ResolvedRoot) -> Result<Readiness<Module>> {
        if key.name() == root.module.name() {
            // A dependency on the root module by name is the root itself.
            return Ok(Readiness::Ready(root.module.clone()));
        }

        let bytes = match ready!(self.module_file_bytes(key, root.overrides.get(key.name()))?) {
            Some(bytes) => bytes,
            None => return Err(GraphError::ModuleNotFound(key.clone())),
        };
        let ModfileOutput { module, .. } = exec_module_file(&bytes, key)?;
        // Only the root's overrides take effect; the non-root table is
        // discarded here.

        if module.name() != key.name() {
            return Err(GraphError::NameMismatch {
                key: key.clone(),
                declared: module.name().to_string(),
            });
        }
        if !key.version().is_empty() && module.version() != key.version() {
            return Err(GraphError::VersionMismatch {
                key: key.clone(),
                declared: module.version().to_string(),
            });
        }
        Ok(Readiness::Ready(module))
    }

    /// Obtain declaration bytes for `key` under its (possibly absent)
    /// override. `Ready(None)` means no candidate registry serves the
    /// module.
    fn module_file_bytes(
        &self,
        key: &ModuleKey,
        ov: Option<&ModuleOverride>,
    ) -> Result<Readiness<Option<Vec<u8>>>> {
        let urls: Vec<&str> = match ov {
            Some(ModuleOverride::Archive { url, integrity }) => {
                return self.early_fetch_read(key, &self.fetchers.archive_fetcher(url, integrity));
            }
            Some(ModuleOverride::LocalPath { path }) => {
                return self.early_fetch_read(key, &self.fetchers.local_path_fetcher(path));
            }
            Some(ModuleOverride::SingleVersion { registry, .. }) if !registry.is_empty() => {
                vec![registry.as_str()]
            }
            Some(ModuleOverride::SingleVersion { .. }) | None => {
                self.registries.iter().map(String::as_str).collect()
            }
        };

        for url in urls {
            let registry = self
                .hub
                .registry(url)
                .ok_or_else(|| GraphError::UnknownRegistry(url.to_string()))?;
            if let Some(bytes) = registry.module_file(key) {
                tracing::debug!(module = %key, registry = url, "module file found in registry");
                return Ok(Readiness::Ready(Some(bytes)));
            }
            tracing::trace!(module = %key, registry = url, "module not in registry");
        }
        Ok(Readiness::Ready(None))
    }

    /// Read the declaration file at a non-registry override's early-fetch
    /// location. Registries are never consulted on this path.
    fn early_fetch_read(
        &self,
        key: &ModuleKey,
        fetcher: &dyn Fetcher,
    ) -> Result<Readiness<Option<Vec<u8>>>> {
        let dir = fetcher.early_fetch();
        let path = dir.join(MODULE_FILE_NAME);
        tracing::debug!(module = %key, path = %path.display(), "reading module file via early fetch");
        let bytes = ready!(self.fs.read(&path)?).ok_or(GraphError::MissingModfile(dir))?;
        Ok(Readiness::Ready(Some(bytes)))
    }
}

/// Evaluate declaration bytes, tagging any failure with the identity being
/// evaluated.
fn exec_module_file(bytes: &[u8], key: &ModuleKey) -> Result<ModfileOutput> {
    let source = std::str::from_utf8(bytes).map_err(|err| GraphError::Eval {
        key: key.clone(),
        source: ModfileError::Syntax(format!("invalid UTF-8: {err}")),
    })?;
    eval_module_file(source).map_err(|err| GraphError::Eval {
        key: key.clone(),
        source: err,
    })
}
