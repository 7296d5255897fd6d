//! In-memory fakes for registries and the filesystem.
//!
//! Available to this crate's tests and, behind the `test-utils` feature, to
//! downstream test suites.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;

use mast_modfile::ModuleKey;

use crate::fetch::{Fetcher, LocalPathFetcher};
use crate::fs::{Filesystem, Readiness};
use crate::registry::{Registry, RegistryHub};

/// Registry backed by an in-memory map of declaration files.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    url: String,
    modules: IndexMap<ModuleKey, Vec<u8>>,
    fetch_paths: IndexMap<ModuleKey, PathBuf>,
}

impl FakeRegistry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Builder-style: register a module's declaration file.
    pub fn add_module(mut self, key: ModuleKey, module_file: &str) -> Self {
        self.modules.insert(key, module_file.as_bytes().to_vec());
        self
    }

    /// Builder-style: register a build-time fetch location for a module.
    pub fn with_fetch_path(mut self, key: ModuleKey, path: impl Into<PathBuf>) -> Self {
        self.fetch_paths.insert(key, path.into());
        self
    }
}

impl Registry for FakeRegistry {
    fn url(&self) -> &str {
        &self.url
    }

    fn module_file(&self, key: &ModuleKey) -> Option<Vec<u8>> {
        self.modules.get(key).cloned()
    }

    fn fetcher(&self, key: &ModuleKey) -> Option<Box<dyn Fetcher>> {
        self.fetch_paths
            .get(key)
            .map(|path| Box::new(LocalPathFetcher::new(path.clone())) as Box<dyn Fetcher>)
    }
}

/// Hub over a fixed set of fake registries, looked up by URL.
#[derive(Debug, Default)]
pub struct FakeRegistryHub {
    registries: HashMap<String, Arc<FakeRegistry>>,
}

impl FakeRegistryHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, registry: FakeRegistry) -> Self {
        self.registries
            .insert(registry.url().to_string(), Arc::new(registry));
        self
    }
}

impl RegistryHub for FakeRegistryHub {
    fn registry(&self, url: &str) -> Option<Arc<dyn Registry>> {
        self.registries
            .get(url)
            .map(|registry| registry.clone() as Arc<dyn Registry>)
    }
}

/// In-memory filesystem with an explicit pending set, for exercising the
/// not-ready/retry protocol. Every read is logged so tests can assert that
/// independent branches were still attempted while another was pending.
#[derive(Debug, Default)]
pub struct FakeFilesystem {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    pending: Mutex<HashSet<PathBuf>>,
    reads: Mutex<Vec<PathBuf>>,
}

impl FakeFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, path: impl Into<PathBuf>, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), contents.as_bytes().to_vec());
    }

    /// Make reads of `path` report `Pending` until [`Self::make_ready`].
    pub fn mark_pending(&self, path: impl Into<PathBuf>) {
        self.pending.lock().unwrap().insert(path.into());
    }

    pub fn make_ready(&self, path: impl AsRef<Path>) {
        self.pending.lock().unwrap().remove(path.as_ref());
    }

    /// Paths read so far, in request order.
    pub fn read_log(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }
}

impl Filesystem for FakeFilesystem {
    fn read(&self, path: &Path) -> io::Result<Readiness<Option<Vec<u8>>>> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        if self.pending.lock().unwrap().contains(path) {
            return Ok(Readiness::Pending);
        }
        Ok(Readiness::Ready(self.files.lock().unwrap().get(path).cloned()))
    }
}
