//! Fetch strategies for module sources.
//!
//! An *early fetch* yields the filesystem location of a module's declaration
//! file without build-time work, so discovery can read the declaration
//! immediately. The full fetch runs later, outside this core, when the build
//! actually needs the module's sources.

use std::fmt;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use mast_modfile::ModuleOverride;

use crate::error::Result;

/// Obtains a module's sources on disk.
pub trait Fetcher: fmt::Debug + Send + Sync {
    /// Location where the module's declaration file can be read without a
    /// full fetch. Must be cheap: no network work.
    fn early_fetch(&self) -> PathBuf;

    /// Full fetch into `vendor_dir`, returning the module's root directory.
    fn fetch(&self, repo_name: &str, vendor_dir: &Path) -> Result<PathBuf>;
}

/// Sources live in a directory relative to the workspace root; both fetch
/// flavors are the directory itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPathFetcher {
    path: PathBuf,
}

impl LocalPathFetcher {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Fetcher for LocalPathFetcher {
    fn early_fetch(&self) -> PathBuf {
        self.path.clone()
    }

    fn fetch(&self, _repo_name: &str, _vendor_dir: &Path) -> Result<PathBuf> {
        Ok(self.path.clone())
    }
}

/// Archive sources extract into a cache directory keyed by the archive URL.
///
/// Download and extraction are driven externally; until they land, reads
/// under the extraction directory surface as pending or missing through the
/// filesystem seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFetcher {
    url: String,
    integrity: String,
    extract_dir: PathBuf,
}

impl ArchiveFetcher {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn integrity(&self) -> &str {
        &self.integrity
    }
}

impl Fetcher for ArchiveFetcher {
    fn early_fetch(&self) -> PathBuf {
        self.extract_dir.clone()
    }

    fn fetch(&self, _repo_name: &str, _vendor_dir: &Path) -> Result<PathBuf> {
        Ok(self.extract_dir.clone())
    }
}

/// Builds fetchers anchored at a workspace root and a fetch cache root.
#[derive(Debug, Clone)]
pub struct FetcherFactory {
    workspace_root: PathBuf,
    cache_root: PathBuf,
}

impl FetcherFactory {
    pub fn new(workspace_root: PathBuf, cache_root: PathBuf) -> Self {
        Self {
            workspace_root,
            cache_root,
        }
    }

    /// Fetcher for a workspace-root-relative local path. An empty path is
    /// the workspace root itself.
    pub fn local_path_fetcher(&self, path: &str) -> LocalPathFetcher {
        LocalPathFetcher::new(self.workspace_root.join(path).clean())
    }

    /// Fetcher for a downloadable archive; the extraction directory is
    /// content-addressed by the URL so retries land in the same place.
    pub fn archive_fetcher(&self, url: &str, integrity: &str) -> ArchiveFetcher {
        let digest = blake3::hash(url.as_bytes()).to_hex();
        ArchiveFetcher {
            url: url.to_string(),
            integrity: integrity.to_string(),
            extract_dir: self.cache_root.join("archives").join(digest.as_str()),
        }
    }

    /// Early-fetch capability dispatch: defined for every non-registry
    /// override, `None` for registry overrides (which have no fetch of
    /// their own).
    pub fn early_fetcher(&self, ov: &ModuleOverride) -> Option<Box<dyn Fetcher>> {
        match ov {
            ModuleOverride::Archive { url, integrity } => {
                Some(Box::new(self.archive_fetcher(url, integrity)))
            }
            ModuleOverride::LocalPath { path } => Some(Box::new(self.local_path_fetcher(path))),
            ModuleOverride::SingleVersion { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> FetcherFactory {
        FetcherFactory::new(PathBuf::from("/ws"), PathBuf::from("/cache"))
    }

    #[test]
    fn local_path_is_workspace_relative() {
        let fetcher = factory().local_path_fetcher("code_for_b");
        assert_eq!(fetcher.early_fetch(), PathBuf::from("/ws/code_for_b"));
    }

    #[test]
    fn empty_local_path_is_the_workspace_root() {
        let fetcher = factory().local_path_fetcher("");
        assert_eq!(fetcher.early_fetch(), PathBuf::from("/ws"));
    }

    #[test]
    fn archive_extract_dir_is_stable_per_url() {
        let a = factory().archive_fetcher("https://example.com/b.tar.gz", "");
        let b = factory().archive_fetcher("https://example.com/b.tar.gz", "sha256-xyz");
        let c = factory().archive_fetcher("https://example.com/c.tar.gz", "");
        assert_eq!(a.early_fetch(), b.early_fetch());
        assert_ne!(a.early_fetch(), c.early_fetch());
    }

    #[test]
    fn early_fetcher_is_defined_only_for_non_registry_overrides() {
        let factory = factory();
        assert!(
            factory
                .early_fetcher(&ModuleOverride::LocalPath { path: "b".into() })
                .is_some()
        );
        assert!(
            factory
                .early_fetcher(&ModuleOverride::Archive {
                    url: "https://example.com/b.zip".into(),
                    integrity: String::new(),
                })
                .is_some()
        );
        assert!(
            factory
                .early_fetcher(&ModuleOverride::SingleVersion {
                    version: "18".into(),
                    registry: String::new(),
                })
                .is_none()
        );
    }
}
