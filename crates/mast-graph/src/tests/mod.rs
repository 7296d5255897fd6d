//! Tests for resolution and discovery, driven through the in-memory fakes
//! in [`crate::test_utils`].

use std::path::PathBuf;
use std::sync::Arc;

use crate::resolve::ModfileResolver;
use crate::test_utils::{FakeFilesystem, FakeRegistry, FakeRegistryHub};

mod property_tests;

/// Workspace root used by every test scenario.
pub(crate) const WS: &str = "/ws";
pub(crate) const CACHE: &str = "/cache";

pub(crate) struct Setup {
    pub fs: Arc<FakeFilesystem>,
    pub resolver: ModfileResolver,
}

/// Build a resolver over fake registries and a fake filesystem.
/// `default_urls` is the configured registry cascade, in order.
pub(crate) fn setup(registries: Vec<FakeRegistry>, default_urls: &[&str]) -> Setup {
    let fs = Arc::new(FakeFilesystem::new());
    let mut hub = FakeRegistryHub::new();
    for registry in registries {
        hub = hub.add(registry);
    }
    let resolver = ModfileResolver::new(
        PathBuf::from(WS),
        PathBuf::from(CACHE),
        default_urls.iter().map(|url| url.to_string()).collect(),
        Arc::new(hub),
        fs.clone(),
    );
    Setup { fs, resolver }
}

/// Path of a declaration file inside the fake workspace.
pub(crate) fn ws_modfile(dir: &str) -> PathBuf {
    let mut path = PathBuf::from(WS);
    if !dir.is_empty() {
        path.push(dir);
    }
    path.join(mast_modfile::MODULE_FILE_NAME)
}
