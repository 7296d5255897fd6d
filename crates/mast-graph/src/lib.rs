//! # mast-graph
//!
//! Registry-backed module resolution and dependency graph discovery.
//!
//! Starting from the root module's declaration file, discovery expands every
//! not-yet-resolved dependency identity breadth-first until the graph is
//! closed, rewriting each dependency edge according to the override table
//! declared by the root module. Per-module resolution locates declaration
//! bytes either through a cascading registry list or through a non-registry
//! override (local path or archive), then evaluates them via `mast-modfile`.
//!
//! The whole core is synchronous, single-threaded, and re-entrant: any read
//! that an external incremental engine has not produced yet surfaces as
//! [`Readiness::Pending`] instead of blocking or failing, and the engine
//! re-invokes the computation from scratch once the input lands. Identical
//! inputs always yield an identical graph.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use mast_graph::{ModfileResolver, OsFilesystem, Readiness, discover};
//! # fn hub() -> Arc<dyn mast_graph::RegistryHub> { unimplemented!() }
//!
//! # fn main() -> Result<(), mast_graph::GraphError> {
//! let resolver = ModfileResolver::new(
//!     PathBuf::from("/workspace"),
//!     PathBuf::from("/workspace/.mast/cache"),
//!     vec!["https://registry.example.com".to_string()],
//!     hub(),
//!     Arc::new(OsFilesystem),
//! );
//! match discover(&resolver)? {
//!     Readiness::Ready(discovery) => println!("{} modules", discovery.dep_graph.len()),
//!     Readiness::Pending => { /* retry once inputs are available */ }
//! }
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod registry;
pub mod resolve;

// In-memory fakes shared by this crate's tests and downstream suites.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use discovery::{Discovery, discover, rewrite_dep_key, rewrite_dep_keys};
pub use error::{GraphError, Result};
pub use fetch::{ArchiveFetcher, Fetcher, FetcherFactory, LocalPathFetcher};
pub use fs::{Filesystem, OsFilesystem, Readiness};
pub use registry::{Registry, RegistryHub};
pub use resolve::{ModfileResolver, ResolvedRoot};

#[cfg(test)]
mod tests;
