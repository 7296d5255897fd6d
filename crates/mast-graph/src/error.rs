//! Error types for module resolution and graph discovery.
//!
//! Every variant is fatal to the discovery invocation that raised it; there
//! is no partial-graph result on error. The transient "inputs not ready"
//! state is not an error — see [`crate::fs::Readiness`].

use std::path::PathBuf;

use thiserror::Error;

use mast_modfile::{ModfileError, ModuleKey, ModuleOverride};

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    /// Parse or directive error in a declaration file, tagged with the
    /// identity it was being evaluated for (root evaluates under `_@_`).
    #[error("error evaluating the MODULE.bazel file of {key}: {source}")]
    Eval {
        key: ModuleKey,
        #[source]
        source: ModfileError,
    },

    #[error("the MODULE.bazel file of {key} declares a different name ({declared})")]
    NameMismatch { key: ModuleKey, declared: String },

    #[error("the MODULE.bazel file of {key} declares a different version ({declared})")]
    VersionMismatch { key: ModuleKey, declared: String },

    #[error("invalid override for the root module found: {0}")]
    RootOverride(ModuleOverride),

    #[error("module not found in registries: {0}")]
    ModuleNotFound(ModuleKey),

    #[error("unknown registry url: {0}")]
    UnknownRegistry(String),

    #[error("no MODULE.bazel file found in {0}")]
    MissingModfile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
