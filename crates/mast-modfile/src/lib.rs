//! # mast-modfile
//!
//! Module declaration files (`MODULE.bazel`) and the module data model.
//!
//! A module declares its own identity and its dependencies in a declaration
//! file written in a deliberately tiny, declarative language: straight-line
//! directive calls, nothing else. This crate provides:
//!
//! - **Identity types**: [`ModuleKey`] (name + version) and [`Module`]
//!   (a resolved descriptor with named dependency edges)
//! - **Override values**: [`ModuleOverride`] variants redirecting how a
//!   named dependency's source or version is obtained
//! - **The directive surface**: parsing ([`parser`]) and evaluation
//!   ([`eval`]) of declaration files into a `Module` plus an override table
//!
//! Resolution and graph discovery live in `mast-graph`; this crate is pure
//! data plus evaluation, with no I/O.

pub mod error;
pub mod eval;
pub mod key;
pub mod module;
pub mod overrides;
pub mod parser;

/// File name of a module's declaration file, relative to the module root.
pub const MODULE_FILE_NAME: &str = "MODULE.bazel";

pub use error::{ModfileError, Result};
pub use eval::{ModfileOutput, eval_module_file};
pub use key::ModuleKey;
pub use module::{Module, ModuleBuilder};
pub use overrides::{ModuleOverride, OverrideSet};
