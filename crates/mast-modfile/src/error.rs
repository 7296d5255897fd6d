//! Error types for module declaration files.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModfileError>;

/// A configuration error in a module declaration file.
///
/// Every variant is fatal and user-facing; the caller tags it with the
/// identity of the module being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModfileError {
    #[error("syntax error in module file: {0}")]
    Syntax(String),

    #[error("the module() directive can only be called once")]
    ModuleCalledTwice,

    #[error("a bazel_dep with the repo name {0} already exists")]
    DuplicateDep(String),

    #[error("multiple overrides for dep {0} found")]
    MultipleOverrides(String),

    #[error("unknown directive: {0}")]
    UnknownDirective(String),

    #[error("{0}() cannot be used in expression position")]
    DirectiveInExpression(String),

    #[error("{directive}: missing required argument '{argument}'")]
    MissingArgument {
        directive: &'static str,
        argument: &'static str,
    },

    #[error("{directive}: unexpected argument '{argument}'")]
    UnexpectedArgument { directive: String, argument: String },

    #[error("{directive}: duplicate argument '{argument}'")]
    DuplicateArgument { directive: String, argument: String },

    #[error("{directive}: positional arguments are not allowed")]
    PositionalArgument { directive: String },

    #[error("{directive}: argument '{argument}' expects {expected}")]
    WrongArgumentType {
        directive: &'static str,
        argument: &'static str,
        expected: &'static str,
    },

    #[error("invalid module key: {0}")]
    InvalidKey(String),
}
