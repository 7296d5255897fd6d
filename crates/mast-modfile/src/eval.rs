//! Evaluation of module declaration files.
//!
//! A single pass over the parsed directives populates a [`ModfileGlobals`]
//! accumulator, which is consumed into an immutable [`Module`] plus the
//! override table at the end. The accumulator never escapes one evaluation,
//! and evaluation has no side effects beyond it.
//!
//! Directive surface (all parameters named-only):
//!
//! - `module(name='', version='')`
//! - `bazel_dep(name, version, repo_name='')`
//! - `override_dep(name, override)`
//! - `single_version_override(version='', registry='')`
//! - `archive_override(url, integrity='')`
//! - `local_path_override(path)`
//!
//! The last three are pure constructors; they are valid both as the
//! `override=` argument and as value-discarding top-level statements.

use indexmap::IndexMap;

use crate::error::{ModfileError, Result};
use crate::key::ModuleKey;
use crate::module::Module;
use crate::overrides::{ModuleOverride, OverrideSet};
use crate::parser::{Arg, Call, Value, parse_module_file};

/// Result of evaluating one declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModfileOutput {
    pub module: Module,
    /// Overrides declared by this file. Only the root module's overrides
    /// ever take effect; callers discard this for non-root modules.
    pub overrides: OverrideSet,
}

/// Parse and evaluate a declaration file.
pub fn eval_module_file(source: &str) -> Result<ModfileOutput> {
    let calls = parse_module_file(source)?;
    tracing::trace!(directives = calls.len(), "evaluating module file");

    let mut globals = ModfileGlobals::default();
    for call in calls {
        globals.apply(call)?;
    }
    Ok(globals.finish())
}

/// Mutable accumulator for one evaluation pass.
#[derive(Debug, Default)]
struct ModfileGlobals {
    module_called: bool,
    name: String,
    version: String,
    deps: IndexMap<String, ModuleKey>,
    overrides: OverrideSet,
}

impl ModfileGlobals {
    fn apply(&mut self, call: Call) -> Result<()> {
        match call.name.as_str() {
            "module" => {
                let mut args = Args::bind("module", call.args)?;
                let name = args.optional_str("name")?;
                let version = args.optional_str("version")?;
                args.finish()?;
                if self.module_called {
                    return Err(ModfileError::ModuleCalledTwice);
                }
                self.module_called = true;
                self.name = name;
                self.version = version;
            }
            "bazel_dep" => {
                let mut args = Args::bind("bazel_dep", call.args)?;
                let name = args.required_str("name")?;
                let version = args.required_str("version")?;
                let mut repo_name = args.optional_str("repo_name")?;
                args.finish()?;
                if repo_name.is_empty() {
                    repo_name = name.clone();
                }
                if self.deps.contains_key(&repo_name) {
                    return Err(ModfileError::DuplicateDep(repo_name));
                }
                self.deps.insert(repo_name, ModuleKey::new(name, version));
            }
            "override_dep" => {
                let mut args = Args::bind("override_dep", call.args)?;
                let name = args.required_str("name")?;
                let ov = args.required_override("override")?;
                args.finish()?;
                if self.overrides.contains_key(&name) {
                    return Err(ModfileError::MultipleOverrides(name));
                }
                self.overrides.insert(name, ov);
            }
            // Constructors at statement position are legal no-ops; their
            // arguments are still validated.
            "single_version_override" | "archive_override" | "local_path_override" => {
                eval_constructor(call)?;
            }
            other => return Err(ModfileError::UnknownDirective(other.to_string())),
        }
        Ok(())
    }

    fn finish(self) -> ModfileOutput {
        ModfileOutput {
            module: Module::builder()
                .name(self.name)
                .version(self.version)
                .deps(self.deps)
                .build(),
            overrides: self.overrides,
        }
    }
}

/// Evaluate an override constructor call to its value.
fn eval_constructor(call: Call) -> Result<ModuleOverride> {
    match call.name.as_str() {
        "single_version_override" => {
            let mut args = Args::bind("single_version_override", call.args)?;
            let version = args.optional_str("version")?;
            let registry = args.optional_str("registry")?;
            args.finish()?;
            Ok(ModuleOverride::SingleVersion { version, registry })
        }
        "archive_override" => {
            let mut args = Args::bind("archive_override", call.args)?;
            let url = args.required_str("url")?;
            let integrity = args.optional_str("integrity")?;
            args.finish()?;
            Ok(ModuleOverride::Archive { url, integrity })
        }
        "local_path_override" => {
            let mut args = Args::bind("local_path_override", call.args)?;
            let path = args.required_str("path")?;
            args.finish()?;
            Ok(ModuleOverride::LocalPath { path })
        }
        "module" | "bazel_dep" | "override_dep" => {
            Err(ModfileError::DirectiveInExpression(call.name))
        }
        other => Err(ModfileError::UnknownDirective(other.to_string())),
    }
}

/// Named-argument binder for one directive call.
struct Args {
    directive: &'static str,
    named: IndexMap<String, Value>,
}

impl Args {
    fn bind(directive: &'static str, args: Vec<Arg>) -> Result<Self> {
        let mut named = IndexMap::with_capacity(args.len());
        for arg in args {
            let Some(name) = arg.name else {
                return Err(ModfileError::PositionalArgument {
                    directive: directive.to_string(),
                });
            };
            if named.contains_key(&name) {
                return Err(ModfileError::DuplicateArgument {
                    directive: directive.to_string(),
                    argument: name,
                });
            }
            named.insert(name, arg.value);
        }
        Ok(Self { directive, named })
    }

    fn required_str(&mut self, argument: &'static str) -> Result<String> {
        match self.named.shift_remove(argument) {
            Some(Value::Str(s)) => Ok(s),
            Some(Value::Call(_)) => Err(ModfileError::WrongArgumentType {
                directive: self.directive,
                argument,
                expected: "a string",
            }),
            None => Err(ModfileError::MissingArgument {
                directive: self.directive,
                argument,
            }),
        }
    }

    fn optional_str(&mut self, argument: &'static str) -> Result<String> {
        match self.named.shift_remove(argument) {
            Some(Value::Str(s)) => Ok(s),
            Some(Value::Call(_)) => Err(ModfileError::WrongArgumentType {
                directive: self.directive,
                argument,
                expected: "a string",
            }),
            None => Ok(String::new()),
        }
    }

    fn required_override(&mut self, argument: &'static str) -> Result<ModuleOverride> {
        match self.named.shift_remove(argument) {
            Some(Value::Call(call)) => eval_constructor(call),
            Some(Value::Str(_)) => Err(ModfileError::WrongArgumentType {
                directive: self.directive,
                argument,
                expected: "an override value",
            }),
            None => Err(ModfileError::MissingArgument {
                directive: self.directive,
                argument,
            }),
        }
    }

    fn finish(self) -> Result<()> {
        match self.named.into_iter().next() {
            Some((argument, _)) => Err(ModfileError::UnexpectedArgument {
                directive: self.directive.to_string(),
                argument,
            }),
            None => Ok(()),
        }
    }
}
