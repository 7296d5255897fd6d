//! Winnow parser for module declaration files.
//!
//! The declaration language is intentionally declarative-only: a file is a
//! sequence of directive calls such as
//! `bazel_dep(name='B', version='1.0')`, separated by newlines or `;`, with
//! `#` line comments. Arguments are named, and values are string literals or
//! nested constructor calls. Control flow (loops, conditionals, definitions,
//! assignments) does not parse; the grammar is the restriction.

use winnow::{
    Parser, Result as WResult,
    ascii::{alpha1, multispace0},
    combinator::{alt, delimited, opt, preceded, repeat, separated, terminated},
    token::{take_until, take_while},
};

use crate::error::{ModfileError, Result};

/// One parsed directive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Arg>,
}

/// One argument of a directive call. `name` is `None` for a positional
/// argument (which evaluation rejects: all directive parameters are
/// named-only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Value,
}

/// An argument value: a string literal or a nested constructor call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Call(Call),
}

/// Parse a whole declaration file into its directive calls.
pub fn parse_module_file(source: &str) -> Result<Vec<Call>> {
    module_file
        .parse(source)
        .map_err(|err| ModfileError::Syntax(err.to_string()))
}

fn module_file(input: &mut &str) -> WResult<Vec<Call>> {
    preceded(trivia, repeat(0.., terminated(call, trivia))).parse_next(input)
}

// Whitespace, statement separators and `#` line comments between directives.
fn trivia(input: &mut &str) -> WResult<()> {
    repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_whitespace() || c == ';').void(),
            ('#', take_while(0.., |c: char| c != '\n')).void(),
        )),
    )
    .parse_next(input)
}

fn call(input: &mut &str) -> WResult<Call> {
    let name = identifier.parse_next(input)?;
    let _ = (multispace0, '(').parse_next(input)?;
    let args: Vec<Arg> =
        separated(0.., delimited(multispace0, argument, multispace0), ',').parse_next(input)?;
    let _ = (opt(','), multispace0, ')').parse_next(input)?;
    Ok(Call { name, args })
}

fn argument(input: &mut &str) -> WResult<Arg> {
    let name = opt(terminated(identifier, (multispace0, '=', multispace0))).parse_next(input)?;
    let value = value.parse_next(input)?;
    Ok(Arg { name, value })
}

fn value(input: &mut &str) -> WResult<Value> {
    alt((string_literal.map(Value::Str), call.map(Value::Call))).parse_next(input)
}

// Parse identifier: alphanumeric + underscore, starting with alpha or _
fn identifier(input: &mut &str) -> WResult<String> {
    (
        alt((alpha1, "_")),
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_'),
    )
        .take()
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

// Parse string literal: 'content' or "content" (no escapes)
fn string_literal(input: &mut &str) -> WResult<String> {
    alt((
        delimited('"', take_until(0.., '"'), '"'),
        delimited('\'', take_until(0.., '\''), '\''),
    ))
    .map(|s: &str| s.to_string())
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, value: Value) -> Arg {
        Arg {
            name: Some(name.to_string()),
            value,
        }
    }

    #[test]
    fn parses_a_simple_directive() {
        let calls = parse_module_file("module(name='A', version=\"0.1\")").unwrap();
        assert_eq!(
            calls,
            vec![Call {
                name: "module".into(),
                args: vec![
                    named("name", Value::Str("A".into())),
                    named("version", Value::Str("0.1".into())),
                ],
            }]
        );
    }

    #[test]
    fn statements_separate_on_newlines_and_semicolons() {
        let calls = parse_module_file(
            "module(name='B',version='1.0');bazel_dep(name='C',version='2.0')\nbazel_dep(name='D',version='3.0')",
        )
        .unwrap();
        let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["module", "bazel_dep", "bazel_dep"]);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let calls = parse_module_file(
            "# the root module\n\nmodule(name='A', version='0.1')\n# done\n",
        )
        .unwrap();
        assert_eq!(calls.len(), 1);
    }

    #[test]
    fn parses_nested_constructor_calls() {
        let calls =
            parse_module_file("override_dep(name='D', override=single_version_override(version='18'))")
                .unwrap();
        let Arg { value, .. } = &calls[0].args[1];
        match value {
            Value::Call(inner) => assert_eq!(inner.name, "single_version_override"),
            other => panic!("expected nested call, got {other:?}"),
        }
    }

    #[test]
    fn allows_multiline_calls_and_trailing_commas() {
        let calls = parse_module_file("bazel_dep(\n    name = 'B',\n    version = '1.0',\n)")
            .unwrap();
        assert_eq!(calls[0].args.len(), 2);
    }

    #[test]
    fn rejects_function_definitions() {
        assert!(matches!(
            parse_module_file("def deps():\n    pass"),
            Err(ModfileError::Syntax(_))
        ));
    }

    #[test]
    fn rejects_conditionals_and_loops() {
        assert!(parse_module_file("if x:\n    module(name='A')").is_err());
        assert!(parse_module_file("for d in deps: bazel_dep(name=d)").is_err());
    }

    #[test]
    fn rejects_assignments() {
        assert!(matches!(
            parse_module_file("ov = single_version_override(version='1')"),
            Err(ModfileError::Syntax(_))
        ));
    }

    #[test]
    fn rejects_unterminated_strings() {
        assert!(parse_module_file("module(name='A").is_err());
    }
}
