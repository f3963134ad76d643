//! # toylang
//!
//! toylang is a small dynamically typed scripting language written in Rust.
//! Source text goes through a lexer, a recursive-descent parser, a semantic
//! analyzer and finally a tree-walking interpreter.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    config::Config,
    error::ParserError,
    interpreter::{
        analyzer::core::SemanticAnalyzer,
        evaluator::{console::Console, core::Interpreter},
        parser::core::Parser,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Stat` and `Expr` enums and related types that
/// represent the syntactic structure of a program as a tree. The AST is built
/// by the parser, checked by the analyzer and walked by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
pub mod ast;
/// Tracing switches shared by the analyzer and the interpreter.
pub mod config;
/// Provides unified error types for every phase.
///
/// This module defines the errors raised while lexing, parsing, analyzing or
/// evaluating code. Every error carries the position it refers to and prints
/// as `<Kind>: <line>:<col>: <message>`.
///
/// # Responsibilities
/// - Defines one error enum per phase.
/// - Wraps them in the umbrella `Error` so `?` composes across phases.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, analysis, evaluation and the
/// runtime value model.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, analyzer, evaluator and
///   value types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Convert between `i64`, `usize` and `u32` without silent data loss.
/// - Resolve possibly negative sequence indices.
pub mod util;

pub use error::Error;
pub use interpreter::lexer::tokenize;

/// Parses `source` into a program.
///
/// # Errors
/// [`Error::Lexer`] if the source cannot be tokenized, [`Error::Parser`] if
/// the tokens do not form a program.
///
/// # Examples
/// ```
/// use toylang::{Error, parse};
///
/// assert_eq!(parse("var x = 1").unwrap().stats.len(), 1);
/// assert!(matches!(parse("var x = $"), Err(Error::Lexer(_))));
/// assert!(matches!(parse("var = 1"), Err(Error::Parser(_))));
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    Parser::new(source).and_then(Parser::parse_program)
                       .map_err(|err| match err {
                           ParserError::Lexer(err) => Error::Lexer(err),
                           other => Error::Parser(other),
                       })
}

/// Runs the semantic analyzer over `program` with a fresh global scope.
///
/// # Examples
/// ```
/// use toylang::{analyze, parse};
///
/// assert!(analyze(&parse("var x = 1 println(x)").unwrap()).is_ok());
/// assert!(analyze(&parse("println(y)").unwrap()).is_err());
/// ```
pub fn analyze(program: &Program) -> Result<(), Error> {
    SemanticAnalyzer::new(Config::default()).analyze(program)?;
    Ok(())
}

/// Parses, analyzes and executes `source` on the process's standard streams.
///
/// # Errors
/// Returns the first error of whichever phase fails.
pub fn run(source: &str) -> Result<(), Error> {
    run_with(source, Config::default(), Console::stdio())
}

/// Parses, analyzes and executes `source` with the given configuration and
/// console.
///
/// # Errors
/// Returns the first error of whichever phase fails. A program that fails
/// analysis is never executed.
///
/// # Examples
/// ```
/// use toylang::{
///     config::Config,
///     interpreter::evaluator::console::{Console, OutputBuffer},
///     run_with,
/// };
///
/// let output = OutputBuffer::default();
/// let console = Console::new(output.clone(), std::io::empty());
///
/// run_with("{ var x = 1 { var x = 2 println x } println x }", Config::default(), console).unwrap();
///
/// assert_eq!(output.contents(), "2\n1\n");
/// ```
pub fn run_with(source: &str, config: Config, console: Console) -> Result<(), Error> {
    let program = parse(source)?;
    SemanticAnalyzer::new(config).analyze(&program)?;
    Interpreter::with_console(config, console).interpret(&program)?;
    Ok(())
}
