/// Lexing errors.
///
/// Raised while turning source text into tokens: unrecognized characters,
/// unsupported escape sequences and unterminated string literals.
pub mod lexer_error;
/// Parsing errors.
///
/// Raised when the token stream does not match the grammar. Parsing stops at
/// the first error.
pub mod parser_error;
/// Semantic errors.
///
/// Raised by the scope analysis pass: undeclared or duplicate names,
/// assignments to constants and misplaced control statements.
pub mod semantic_error;
/// Interpreter errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// type mismatches, failed member accesses or calls to non-callable values.
pub mod interpreter_error;

pub use interpreter_error::InterpreterError;
pub use lexer_error::LexerError;
pub use parser_error::ParserError;
pub use semantic_error::SemanticError;
use thiserror::Error;

/// Any error produced by one of the pipeline phases.
///
/// Every phase fails fast; the first error aborts the rest of the run.
/// The `Display` output has the shape `<Kind>: <line>:<col>: <message>`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The lexer rejected the input.
    #[error(transparent)]
    Lexer(#[from] LexerError),
    /// The parser rejected the token stream.
    #[error(transparent)]
    Parser(#[from] ParserError),
    /// The semantic analyzer rejected the tree.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    /// Evaluation failed.
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
}
