/// Parser state and token handling.
///
/// Holds the [`core::Parser`] type with its single token of lookahead and the
/// entry point that parses a whole program.
pub mod core;

/// Statement parsing.
///
/// Declarations, control statements, assignments and call statements,
/// including the `else` and `func name` desugarings.
pub mod statement;

/// Binary operator parsing.
///
/// One method per precedence level, from ternary select down to
/// multiplication.
pub mod binary;

/// Prefix operators, power and primary expressions.
///
/// Also parses postfix chains (calls, `[key]`, `.field`) and the list, map
/// and set constructors.
pub mod unary;

/// Shared parsing helpers.
///
/// Delimited lists and token classification.
pub mod utils;
