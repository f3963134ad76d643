/// Binary operator evaluation logic.
///
/// Handles every binary operator: arithmetic, bitwise, comparison,
/// membership, identity and the short-circuit logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements `+`, `-`, `not`, `#` and `~`.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the `Interpreter`, the `Flow` signal returned by statements, and
/// the statement and expression dispatch.
pub mod core;

/// Activation records and the call stack.
pub mod call_stack;

/// Injected input and output streams.
pub mod console;

/// Statement execution: declarations, assignments, branches and the
/// condition-driven loops.
pub mod statement;

/// Evaluation of the counted `for` loop and of `for ... in`.
///
/// Manages the loop record, the constant loop variables and the snapshot of
/// the iterated value.
pub mod for_loop;

/// Indexing and member access on lists, maps and strings.
pub mod access;

/// Utility functions for evaluation.
///
/// Record helpers and the map and set constructors.
pub mod utils;

/// Function evaluation.
///
/// Handles script and host function calls, argument checking, and the host
/// function library.
pub mod function;
