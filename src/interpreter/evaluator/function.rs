/// The host function table and call dispatch.
///
/// Calls of script functions run their body in a fresh `Function` record
/// linked to the record the function was defined in. Calls of host functions
/// check the argument count against the function's arity first.
pub mod core;

/// `print` and `println`.
///
/// Both stringify every argument and join them with single spaces; `println`
/// appends a newline.
pub mod print;

/// `input(prompt?, type?)`.
///
/// Blocks on a line of console input, optionally converting it to `int` or
/// `float`.
pub mod input;

/// `typeof` and `assert`.
pub mod builtin;
