/// Numeric conversion helpers.
///
/// Safe conversions between the script's `i64` and the host's `usize` and
/// `u32`, plus index resolution for sequences. Every helper fails with an
/// `InterpreterError` instead of truncating or rounding silently.
pub mod num;
