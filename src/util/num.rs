use crate::{ast::Position, error::InterpreterError, interpreter::evaluator::core::EvalResult};

/// Converts a length or index to the script's integer type.
///
/// ## Errors
/// `Overflow` if the value does not fit in an `i64`.
pub fn usize_to_i64_checked(value: usize, pos: Position) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| InterpreterError::Overflow { pos })
}

/// Converts a shift amount to `u32`, rejecting negative or oversized
/// amounts.
///
/// ## Errors
/// `ValueError` if the amount is negative or at least 64.
///
/// ## Example
/// ```
/// use toylang::{ast::Position, util::num::shift_amount_checked};
///
/// let pos = Position::new(1, 1);
///
/// assert_eq!(shift_amount_checked(3, pos).unwrap(), 3);
/// assert!(shift_amount_checked(-1, pos).is_err());
/// assert!(shift_amount_checked(64, pos).is_err());
/// ```
pub fn shift_amount_checked(value: i64, pos: Position) -> EvalResult<u32> {
    match u32::try_from(value) {
        Ok(amount) if amount < 64 => Ok(amount),
        _ => Err(InterpreterError::ValueError { details: format!("invalid shift amount {value}"),
                                                pos }),
    }
}

/// Resolves a possibly negative sequence index against `len`.
///
/// Negative indices count from the end, so `-1` is the last element.
///
/// ## Errors
/// `MemberAccess` if the index falls outside the sequence.
///
/// ## Example
/// ```
/// use toylang::{ast::Position, util::num::resolve_index};
///
/// let pos = Position::new(1, 1);
///
/// assert_eq!(resolve_index(-1, 3, pos).unwrap(), 2);
/// assert_eq!(resolve_index(0, 3, pos).unwrap(), 0);
/// assert!(resolve_index(3, 3, pos).is_err());
/// assert!(resolve_index(-4, 3, pos).is_err());
/// ```
pub fn resolve_index(index: i64, len: usize, pos: Position) -> EvalResult<usize> {
    let out_of_range = || InterpreterError::MemberAccess { details: format!("index {index} out of range for length {len}"),
                                                           pos };
    let len_i64 = i64::try_from(len).map_err(|_| out_of_range())?;
    let resolved = if index < 0 { index + len_i64 } else { index };
    if !(0..len_i64).contains(&resolved) {
        return Err(out_of_range());
    }
    usize::try_from(resolved).map_err(|_| out_of_range())
}
