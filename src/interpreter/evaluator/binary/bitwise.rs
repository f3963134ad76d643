use crate::{
    ast::{BinaryOperator, Position},
    interpreter::{
        evaluator::{binary::arithmetic::unsupported, core::EvalResult},
        value::core::Value,
    },
    util::num::shift_amount_checked,
};

fn ints(op: BinaryOperator, left: &Value, right: &Value, pos: Position) -> EvalResult<(i64, i64)> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok((*a, *b)),
        _ => Err(unsupported(op, left, right, pos)),
    }
}

/// `left & right`.
pub fn bit_and(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    let (a, b) = ints(BinaryOperator::BitAnd, left, right, pos)?;
    Ok(Value::Int(a & b))
}

/// `left | right`.
pub fn bit_or(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    let (a, b) = ints(BinaryOperator::BitOr, left, right, pos)?;
    Ok(Value::Int(a | b))
}

/// `left ^ right`.
pub fn bit_xor(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    let (a, b) = ints(BinaryOperator::BitXor, left, right, pos)?;
    Ok(Value::Int(a ^ b))
}

/// `left << right`. Bits shifted out are lost.
///
/// # Errors
/// `ValueError` for a shift amount outside `0..64`.
pub fn shl(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    let (a, b) = ints(BinaryOperator::Shl, left, right, pos)?;
    Ok(Value::Int(a << shift_amount_checked(b, pos)?))
}

/// `left >> right`, an arithmetic shift.
///
/// # Errors
/// `ValueError` for a shift amount outside `0..64`.
pub fn shr(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    let (a, b) = ints(BinaryOperator::Shr, left, right, pos)?;
    Ok(Value::Int(a >> shift_amount_checked(b, pos)?))
}
