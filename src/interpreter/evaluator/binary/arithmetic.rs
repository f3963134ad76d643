use crate::{
    ast::{BinaryOperator, Position},
    error::InterpreterError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Operands of an arithmetic operator after promotion.
///
/// Two ints stay ints; any other pair of numbers becomes two floats.
enum Operands {
    Ints(i64, i64),
    Floats(f64, f64),
}

fn numeric(op: BinaryOperator, left: &Value, right: &Value, pos: Position) -> EvalResult<Operands> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Operands::Ints(*a, *b)),
        _ if left.is_number() && right.is_number() => {
            Ok(Operands::Floats(left.as_float(pos)?, right.as_float(pos)?))
        },
        _ => Err(unsupported(op, left, right, pos)),
    }
}

pub(super) fn unsupported(op: BinaryOperator, left: &Value, right: &Value, pos: Position) -> InterpreterError {
    InterpreterError::TypeError { details: format!("unsupported operand types for `{op}`: `{}` and `{}`",
                                                   left.type_name(),
                                                   right.type_name()),
                                  pos }
}

fn checked(result: Option<i64>, pos: Position) -> EvalResult<Value> {
    result.map(Value::Int).ok_or(InterpreterError::Overflow { pos })
}

/// `left + right`.
///
/// A string on the left concatenates with a string or number on the right,
/// the number printed as `print` would. Otherwise both sides must be numbers.
pub fn add(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    if let Value::Str(s) = left {
        return match right {
            Value::Str(_) | Value::Int(_) | Value::Float(_) => Ok(format!("{s}{right}").into()),
            _ => Err(unsupported(BinaryOperator::Add, left, right, pos)),
        };
    }
    match numeric(BinaryOperator::Add, left, right, pos)? {
        Operands::Ints(a, b) => checked(a.checked_add(b), pos),
        Operands::Floats(a, b) => Ok(Value::Float(a + b)),
    }
}

/// `left - right`.
pub fn sub(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    match numeric(BinaryOperator::Sub, left, right, pos)? {
        Operands::Ints(a, b) => checked(a.checked_sub(b), pos),
        Operands::Floats(a, b) => Ok(Value::Float(a - b)),
    }
}

/// `left * right`.
pub fn mul(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    match numeric(BinaryOperator::Mul, left, right, pos)? {
        Operands::Ints(a, b) => checked(a.checked_mul(b), pos),
        Operands::Floats(a, b) => Ok(Value::Float(a * b)),
    }
}

/// `left / right`.
///
/// Two ints divide with the quotient rounded toward negative infinity;
/// otherwise the division is an IEEE float division, so `1.0 / 0` is `inf`.
///
/// # Errors
/// `DivisionByZero` when both operands are ints and `right` is zero.
pub fn div(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    match numeric(BinaryOperator::Div, left, right, pos)? {
        Operands::Ints(_, 0) => Err(InterpreterError::DivisionByZero { pos }),
        Operands::Ints(a, b) => checked(floor_div(a, b), pos),
        Operands::Floats(a, b) => Ok(Value::Float(a / b)),
    }
}

/// `left % right`.
///
/// The result takes the sign of `right`, matching the rounding of `/`. A
/// float remainder by zero is NaN.
pub fn rem(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    match numeric(BinaryOperator::Mod, left, right, pos)? {
        Operands::Ints(_, 0) => Err(InterpreterError::DivisionByZero { pos }),
        Operands::Ints(a, b) => checked(floor_rem(a, b), pos),
        Operands::Floats(a, b) => {
            let r = a % b;
            Ok(Value::Float(if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }))
        },
    }
}

/// `left ** right`.
///
/// An int raised to a non-negative int stays an int; anything else is
/// computed in floats.
pub fn pow(left: &Value, right: &Value, pos: Position) -> EvalResult<Value> {
    match numeric(BinaryOperator::Pow, left, right, pos)? {
        Operands::Ints(a, b) if b >= 0 => match (a, u32::try_from(b)) {
            (_, Ok(exponent)) => checked(a.checked_pow(exponent), pos),
            (0 | 1, Err(_)) => Ok(Value::Int(a)),
            (-1, Err(_)) => Ok(Value::Int(if b % 2 == 0 { 1 } else { -1 })),
            _ => Err(InterpreterError::Overflow { pos }),
        },
        Operands::Ints(..) => Ok(Value::Float(left.as_float(pos)?.powf(right.as_float(pos)?))),
        Operands::Floats(a, b) => Ok(Value::Float(a.powf(b))),
    }
}

/// Integer division rounding toward negative infinity.
///
/// `None` on overflow; `b` must not be zero.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Remainder matching [`floor_div`].
fn floor_rem(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && (r < 0) != (b < 0) {
        r.checked_add(b)
    } else {
        Some(r)
    }
}
